// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_height_index --heading-base-level=0

//! Understory Height Index: an order-preserving index over variable-height items.
//!
//! This crate answers "which item sits at this offset?" for virtualized lists
//! and trees whose rows have different heights, and keeps every row's offset
//! correct as rows are inserted, removed, and resized.
//!
//! The core concepts are:
//!
//! - [`View`]: the caller's row type, identified by a stable [`View::Id`].
//! - [`ViewItem`]: a view plus its `top`, `height`, and `width`. The index owns
//!   `top` and keeps it equal to the previous item's `top + height`.
//! - [`HeightIndex`]: the ordered sequence of items and an id → position map.
//!   Batch inserts (optionally after an anchor item) and batch removals of a
//!   contiguous run splice the sequence once and shift later items in a single
//!   pass. Offset lookups are a binary search.
//! - [`HeightIndexHooks`]: notifications for inserted, removed, and refreshed
//!   items, so a renderer can mirror structural changes without the index
//!   knowing anything about rendering. [`NoopHooks`] ignores them.
//!
//! This crate deliberately does **not** render, measure, or scroll. Host
//! frameworks are responsible for:
//!
//! - Owning the row views and their widgets or DOM nodes.
//! - Measuring rows and feeding heights in through [`HeightIndex::insert_batch`]
//!   and [`HeightIndex::resize`].
//! - Mapping a scroll offset and viewport to rows with
//!   [`HeightIndex::position_at`] or [`HeightIndex::for_each_id_in_range`].
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_height_index::{HeightIndex, HeightIndexHooks, View, ViewItem};
//!
//! struct Row(u32);
//!
//! impl View for Row {
//!     type Id = u32;
//!
//!     fn id(&self) -> &u32 {
//!         &self.0
//!     }
//! }
//!
//! // A renderer that counts the rows it would have to create.
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl HeightIndexHooks<Row, f32> for Counter {
//!     fn on_item_inserted(&mut self, _item: &ViewItem<Row, f32>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut index = HeightIndex::<Row, f32, _>::with_hooks(Counter::default());
//! let rows = (0..100).map(|i| ViewItem::new(Row(i), if i % 2 == 0 { 20.0 } else { 30.0 }, 0.0));
//! index.insert_batch(rows, None).unwrap();
//! assert_eq!(index.hooks().0, 100);
//! assert_eq!(index.total_extent(), 2500.0);
//!
//! // Rows visible in a 60px viewport scrolled to 45px.
//! let mut visible = Vec::new();
//! index.for_each_id_in_range(45.0, 105.0, |id| visible.push(*id));
//! assert_eq!(visible, [1, 2, 3, 4]);
//! ```
//!
//! ## Features
//!
//! - `std` *(default)*: link the standard library. Without it the crate is
//!   `no_std` and only needs `alloc`.
//! - `tracing`: emit [`tracing`](https://docs.rs/tracing) events, with target
//!   `understory_height_index`, for rejected mutations and batch summaries.
//!
//! All offsets and heights live in a caller-chosen 1D coordinate space
//! (typically logical pixels) and are expected to be finite. Negative heights
//! are clamped to zero.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[macro_use]
mod macros;

mod error;
mod height_index;
mod hooks;
mod item;
mod scalar;

pub use error::HeightIndexError;
pub use height_index::HeightIndex;
pub use hooks::{HeightIndexHooks, NoopHooks};
pub use item::{View, ViewItem};
pub use scalar::Scalar;
