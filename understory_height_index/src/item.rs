// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Items stored in a [`HeightIndex`](crate::HeightIndex).

use core::fmt::Debug;
use core::hash::Hash;

use crate::Scalar;

/// An opaque view reference with a stable, caller-assigned identity.
///
/// The index never looks at a view beyond its [`id`](View::id). Ids must be
/// unique among the items currently stored in one index.
///
/// ```rust
/// use understory_height_index::View;
///
/// struct Row {
///     key: u64,
///     label: &'static str,
/// }
///
/// impl View for Row {
///     type Id = u64;
///
///     fn id(&self) -> &u64 {
///         &self.key
///     }
/// }
///
/// let row = Row { key: 7, label: "seven" };
/// assert_eq!(*row.id(), 7);
/// # let _ = row.label;
/// ```
pub trait View {
    /// Identifier type used by the index's identity mapping.
    type Id: Clone + Eq + Hash + Debug;

    /// Returns this view's identifier.
    fn id(&self) -> &Self::Id;
}

/// A view together with its placement along the primary axis.
///
/// `top` is derived: the index assigns it on insertion and keeps it
/// contiguous with the preceding item. It can only be overwritten through
/// [`HeightIndex::update_top`](crate::HeightIndex::update_top).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewItem<V, S> {
    /// The view this item stands for.
    pub view: V,
    pub(crate) top: S,
    pub(crate) height: S,
    /// Secondary-axis extent. Stored for the caller; not used by the index.
    pub width: S,
}

impl<V, S: Scalar> ViewItem<V, S> {
    /// Creates an item with the given extents. Its `top` is assigned on insertion.
    #[must_use]
    pub fn new(view: V, height: S, width: S) -> Self {
        Self {
            view,
            top: S::zero(),
            height,
            width,
        }
    }

    /// Offset of the item's leading edge from the start of the sequence.
    #[must_use]
    pub fn top(&self) -> S {
        self.top
    }

    /// Extent of the item along the primary axis.
    #[must_use]
    pub fn height(&self) -> S {
        self.height
    }

    /// Offset of the item's trailing edge, `top + height`.
    #[must_use]
    pub fn bottom(&self) -> S {
        self.top + self.height
    }

    /// Returns `true` if `offset` lies in `top..top + height`.
    #[must_use]
    pub fn contains_offset(&self, offset: S) -> bool {
        self.top <= offset && offset < self.bottom()
    }
}

impl<V: View, S> ViewItem<V, S> {
    /// Shorthand for `self.view.id()`.
    #[must_use]
    pub fn id(&self) -> &V::Id {
        self.view.id()
    }
}
