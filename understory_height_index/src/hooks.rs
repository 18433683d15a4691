// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural change notifications.

use crate::ViewItem;

/// Receives notifications as a [`HeightIndex`](crate::HeightIndex) mutates.
///
/// Every method has a no-op default, so implementations only override what
/// they react to. A renderer typically creates a row in
/// [`on_item_inserted`](Self::on_item_inserted), destroys it in
/// [`on_item_removed`](Self::on_item_removed), and repositions it in
/// [`on_item_refreshed`](Self::on_item_refreshed).
///
/// Hooks run synchronously inside the mutating call. They observe the index
/// mid-mutation and cannot call back into it. A panic raised here unwinds out
/// of the mutating call and leaves the index partially updated.
pub trait HeightIndexHooks<V, S> {
    /// Called once per inserted item, last-inserted first.
    fn on_item_inserted(&mut self, item: &ViewItem<V, S>) {
        let _ = item;
    }

    /// Called once per removed item, before it leaves the sequence.
    fn on_item_removed(&mut self, item: &ViewItem<V, S>) {
        let _ = item;
    }

    /// Called for an item whose `top` or `height` changed in place.
    ///
    /// `needs_render` is `true` when the item's own extent changed, not only
    /// its position.
    fn on_item_refreshed(&mut self, item: &ViewItem<V, S>, needs_render: bool) {
        let _ = (item, needs_render);
    }
}

/// Hooks that ignore every notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopHooks;

impl<V, S> HeightIndexHooks<V, S> for NoopHooks {}

impl<V, S, H: HeightIndexHooks<V, S> + ?Sized> HeightIndexHooks<V, S> for &mut H {
    fn on_item_inserted(&mut self, item: &ViewItem<V, S>) {
        (**self).on_item_inserted(item);
    }

    fn on_item_removed(&mut self, item: &ViewItem<V, S>) {
        (**self).on_item_removed(item);
    }

    fn on_item_refreshed(&mut self, item: &ViewItem<V, S>, needs_render: bool) {
        (**self).on_item_refreshed(item, needs_render);
    }
}
