// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered sequence, its identity mapping, and position search.

use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};

use crate::scalar::sanitize_height;
use crate::{HeightIndexError, HeightIndexHooks, NoopHooks, Scalar, View, ViewItem};

/// An order-preserving index over variable-height items.
///
/// Items are kept in display order, each with a `top` equal to the previous
/// item's `top + height`. A secondary mapping from [`View::Id`] to position is
/// kept in sync with every mutation, so id lookups never see a stale position.
///
/// Batch mutations splice the sequence once and shift downstream items in a
/// single pass. Offset lookups are a binary search over the cumulative tops.
///
/// Structural changes are reported to `H`, an implementation of
/// [`HeightIndexHooks`]. The default, [`NoopHooks`], ignores them.
///
/// ## Example
///
/// ```rust
/// use understory_height_index::{HeightIndex, View, ViewItem};
///
/// #[derive(Debug)]
/// struct Row(&'static str);
///
/// impl View for Row {
///     type Id = &'static str;
///
///     fn id(&self) -> &&'static str {
///         &self.0
///     }
/// }
///
/// let mut index = HeightIndex::<Row>::new();
/// let rows = [ViewItem::new(Row("a"), 10.0, 0.0), ViewItem::new(Row("b"), 5.0, 0.0)];
/// index.insert_batch(rows, None).unwrap();
///
/// // Insert between "a" and "b".
/// let inserted = index
///     .insert_batch([ViewItem::new(Row("c"), 7.0, 0.0)], Some(&"a"))
///     .unwrap();
/// assert_eq!(inserted, 7.0);
/// assert_eq!(index.total_extent(), 22.0);
///
/// assert_eq!(index.item_id_at(12.0), Ok(&"c"));
/// assert_eq!(index.get(&"b").unwrap().top(), 17.0);
///
/// index.remove_batch([&"c"]).unwrap();
/// assert_eq!(index.get(&"b").unwrap().top(), 10.0);
/// ```
pub struct HeightIndex<V: View, S = f64, H = NoopHooks> {
    items: Vec<ViewItem<V, S>>,
    positions: HashMap<V::Id, usize>,
    hooks: H,
}

impl<V: View, S: Scalar, H> fmt::Debug for HeightIndex<V, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeightIndex")
            .field("len", &self.items.len())
            .field("total_extent", &self.total_extent())
            .finish_non_exhaustive()
    }
}

impl<V: View, S: Scalar, H: Default> Default for HeightIndex<V, S, H> {
    fn default() -> Self {
        Self::with_hooks(H::default())
    }
}

impl<V: View, S: Scalar> HeightIndex<V, S, NoopHooks> {
    /// Creates an empty index that ignores structural notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hooks(NoopHooks)
    }

    /// Creates an empty index with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hooks(capacity, NoopHooks)
    }
}

impl<V: View, S: Scalar, H> HeightIndex<V, S, H> {
    /// Creates an empty index reporting structural changes to `hooks`.
    #[must_use]
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            items: Vec::new(),
            positions: HashMap::new(),
            hooks,
        }
    }

    /// Creates an empty index with room for `capacity` items, reporting to `hooks`.
    #[must_use]
    pub fn with_capacity_and_hooks(capacity: usize, hooks: H) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            hooks,
        }
    }

    /// Returns the hooks this index reports to.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Returns the hooks this index reports to, mutably.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Releases the sequence and the identity mapping, handing back the hooks.
    ///
    /// The index is consumed, so it cannot be used afterwards.
    pub fn release(self) -> H {
        let Self {
            items,
            positions,
            hooks,
        } = self;
        drop(items);
        drop(positions);
        hooks
    }

    /// Drops every item without notifying the hooks. The index stays usable.
    pub fn clear(&mut self) {
        self.items.clear();
        self.positions.clear();
    }

    /// Number of items in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the sequence holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Extent of the whole sequence: the last item's `top + height`, or zero when empty.
    #[must_use]
    pub fn total_extent(&self) -> S {
        self.items.last().map_or_else(S::zero, ViewItem::bottom)
    }

    /// Returns `true` if an item with `id` is in the index.
    #[must_use]
    pub fn contains(&self, id: &V::Id) -> bool {
        self.positions.contains_key(id)
    }

    /// Current position of the item with `id`.
    #[must_use]
    pub fn position_of(&self, id: &V::Id) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// The item with `id`.
    #[must_use]
    pub fn get(&self, id: &V::Id) -> Option<&ViewItem<V, S>> {
        self.items.get(self.position_of(id)?)
    }

    /// The item at `index` in display order.
    #[must_use]
    pub fn item_at_position(&self, index: usize) -> Option<&ViewItem<V, S>> {
        self.items.get(index)
    }

    /// The item directly after `item` in display order.
    ///
    /// Returns `None` if `item` is last or no longer in the index.
    #[must_use]
    pub fn next_item(&self, item: &ViewItem<V, S>) -> Option<&ViewItem<V, S>> {
        let position = self.position_of(item.id())?;
        self.items.get(position + 1)
    }

    /// Iterates over all items in display order.
    pub fn iter(&self) -> core::slice::Iter<'_, ViewItem<V, S>> {
        self.items.iter()
    }

    /// Finds the position of the item whose `top..top + height` contains `offset`.
    ///
    /// An offset on a boundary belongs to the item starting there. Returns
    /// [`len`](Self::len) when no item contains `offset`: the index is empty,
    /// the offset lies before the first item, or past the last one.
    #[must_use]
    pub fn position_at(&self, offset: S) -> usize {
        let mut left = 0;
        let mut right = self.items.len();

        while left < right {
            let center = (left + right) / 2;
            let item = &self.items[center];

            if offset < item.top {
                right = center;
            } else if offset >= item.bottom() {
                // Only `center` was left to search; the offset is past the end.
                if left == center {
                    break;
                }
                left = center;
            } else {
                return center;
            }
        }

        self.items.len()
    }

    /// Position of the first item strictly after the one containing `offset`,
    /// clamped to [`len`](Self::len).
    #[must_use]
    pub fn index_after(&self, offset: S) -> usize {
        (self.position_at(offset) + 1).min(self.items.len())
    }

    /// Id of the item containing `offset`.
    pub fn item_id_at(&self, offset: S) -> Result<&V::Id, HeightIndexError> {
        self.items
            .get(self.position_at(offset))
            .map(ViewItem::id)
            .ok_or(HeightIndexError::OutOfRange)
    }

    /// Calls `visit` with the id of every item from the one containing `start`
    /// through the one containing `end`, in display order.
    ///
    /// Nothing is visited when `start` falls outside the content. An `end`
    /// past the content is treated as the last item.
    pub fn for_each_id_in_range<F: FnMut(&V::Id)>(&self, start: S, end: S, mut visit: F) {
        let len = self.items.len();
        let first = self.position_at(start);
        if first >= len {
            return;
        }
        let last = self.position_at(end).min(len - 1);
        for item in self.items.iter().take(last + 1).skip(first) {
            visit(item.id());
        }
    }

    /// Overwrites the height of the item with `id`.
    ///
    /// This is a low-level primitive: downstream tops are left as they are and
    /// no hook fires. Use [`resize`](Self::resize) to keep the sequence contiguous.
    pub fn update_height(&mut self, id: &V::Id, height: S) -> Result<(), HeightIndexError> {
        let position = self.require(id)?;
        self.items[position].height = sanitize_height(height);
        Ok(())
    }

    /// Overwrites the top of the item with `id`.
    ///
    /// Nothing else moves and no hook fires. Callers using this are responsible
    /// for restoring contiguity themselves.
    pub fn update_top(&mut self, id: &V::Id, top: S) -> Result<(), HeightIndexError> {
        let position = self.require(id)?;
        self.items[position].top = top;
        Ok(())
    }

    fn require(&self, id: &V::Id) -> Result<usize, HeightIndexError> {
        self.position_of(id).ok_or_else(|| {
            hwarn!(id = ?id, "item does not exist");
            HeightIndexError::NotFound
        })
    }
}

impl<V: View, S: Scalar, H: HeightIndexHooks<V, S>> HeightIndex<V, S, H> {
    /// Inserts a batch of items, in order, after the item with id `after`, or
    /// at the front when `after` is `None`.
    ///
    /// Each item's `top` is assigned from the running baseline: the anchor's
    /// `top + height`, or zero without an anchor. Every pre-existing item after
    /// the insertion point shifts down by the inserted height.
    ///
    /// Hooks fire after the sequence is consistent again:
    /// [`on_item_inserted`](HeightIndexHooks::on_item_inserted) once per new
    /// item, last-produced first, then
    /// [`on_item_refreshed`](HeightIndexHooks::on_item_refreshed) once per
    /// shifted item, from the end of the sequence back to the insertion point.
    ///
    /// Returns the total inserted height. Fails without changing anything if
    /// the anchor is unknown or an id would appear twice.
    pub fn insert_batch<I>(
        &mut self,
        items: I,
        after: Option<&V::Id>,
    ) -> Result<S, HeightIndexError>
    where
        I: IntoIterator<Item = ViewItem<V, S>>,
    {
        let (at, baseline) = match after {
            None => (0, S::zero()),
            Some(anchor) => {
                let Some(&position) = self.positions.get(anchor) else {
                    hwarn!(anchor = ?anchor, "anchor item does not exist");
                    return Err(HeightIndexError::AnchorNotFound);
                };
                (position + 1, self.items[position].bottom())
            }
        };

        // The whole batch is laid out before the sequence is touched; the
        // insertion point stays fixed for every produced item.
        let mut pending: Vec<ViewItem<V, S>> = Vec::new();
        let mut inserted = S::zero();
        for mut item in items {
            item.height = sanitize_height(item.height);
            item.top = baseline + inserted;
            inserted = inserted + item.height;
            pending.push(item);
        }

        let mut seen = HashSet::with_capacity(pending.len());
        for item in &pending {
            let id = item.id();
            if self.positions.contains_key(id) || !seen.insert(id) {
                hwarn!(id = ?id, "inserted item id is already present");
                return Err(HeightIndexError::DuplicateId);
            }
        }
        drop(seen);

        let count = pending.len();
        let end = at + count;
        self.items.splice(at..at, pending);

        for (position, item) in self.items.iter_mut().enumerate().skip(at) {
            if position < end {
                self.positions.insert(item.id().clone(), position);
            } else {
                item.top = item.top + inserted;
                if let Some(slot) = self.positions.get_mut(item.view.id()) {
                    *slot = position;
                }
            }
        }

        for item in self.items[at..end].iter().rev() {
            self.hooks.on_item_inserted(item);
        }
        for item in self.items[end..].iter().rev() {
            self.hooks.on_item_refreshed(item, false);
        }

        htrace!(count, at, height = ?inserted, "inserted batch");
        Ok(inserted)
    }

    /// Removes the items named by `ids`, which must be one contiguous run in
    /// display order, given first to last.
    ///
    /// [`on_item_removed`](HeightIndexHooks::on_item_removed) fires for each
    /// removed item in that order, before the run is spliced out. Every item
    /// after the run then shifts up by the removed height and is reported
    /// through [`on_item_refreshed`](HeightIndexHooks::on_item_refreshed) in
    /// ascending order.
    ///
    /// Returns the total removed height; an empty `ids` removes nothing. Fails
    /// without changing anything if an id is unknown or the run has a gap.
    pub fn remove_batch<'a, I>(&mut self, ids: I) -> Result<S, HeightIndexError>
    where
        I: IntoIterator<Item = &'a V::Id>,
        V::Id: 'a,
    {
        let mut run: Option<(usize, usize)> = None;
        for id in ids {
            let Some(&position) = self.positions.get(id) else {
                hwarn!(id = ?id, "removed item does not exist");
                return Err(HeightIndexError::NotFound);
            };
            run = match run {
                None => Some((position, 1)),
                Some((start, len)) => {
                    if position != start + len {
                        hwarn!(
                            id = ?id,
                            position,
                            expected = start + len,
                            "removed items are not contiguous"
                        );
                        return Err(HeightIndexError::NotContiguous);
                    }
                    Some((start, len + 1))
                }
            };
        }
        let Some((start, count)) = run else {
            return Ok(S::zero());
        };
        let end = start + count;

        let mut removed = S::zero();
        for item in &self.items[start..end] {
            removed = removed + item.height;
            self.positions.remove(item.id());
            self.hooks.on_item_removed(item);
        }

        self.items.drain(start..end);

        for (position, item) in self.items.iter_mut().enumerate().skip(start) {
            item.top = item.top - removed;
            if let Some(slot) = self.positions.get_mut(item.view.id()) {
                *slot = position;
            }
            self.hooks.on_item_refreshed(item, false);
        }

        htrace!(count, start, height = ?removed, "removed batch");
        Ok(removed)
    }

    /// Sets the height of the item with `id` and moves every later item so the
    /// sequence stays contiguous.
    ///
    /// Once all tops are updated, the resized item is refreshed with
    /// `needs_render == true`, then each later item with `false`, in ascending
    /// order. Returns the height delta.
    pub fn resize(&mut self, id: &V::Id, height: S) -> Result<S, HeightIndexError> {
        let position = self.require(id)?;
        let height = sanitize_height(height);

        let resized = &mut self.items[position];
        let delta = height - resized.height;
        resized.height = height;

        let mut top = resized.bottom();
        for item in &mut self.items[position + 1..] {
            item.top = top;
            top = top + item.height;
        }

        let mut changed = self.items[position..].iter();
        if let Some(item) = changed.next() {
            self.hooks.on_item_refreshed(item, true);
        }
        for item in changed {
            self.hooks.on_item_refreshed(item, false);
        }

        htrace!(position, delta = ?delta, "resized item");
        Ok(delta)
    }
}

impl<'a, V: View, S, H> IntoIterator for &'a HeightIndex<V, S, H> {
    type Item = &'a ViewItem<V, S>;
    type IntoIter = core::slice::Iter<'a, ViewItem<V, S>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
