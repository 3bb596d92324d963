use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::{Edge, InvalidUpdateError, ScrollAnchor, ScrollBuffer};

/// A matcher evaluated over rendered items.
///
/// Returning `None` leaves the item alone; returning `Some(items)` replaces it with `items`
/// (an empty vector deletes it).
pub type UpdatePredicate<'a, T> = Box<dyn FnMut(&T) -> Option<Vec<T>> + 'a>;

/// An out-of-band data change reported to [`ScrollBuffer::apply_updates`].
pub enum Update<'a, T> {
    /// Replaces the item at `index` with `replacement`. `None` or an empty vector deletes it;
    /// more than one item inserts the extra items right after it.
    Index {
        index: i64,
        replacement: Option<Vec<T>>,
    },
    /// Runs the predicate over every rendered row, in index order. Rows that are not rendered
    /// are never visited.
    Predicate(UpdatePredicate<'a, T>),
}

impl<'a, T> Update<'a, T> {
    pub fn remove(index: i64) -> Self {
        Self::Index {
            index,
            replacement: None,
        }
    }

    pub fn replace(index: i64, items: Vec<T>) -> Self {
        Self::Index {
            index,
            replacement: Some(items),
        }
    }

    pub fn predicate(f: impl FnMut(&T) -> Option<Vec<T>> + 'a) -> Self {
        Self::Predicate(Box::new(f))
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index { index, replacement } => f
                .debug_struct("Index")
                .field("index", index)
                .field("replacement", replacement)
                .finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<T> ScrollBuffer<T> {
    /// Applies an out-of-band data change.
    ///
    /// Edits are applied in ascending index order; every edit sees the index space already
    /// shifted by the edits before it. The row under the viewport's leading edge stays in
    /// place (or its nearest surviving neighbour, if it was deleted).
    ///
    /// Returns `Ok(false)` when nothing changed, e.g. for an index outside the known range.
    /// Validation errors are reported before any state is touched.
    ///
    /// Call [`ScrollBuffer::next_fetch`] afterwards: deletions may leave the viewport
    /// uncovered.
    pub fn apply_updates(&mut self, update: Update<'_, T>) -> Result<bool, InvalidUpdateError> {
        let edits = match update {
            Update::Index { index, replacement } => {
                if index < 0 {
                    return Err(InvalidUpdateError::NegativeIndex(index));
                }
                vec![(index, replacement.unwrap_or_default())]
            }
            Update::Predicate(mut f) => self
                .rows
                .iter()
                .filter_map(|row| f(&row.item).map(|items| (row.index, items)))
                .collect(),
        };
        let mut max = self.range.max;
        for (index, items) in &edits {
            let overflow = InvalidUpdateError::IndexOverflow {
                index: *index,
                len: items.len(),
            };
            let len = i64::try_from(items.len()).map_err(|_| overflow)?;
            if index.checked_add(len).is_none() {
                return Err(overflow);
            }
            if self.range.contains(*index) {
                max = max.checked_add(len - 1).ok_or(overflow)?;
            }
        }
        Ok(self.apply_edits(edits))
    }

    fn apply_edits(&mut self, edits: Vec<(i64, Vec<T>)>) -> bool {
        if edits.is_empty() {
            return false;
        }
        let mut anchor = self.capture_anchor();
        let mut shift = 0i64;
        let mut changed = false;
        for (index, items) in edits {
            if let Some(delta) = self.apply_edit(index + shift, items, anchor.as_mut()) {
                shift += delta;
                changed = true;
            }
        }
        if !changed {
            return false;
        }
        self.generation += 1;
        match anchor {
            Some(anchor) => self.restore_anchor(anchor),
            None => self.set_scroll_top(self.scroll_top),
        }
        debug_assert!(
            self.check_invariants(),
            "apply_updates broke the buffer invariants"
        );
        true
    }

    /// Applies one edit. Returns how far the indexes after `index` moved, or `None` if nothing
    /// changed.
    fn apply_edit(
        &mut self,
        index: i64,
        items: Vec<T>,
        anchor: Option<&mut ScrollAnchor>,
    ) -> Option<i64> {
        if !self.range.contains(index) {
            vtrace!(
                index,
                min = self.range.min,
                max = self.range.max,
                "apply_updates: index outside the known range"
            );
            return None;
        }
        if items.is_empty() {
            let delta = self.remove_at(index);
            if let Some(anchor) = anchor {
                self.relocate_after_removal(anchor, index, delta);
            }
            return Some(delta);
        }

        let h = self.options.item_height_u64();
        let delta = items.len() as i64 - 1;
        if self.rows.contains(index) {
            self.rows.splice(index, items, self.options.item_height);
        } else if delta == 0 {
            return None;
        } else if index < self.rows.first() {
            self.padding.grow(Edge::Top, (delta as u64).saturating_mul(h));
            self.rows.shift(delta);
        } else {
            self.padding
                .grow(Edge::Bottom, (delta as u64).saturating_mul(h));
        }
        self.range.max += delta;
        if let Some(anchor) = anchor {
            if anchor.index > index {
                anchor.index += delta;
            }
        }
        vtrace!(index, inserted = delta, "apply_updates: replace");
        Some(delta)
    }

    /// Removes the row at `index` (rendered or not). Returns the index shift for later rows:
    /// `0` when the head of the range was removed, `-1` otherwise.
    fn remove_at(&mut self, index: i64) -> i64 {
        let h = self.options.item_height_u64();
        // `min` cannot move past `i64::MAX`; such a range collapses from the tail instead.
        let at_min = index == self.range.min && index < i64::MAX;
        if self.rows.contains(index) {
            if at_min {
                self.rows.pop_front();
            } else {
                self.rows.remove_and_close_gap(index);
            }
        } else if index < self.rows.first() {
            self.padding.shrink(Edge::Top, h);
            if !at_min {
                self.rows.shift(-1);
            }
        } else {
            self.padding.shrink(Edge::Bottom, h);
            if at_min {
                // Only reachable with nothing rendered: the insertion point sits on `min`.
                self.rows.reposition(index + 1);
            }
        }
        vtrace!(index, at_min, "apply_updates: remove");
        if at_min {
            self.range.min += 1;
            0
        } else {
            self.range.max -= 1;
            -1
        }
    }

    fn relocate_after_removal(&self, anchor: &mut ScrollAnchor, index: i64, delta: i64) {
        if anchor.index > index {
            anchor.index += delta;
            return;
        }
        if anchor.index < index {
            return;
        }
        // The anchor row itself is gone: prefer the next row, which now sits where it was.
        anchor.offset_in_row = 0;
        let next = if delta == 0 { index + 1 } else { index };
        if next <= self.range.max {
            anchor.index = next;
        } else {
            anchor.index = (index - 1).max(self.range.min);
        }
    }
}
