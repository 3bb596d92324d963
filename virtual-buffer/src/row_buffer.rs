use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Row;

/// The rendered rows, contiguous by index.
///
/// When empty, `first` is the insertion point: the index the next fetched row will get.
/// `first` never sits on `i64::MIN`.
#[derive(Clone, Debug)]
pub struct RowBuffer<T> {
    first: i64,
    rows: VecDeque<Row<T>>,
}

impl<T> RowBuffer<T> {
    pub fn new(first: i64) -> Self {
        Self {
            first,
            rows: VecDeque::new(),
        }
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    /// Index of the last row, or `first - 1` when empty.
    pub fn last(&self) -> i64 {
        self.first + (self.rows.len() as i64 - 1)
    }

    /// Index the next appended row will get; saturates once a row sits on `i64::MAX`.
    pub fn next(&self) -> i64 {
        self.first.saturating_add(self.rows.len() as i64)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, index: i64) -> bool {
        self.first <= index && index <= self.last()
    }

    pub fn get(&self, index: i64) -> Option<&Row<T>> {
        if !self.contains(index) {
            return None;
        }
        self.rows.get((index - self.first) as usize)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Row<T>> + ExactSizeIterator {
        self.rows.iter()
    }

    pub fn front(&self) -> Option<&Row<T>> {
        self.rows.front()
    }

    pub fn back(&self) -> Option<&Row<T>> {
        self.rows.back()
    }

    /// Sum of rendered row heights.
    pub fn height(&self) -> u64 {
        self.rows.iter().map(|r| r.height as u64).sum()
    }

    /// Offset of `index` relative to the first row. `index` must be in `first..=next()`.
    pub(crate) fn offset_within(&self, index: i64) -> u64 {
        let n = (index - self.first).clamp(0, self.rows.len() as i64) as usize;
        self.rows.iter().take(n).map(|r| r.height as u64).sum()
    }

    pub(crate) fn push_back(&mut self, item: T, height: u32) {
        let index = self.next();
        self.rows.push_back(Row {
            index,
            item,
            height,
        });
    }

    pub(crate) fn push_front(&mut self, item: T, height: u32) {
        self.first -= 1;
        self.rows.push_front(Row {
            index: self.first,
            item,
            height,
        });
    }

    pub(crate) fn pop_back(&mut self) -> Option<Row<T>> {
        self.rows.pop_back()
    }

    pub(crate) fn pop_front(&mut self) -> Option<Row<T>> {
        let row = self.rows.pop_front()?;
        self.first += 1;
        Some(row)
    }

    /// Moves the insertion point of an empty buffer.
    pub(crate) fn reposition(&mut self, first: i64) {
        debug_assert!(
            self.rows.is_empty(),
            "RowBuffer::reposition on a non-empty buffer"
        );
        self.first = first;
    }

    /// Shifts every row (and the insertion point) by `delta` indexes.
    pub(crate) fn shift(&mut self, delta: i64) {
        if delta == 0 {
            return;
        }
        self.first += delta;
        for row in &mut self.rows {
            row.index += delta;
        }
    }

    /// Removes the row at `index`; the rows after it take its index and the ones below.
    pub(crate) fn remove_and_close_gap(&mut self, index: i64) -> Option<Row<T>> {
        let pos = self.position(index)?;
        let row = self.rows.remove(pos)?;
        for r in self.rows.iter_mut().skip(pos) {
            r.index -= 1;
        }
        Some(row)
    }

    /// Replaces the row at `index` with `items`, re-indexing the rows after it.
    ///
    /// `items` must not be empty.
    pub(crate) fn splice(&mut self, index: i64, items: Vec<T>, height: u32) {
        let Some(pos) = self.position(index) else {
            return;
        };
        debug_assert!(!items.is_empty(), "RowBuffer::splice with no items");
        let added = items.len() as i64 - 1;
        let mut items = items.into_iter();
        if let Some(head) = items.next() {
            self.rows[pos].item = head;
        }
        for (k, item) in items.enumerate() {
            self.rows.insert(
                pos + 1 + k,
                Row {
                    index: index + 1 + k as i64,
                    item,
                    height,
                },
            );
        }
        let tail = pos + 1 + added as usize;
        for r in self.rows.iter_mut().skip(tail) {
            r.index += added;
        }
    }

    fn position(&self, index: i64) -> Option<usize> {
        if !self.contains(index) {
            return None;
        }
        Some((index - self.first) as usize)
    }

    /// Checks that row indexes are `first, first + 1, ...`.
    pub fn is_contiguous(&self) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(i, r)| r.index == self.first + i as i64)
    }
}
