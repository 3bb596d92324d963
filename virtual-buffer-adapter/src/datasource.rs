use alloc::vec::Vec;

/// The data behind an [`crate::Adapter`].
///
/// `get(from, count)` returns the items at `from..from + count` that exist. Returning fewer
/// than `count` items tells the adapter that the data ends on that side: a short forward page
/// closes the bottom edge, a short backward page closes the top edge (backward pages are
/// aligned to the end of the requested span).
///
/// Closures `FnMut(i64, usize) -> Vec<T>` implement this trait without hints.
pub trait Datasource<T> {
    fn get(&mut self, from: i64, count: usize) -> Vec<T>;

    /// Lowest existing index, if known up front.
    fn min_index(&self) -> Option<i64> {
        None
    }

    /// Highest existing index, if known up front.
    fn max_index(&self) -> Option<i64> {
        None
    }
}

impl<T, F> Datasource<T> for F
where
    F: FnMut(i64, usize) -> Vec<T>,
{
    fn get(&mut self, from: i64, count: usize) -> Vec<T> {
        self(from, count)
    }
}

/// An in-memory datasource over a contiguous block of indexes starting at `min`.
///
/// Mutations follow the same index bookkeeping as the buffer: removing the head moves `min`
/// up, any other removal shifts the tail down by one. See
/// [`MemoryDatasource::remove_towards_head`] for removing the buffer's `min` above the head.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemoryDatasource<T> {
    min: i64,
    items: Vec<T>,
    hints: bool,
}

impl<T> MemoryDatasource<T> {
    /// Creates a datasource whose first item sits at `min`.
    pub fn new(min: i64, items: Vec<T>) -> Self {
        Self {
            min,
            items,
            hints: false,
        }
    }

    /// Reports `min()`/`max()` as index hints.
    pub fn with_hints(mut self, hints: bool) -> Self {
        self.hints = hints;
        self
    }

    pub fn set_hints(&mut self, hints: bool) {
        self.hints = hints;
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    /// Highest index, or `min - 1` when empty.
    pub fn max(&self) -> i64 {
        self.min + self.items.len() as i64 - 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: i64) -> Option<&T> {
        self.position(index).map(|pos| &self.items[pos])
    }

    /// Appends an item after `max()`.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes the item at `index`.
    pub fn remove(&mut self, index: i64) -> Option<T> {
        let pos = self.position(index)?;
        let item = self.items.remove(pos);
        if pos == 0 {
            self.min += 1;
        }
        Some(item)
    }

    /// Removes the item at `index`, moving every item before it up by one so the tail keeps
    /// its indexes.
    ///
    /// This mirrors what the buffer does when its own `min` is removed. Use it when the
    /// buffer's `min` is not this datasource's head (the top edge is still open).
    pub fn remove_towards_head(&mut self, index: i64) -> Option<T> {
        let pos = self.position(index)?;
        let item = self.items.remove(pos);
        self.min += 1;
        Some(item)
    }

    /// Replaces the item at `index` with `items`; an empty vector removes it.
    ///
    /// Returns `false` if `index` does not exist.
    pub fn replace(&mut self, index: i64, items: Vec<T>) -> bool {
        if items.is_empty() {
            return self.remove(index).is_some();
        }
        let Some(pos) = self.position(index) else {
            return false;
        };
        self.items.splice(pos..=pos, items);
        true
    }

    fn position(&self, index: i64) -> Option<usize> {
        if index < self.min || index > self.max() {
            return None;
        }
        usize::try_from(index - self.min).ok()
    }
}

impl<T: Clone> Datasource<T> for MemoryDatasource<T> {
    fn get(&mut self, from: i64, count: usize) -> Vec<T> {
        let lo = from.max(self.min);
        let hi = from
            .saturating_add(count as i64)
            .min(self.max().saturating_add(1));
        if lo >= hi {
            return Vec::new();
        }
        let start = (lo - self.min) as usize;
        let end = (hi - self.min) as usize;
        self.items[start..end].to_vec()
    }

    fn min_index(&self) -> Option<i64> {
        self.hints.then_some(self.min)
    }

    fn max_index(&self) -> Option<i64> {
        self.hints.then(|| self.max())
    }
}
