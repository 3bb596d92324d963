use alloc::vec::Vec;

use virtual_buffer::{
    BufferOptions, BufferSnapshot, FetchOutcome, InvalidUpdateError, RowBuffer, ScrollBuffer,
    Update,
};

use crate::Datasource;

/// Upper bound on fetches per call; a datasource that keeps returning full pages for an
/// unbounded index space could otherwise keep a refill loop going.
const MAX_FETCHES: usize = 1000;

/// A synchronous, datasource-driven facade over [`virtual_buffer::ScrollBuffer`].
///
/// Every call that may uncover the viewport (construction, scroll, resize, updates, hints)
/// runs the fetch protocol to completion against the datasource before returning, so the
/// rendered rows and paddings are always ready to be laid out.
///
/// Hosts that fetch asynchronously should drive [`virtual_buffer::ScrollBuffer`] directly.
#[derive(Clone, Debug)]
pub struct Adapter<T, D> {
    buffer: ScrollBuffer<T>,
    datasource: D,
}

impl<T, D: Datasource<T>> Adapter<T, D> {
    /// Creates an adapter and fills the viewport.
    ///
    /// Index hints the datasource reports take precedence over `options.min_index` /
    /// `options.max_index`.
    pub fn new(datasource: D, options: BufferOptions) -> Self {
        let options = options
            .with_min_index(datasource.min_index().or(options.min_index))
            .with_max_index(datasource.max_index().or(options.max_index));
        let mut a = Self {
            buffer: ScrollBuffer::new(options),
            datasource,
        };
        a.fill();
        a
    }

    pub fn buffer(&self) -> &ScrollBuffer<T> {
        &self.buffer
    }

    pub fn datasource(&self) -> &D {
        &self.datasource
    }

    /// Mutable access to the backing data.
    ///
    /// Changing the data does not touch the buffer; report the change with
    /// [`Adapter::apply_updates`] (or [`Adapter::reload`]) afterwards.
    pub fn datasource_mut(&mut self) -> &mut D {
        &mut self.datasource
    }

    pub fn into_parts(self) -> (ScrollBuffer<T>, D) {
        (self.buffer, self.datasource)
    }

    /// Call this when the host reports a scroll position change.
    ///
    /// Returns the applied (clamped) position.
    pub fn on_scroll(&mut self, scroll_top: u64) -> u64 {
        self.buffer.on_scroll(scroll_top);
        self.fill();
        self.buffer.scroll_top()
    }

    pub fn on_resize(&mut self, viewport_height: u32) {
        self.buffer.on_resize(viewport_height);
        self.fill();
    }

    /// Drops every row and starts over from the configured start index.
    pub fn reload(&mut self) {
        let start = self.buffer.options().start_index;
        self.reload_at(start);
    }

    /// Drops every row and starts over from `start_index`.
    ///
    /// Datasource hints are read again.
    pub fn reload_at(&mut self, start_index: i64) {
        let current = *self.buffer.options();
        let options = current
            .with_start_index(start_index)
            .with_min_index(self.datasource.min_index().or(current.min_index))
            .with_max_index(self.datasource.max_index().or(current.max_index));
        vdebug!(start_index, "reload");
        self.buffer = ScrollBuffer::new(options);
        self.fill();
    }

    /// Replaces the item at `index`. `None` or an empty vector deletes it.
    ///
    /// Returns `Ok(false)` if `index` is outside the known range.
    pub fn apply_updates(
        &mut self,
        index: i64,
        replacement: Option<Vec<T>>,
    ) -> Result<bool, InvalidUpdateError> {
        let changed = self
            .buffer
            .apply_updates(Update::Index { index, replacement })?;
        if changed {
            self.refill();
        }
        Ok(changed)
    }

    /// Runs `predicate` over every rendered item and applies the edits it returns.
    ///
    /// Returns `Ok(true)` if anything changed. A rejected batch leaves the buffer untouched.
    pub fn apply_updates_with(
        &mut self,
        predicate: impl FnMut(&T) -> Option<Vec<T>>,
    ) -> Result<bool, InvalidUpdateError> {
        let changed = self.buffer.apply_updates(Update::predicate(predicate))?;
        if changed {
            self.refill();
        }
        Ok(changed)
    }

    /// Declares the lowest existing index and closes the top edge.
    pub fn set_min_index(&mut self, min: i64) {
        self.buffer.set_min_index(min);
        self.refill();
    }

    /// Declares the highest existing index and closes the bottom edge.
    pub fn set_max_index(&mut self, max: i64) {
        self.buffer.set_max_index(max);
        self.refill();
    }

    pub fn min_index(&self) -> i64 {
        self.buffer.min_index()
    }

    pub fn max_index(&self) -> i64 {
        self.buffer.max_index()
    }

    pub fn is_bof(&self) -> bool {
        self.buffer.range().bof
    }

    pub fn is_eof(&self) -> bool {
        self.buffer.range().eof
    }

    pub fn top_padding(&self) -> u64 {
        self.buffer.top_padding()
    }

    pub fn bottom_padding(&self) -> u64 {
        self.buffer.bottom_padding()
    }

    pub fn rows(&self) -> &RowBuffer<T> {
        self.buffer.rows()
    }

    pub fn scroll_top(&self) -> u64 {
        self.buffer.scroll_top()
    }

    pub fn total_height(&self) -> u64 {
        self.buffer.total_height()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    fn refill(&mut self) {
        self.buffer.adjust();
        self.fill();
    }

    /// Resolves fetch requests until the window controller is satisfied.
    ///
    /// Returns the number of applied pages.
    fn fill(&mut self) -> usize {
        let mut applied = 0usize;
        for _ in 0..MAX_FETCHES {
            let Some(req) = self.buffer.next_fetch() else {
                return applied;
            };
            let items = self.datasource.get(req.from, req.count);
            if let FetchOutcome::Applied { .. } = self.buffer.complete_fetch(req, items) {
                applied += 1;
            }
        }
        vwarn!(
            max = MAX_FETCHES,
            first = self.buffer.rows().first(),
            last = self.buffer.rows().last(),
            "fill: fetch limit reached"
        );
        applied
    }
}
