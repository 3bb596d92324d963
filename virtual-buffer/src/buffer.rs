use crate::padding::PaddingTracker;
use crate::range::LOWEST_INDEX;
use crate::{
    BufferOptions, BufferSnapshot, Edge, FetchRequest, LogicalRange, Padding, Row, RowBuffer,
    ScrollAnchor,
};

/// A headless virtual-scrolling buffer.
///
/// This type owns all of the mutable view state: the rendered [`RowBuffer`], the known
/// [`LogicalRange`], both paddings and the scroll position. It does not hold any UI objects and
/// does not talk to a data source directly:
/// - Your host reports scroll/resize events (`on_scroll`, `on_resize`).
/// - The window controller asks for pages via [`ScrollBuffer::next_fetch`]; your host resolves
///   them and hands the items back via [`ScrollBuffer::complete_fetch`].
/// - Out-of-band data changes are reported via [`ScrollBuffer::apply_updates`].
///
/// For a datasource-driven facade that runs fetches to completion, see the
/// `virtual-buffer-adapter` crate.
#[derive(Clone, Debug)]
pub struct ScrollBuffer<T> {
    pub(crate) options: BufferOptions,
    pub(crate) rows: RowBuffer<T>,
    pub(crate) range: LogicalRange,
    pub(crate) padding: PaddingTracker,
    pub(crate) scroll_top: u64,
    pub(crate) pending: [Option<FetchRequest>; 2],
    pub(crate) generation: u64,
}

impl<T> ScrollBuffer<T> {
    /// Creates an empty buffer positioned at `options.start_index`.
    ///
    /// `options.min_index` / `options.max_index` hints are applied immediately. A start index
    /// of `i64::MIN` is raised to `i64::MIN + 1`.
    pub fn new(options: BufferOptions) -> Self {
        let start = options.start_index.max(LOWEST_INDEX);
        if start != options.start_index {
            vwarn!(
                start_index = options.start_index,
                start,
                "ScrollBuffer::new: start index out of range, clamping"
            );
        }
        let options = options.with_start_index(start);
        vdebug!(
            item_height = options.item_height,
            viewport_height = options.viewport_height,
            buffer_size = options.buffer_size,
            start_index = options.start_index,
            "ScrollBuffer::new"
        );
        let mut b = Self {
            rows: RowBuffer::new(options.start_index),
            range: LogicalRange::empty_at(options.start_index),
            padding: PaddingTracker::default(),
            scroll_top: 0,
            pending: [None, None],
            generation: 0,
            options,
        };
        if let Some(min) = options.min_index {
            b.set_min_index(min);
        }
        if let Some(max) = options.max_index {
            b.set_max_index(max);
        }
        b
    }

    pub fn options(&self) -> &BufferOptions {
        &self.options
    }

    pub fn rows(&self) -> &RowBuffer<T> {
        &self.rows
    }

    pub fn row(&self, index: i64) -> Option<&Row<T>> {
        self.rows.get(index)
    }

    pub fn range(&self) -> LogicalRange {
        self.range
    }

    pub fn min_index(&self) -> i64 {
        self.range.min
    }

    pub fn max_index(&self) -> i64 {
        self.range.max
    }

    pub fn padding(&self) -> Padding {
        self.padding.padding()
    }

    pub fn top_padding(&self) -> u64 {
        self.padding.top()
    }

    pub fn bottom_padding(&self) -> u64 {
        self.padding.bottom()
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> u32 {
        self.options.viewport_height
    }

    /// Bumped by every structural change that invalidates in-flight fetches.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self, edge: Edge) -> bool {
        self.pending[edge_slot(edge)].is_some()
    }

    /// Pixel offset where the first rendered row starts.
    pub fn rows_top(&self) -> u64 {
        self.padding.top()
    }

    /// Pixel offset where the last rendered row ends.
    pub fn rows_bottom(&self) -> u64 {
        self.padding.top().saturating_add(self.rows.height())
    }

    pub fn total_height(&self) -> u64 {
        self.rows_bottom().saturating_add(self.padding.bottom())
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.options.viewport_height as u64)
    }

    pub fn clamp_scroll_top(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_top())
    }

    /// Sets the scroll position, clamped to the scrollable extent.
    ///
    /// This does not evict or fetch anything; see [`ScrollBuffer::on_scroll`].
    pub fn set_scroll_top(&mut self, offset: u64) {
        self.scroll_top = self.clamp_scroll_top(offset);
    }

    /// Returns a lightweight snapshot of the current geometry.
    pub fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            range: self.range,
            padding: self.padding.padding(),
            scroll_top: self.scroll_top,
            viewport_height: self.options.viewport_height,
            first: self.rows.first(),
            rendered: self.rows.len(),
            rendered_height: self.rows.height(),
        }
    }

    /// Start offset of `index`, whether it is rendered or still inside a padding.
    pub fn offset_of(&self, index: i64) -> u64 {
        let h = self.options.item_height_u64();
        if index < self.rows.first() {
            let above = self.rows.first().abs_diff(index);
            return self.padding.top().saturating_sub(above.saturating_mul(h));
        }
        if index <= self.rows.next() {
            return self
                .padding
                .top()
                .saturating_add(self.rows.offset_within(index));
        }
        let below = index.abs_diff(self.rows.next());
        self.rows_bottom().saturating_add(below.saturating_mul(h))
    }

    /// Index of the row covering `offset`, clamped to the known range.
    ///
    /// Returns `None` when the range is empty.
    pub fn index_at(&self, offset: u64) -> Option<i64> {
        if self.range.is_empty() {
            return None;
        }
        let h = self.options.item_height_u64().max(1);
        let top = self.padding.top();
        if offset < top {
            let above = (top - offset).div_ceil(h) as i64;
            return Some((self.rows.first() - above).max(self.range.min));
        }
        let mut pos = top;
        for row in self.rows.iter() {
            let end = pos.saturating_add(row.height as u64);
            if offset < end {
                return Some(row.index);
            }
            pos = end;
        }
        let below = ((offset - pos) / h) as i64;
        Some(self.rows.next().saturating_add(below).min(self.range.max))
    }

    /// Captures the row at the viewport's leading edge.
    pub fn capture_anchor(&self) -> Option<ScrollAnchor> {
        let index = self.index_at(self.scroll_top)?;
        let offset_in_row = self.scroll_top.saturating_sub(self.offset_of(index));
        Some(ScrollAnchor {
            index,
            offset_in_row,
        })
    }

    /// Scrolls so that `anchor` is back at the viewport's leading edge (clamped).
    pub fn restore_anchor(&mut self, anchor: ScrollAnchor) {
        let target = self
            .offset_of(anchor.index)
            .saturating_add(anchor.offset_in_row);
        vtrace!(
            index = anchor.index,
            offset_in_row = anchor.offset_in_row,
            target,
            "restore_anchor"
        );
        self.set_scroll_top(target);
    }

    /// Declares the lowest index of the data source and closes the top edge.
    ///
    /// Rows between the hint and the current range become top padding; the scroll position
    /// follows so the visible rows stay put. A hint above the first rendered row is clamped to
    /// it.
    pub fn set_min_index(&mut self, min: i64) {
        let min = min.max(LOWEST_INDEX).min(self.rows.first());
        let h = self.options.item_height_u64();
        let prev = self.range.min;
        if min < prev {
            let grown = prev.abs_diff(min).saturating_mul(h);
            self.padding.grow(Edge::Top, grown);
            self.scroll_top = self.scroll_top.saturating_add(grown);
        } else if min > prev {
            let shrunk = min.abs_diff(prev).saturating_mul(h);
            self.padding.shrink(Edge::Top, shrunk);
            self.scroll_top = self.scroll_top.saturating_sub(shrunk);
        }
        self.range.min = min;
        if self.range.max < min - 1 {
            self.range.max = min - 1;
        }
        self.range.bof = true;
        self.generation += 1;
        self.set_scroll_top(self.scroll_top);
        vdebug!(min, prev, "set_min_index");
    }

    /// Declares the highest index of the data source and closes the bottom edge.
    ///
    /// A hint below the last rendered row is clamped to it.
    pub fn set_max_index(&mut self, max: i64) {
        let max = max.max(self.rows.last());
        let h = self.options.item_height_u64();
        let prev = self.range.max;
        if max > prev {
            self.padding
                .grow(Edge::Bottom, max.abs_diff(prev).saturating_mul(h));
        } else if max < prev {
            self.padding
                .shrink(Edge::Bottom, prev.abs_diff(max).saturating_mul(h));
        }
        self.range.max = max;
        self.range.eof = true;
        self.generation += 1;
        self.set_scroll_top(self.scroll_top);
        vdebug!(max, prev, "set_max_index");
    }

    /// Checks the buffer invariants: contiguous rows inside the range, and paddings matching
    /// the number of known rows outside the buffer.
    pub fn check_invariants(&self) -> bool {
        let h = self.options.item_height_u64();
        let first = self.rows.first();
        let last = self.rows.last();
        if !self.rows.is_contiguous() {
            return false;
        }
        if first < self.range.min || last > self.range.max {
            return false;
        }
        if self.rows.iter().any(|r| r.height as u64 != h) {
            return false;
        }
        let top = first.abs_diff(self.range.min).saturating_mul(h);
        let bottom = self.range.max.abs_diff(last).saturating_mul(h);
        self.padding.top() == top && self.padding.bottom() == bottom
    }
}

pub(crate) fn edge_slot(edge: Edge) -> usize {
    match edge {
        Edge::Top => 0,
        Edge::Bottom => 1,
    }
}
