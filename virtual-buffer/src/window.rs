use alloc::vec::Vec;

use crate::buffer::edge_slot;
use crate::range::LOWEST_INDEX;
use crate::{DiscardReason, Edge, FetchOutcome, FetchRequest, ScrollBuffer};

impl<T> ScrollBuffer<T> {
    /// Applies a scroll position reported by the host, then evicts rows that drifted out of
    /// the retention window.
    ///
    /// Call [`ScrollBuffer::next_fetch`] afterwards to top the buffer back up.
    pub fn on_scroll(&mut self, scroll_top: u64) {
        vtrace!(scroll_top, "on_scroll");
        self.set_scroll_top(scroll_top);
        self.adjust();
    }

    /// Applies a new viewport height, then evicts as for a scroll.
    pub fn on_resize(&mut self, viewport_height: u32) {
        if self.options.viewport_height == viewport_height {
            return;
        }
        vtrace!(viewport_height, "on_resize");
        self.options.viewport_height = viewport_height;
        self.set_scroll_top(self.scroll_top);
        self.adjust();
    }

    /// Evicts out-of-window rows and, if that leaves nothing rendered, moves the insertion
    /// point under the scroll position.
    ///
    /// Returns the number of evicted rows.
    pub fn adjust(&mut self) -> usize {
        let evicted = self.clip();
        self.reposition_if_empty();
        evicted
    }

    /// Evicts rows further than the retention margin from the visible area.
    ///
    /// Evicted heights go back into the padding on the same side, so the total height does not
    /// change.
    pub fn clip(&mut self) -> usize {
        let retention = self.options.retention_margin();
        let view_end = self
            .scroll_top
            .saturating_add(self.options.viewport_height as u64);
        let mut evicted = 0usize;

        let limit = view_end.saturating_add(retention);
        while let Some(row) = self.rows.back() {
            let row_top = self.rows_bottom().saturating_sub(row.height as u64);
            if row_top < limit {
                break;
            }
            if let Some(row) = self.rows.pop_back() {
                self.padding.grow(Edge::Bottom, row.height as u64);
                evicted += 1;
            }
        }

        if let Some(limit) = self.scroll_top.checked_sub(retention) {
            while let Some(row) = self.rows.front() {
                let row_bottom = self.rows_top().saturating_add(row.height as u64);
                if row_bottom > limit {
                    break;
                }
                if let Some(row) = self.rows.pop_front() {
                    self.padding.grow(Edge::Top, row.height as u64);
                    evicted += 1;
                }
            }
        }

        if evicted > 0 {
            vtrace!(
                evicted,
                first = self.rows.first(),
                last = self.rows.last(),
                "clip"
            );
        }
        evicted
    }

    fn reposition_if_empty(&mut self) {
        if !self.rows.is_empty() || self.range.is_empty() {
            return;
        }
        let h = self.options.item_height_u64();
        let target_offset = self.scroll_top.saturating_sub(self.options.look_ahead());
        let into = (target_offset / h.max(1)) as i64;
        let target = self
            .range
            .min
            .saturating_add(into)
            .clamp(self.range.min, self.range.max.saturating_add(1));
        if target == self.rows.first() {
            return;
        }
        self.rows.reposition(target);
        let top = target.abs_diff(self.range.min).saturating_mul(h);
        let bottom = self
            .range
            .max
            .saturating_add(1)
            .abs_diff(target)
            .saturating_mul(h);
        self.padding.reset(top, bottom);
        self.generation += 1;
        vdebug!(target, top, bottom, "reposition empty buffer");
    }

    /// Plans the next page to fetch, if the rendered rows do not cover the look-ahead window.
    ///
    /// The bottom edge is planned first. At most one request per edge is outstanding; an edge
    /// with a pending request is skipped until [`ScrollBuffer::complete_fetch`] resolves it.
    pub fn next_fetch(&mut self) -> Option<FetchRequest> {
        for edge in [Edge::Bottom, Edge::Top] {
            if self.is_pending(edge) {
                vtrace!(?edge, "next_fetch: request already pending");
                continue;
            }
            if let Some(req) = self.plan_fetch(edge) {
                vtrace!(?edge, from = req.from, count = req.count, "next_fetch");
                self.pending[edge_slot(edge)] = Some(req);
                return Some(req);
            }
        }
        None
    }

    fn plan_fetch(&self, edge: Edge) -> Option<FetchRequest> {
        let look_ahead = self.options.look_ahead();
        let size = self.options.effective_buffer_size();
        match edge {
            Edge::Bottom => {
                let want = self
                    .scroll_top
                    .saturating_add(self.options.viewport_height as u64)
                    .saturating_add(look_ahead);
                if self.rows_bottom() >= want {
                    return None;
                }
                let known_below = self.range.max - self.rows.last();
                let count = if self.range.is_closed(edge) {
                    if known_below <= 0 {
                        return None;
                    }
                    size.min(known_below as usize)
                } else {
                    size
                };
                // No index exists past `i64::MAX`.
                let room = i64::MAX.abs_diff(self.rows.last());
                let count = count.min(usize::try_from(room).unwrap_or(usize::MAX));
                if count == 0 {
                    return None;
                }
                Some(FetchRequest {
                    edge,
                    from: self.rows.next(),
                    count,
                    generation: self.generation,
                })
            }
            Edge::Top => {
                if self.scroll_top >= self.rows_top().saturating_add(look_ahead) {
                    return None;
                }
                let known_above = self.rows.first() - self.range.min;
                let count = if self.range.is_closed(edge) {
                    if known_above <= 0 {
                        return None;
                    }
                    size.min(known_above as usize)
                } else {
                    size
                };
                let room = self.rows.first().abs_diff(LOWEST_INDEX);
                let count = count.min(usize::try_from(room).unwrap_or(usize::MAX));
                if count == 0 {
                    return None;
                }
                Some(FetchRequest {
                    edge,
                    from: self.rows.first() - count as i64,
                    count,
                    generation: self.generation,
                })
            }
        }
    }

    /// Applies the items returned for `request`.
    ///
    /// Forward pages map to `request.from..`; backward pages are aligned to the end of the
    /// request, so a short backward page covers the indexes right above the buffer. A page
    /// shorter than requested closes the edge.
    ///
    /// The result is discarded (without touching any state) when an update or reposition
    /// happened since the request was issued, or when the buffer edge moved away from it.
    pub fn complete_fetch(&mut self, request: FetchRequest, mut items: Vec<T>) -> FetchOutcome {
        let slot = &mut self.pending[edge_slot(request.edge)];
        if *slot != Some(request) {
            vdebug!(edge = ?request.edge, from = request.from, "complete_fetch: not pending");
            return FetchOutcome::Discarded(DiscardReason::NotPending);
        }
        *slot = None;

        if request.generation != self.generation {
            vdebug!(
                edge = ?request.edge,
                requested = request.generation,
                current = self.generation,
                "complete_fetch: stale generation, discarding"
            );
            return FetchOutcome::Discarded(DiscardReason::StaleGeneration);
        }
        let aligned = match request.edge {
            Edge::Bottom => request.from == self.rows.next(),
            Edge::Top => request.end() == self.rows.first(),
        };
        if !aligned {
            vdebug!(
                edge = ?request.edge,
                from = request.from,
                first = self.rows.first(),
                last = self.rows.last(),
                "complete_fetch: edge moved, discarding"
            );
            return FetchOutcome::Discarded(DiscardReason::EdgeMoved);
        }

        if items.len() > request.count {
            vwarn!(
                returned = items.len(),
                requested = request.count,
                "complete_fetch: data source returned more items than requested"
            );
            items.truncate(request.count);
        }
        let received = items.len();
        let short = received < request.count;
        match request.edge {
            Edge::Bottom => self.append(items, short),
            Edge::Top => self.prepend(items, short),
        }
        self.set_scroll_top(self.scroll_top);
        vtrace!(
            edge = ?request.edge,
            received,
            short,
            min = self.range.min,
            max = self.range.max,
            "complete_fetch"
        );
        FetchOutcome::Applied {
            rows: received,
            closed_edge: short,
        }
    }

    fn append(&mut self, items: Vec<T>, short: bool) {
        let height = self.options.item_height;
        for item in items {
            let index = self.rows.next();
            if index <= self.range.max {
                self.padding.shrink(Edge::Bottom, height as u64);
            } else {
                self.range.max = index;
            }
            self.rows.push_back(item, height);
        }
        if short {
            let gone = self.range.max - self.rows.last();
            if gone > 0 {
                vdebug!(gone, "append: known rows vanished past the end");
                self.padding.shrink(
                    Edge::Bottom,
                    (gone as u64).saturating_mul(height as u64),
                );
                self.range.max = self.rows.last();
            }
            self.range.eof = true;
        }
    }

    fn prepend(&mut self, items: Vec<T>, short: bool) {
        let height = self.options.item_height;
        for item in items.into_iter().rev() {
            let index = self.rows.first() - 1;
            if index >= self.range.min {
                self.padding.shrink(Edge::Top, height as u64);
            } else {
                // Content grows above the viewport; keep the visible rows where they are.
                self.range.min = index;
                self.scroll_top = self.scroll_top.saturating_add(height as u64);
            }
            self.rows.push_front(item, height);
        }
        if short {
            let gone = self.rows.first() - self.range.min;
            if gone > 0 {
                vdebug!(gone, "prepend: known rows vanished before the start");
                let h = (gone as u64).saturating_mul(height as u64);
                self.padding.shrink(Edge::Top, h);
                self.scroll_top = self.scroll_top.saturating_sub(h);
                self.range.min = self.rows.first();
            }
            self.range.bof = true;
        }
    }
}
