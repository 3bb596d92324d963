use crate::{LogicalRange, Padding};

/// A lightweight, serializable snapshot of the buffer geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferSnapshot {
    pub range: LogicalRange,
    pub padding: Padding,
    pub scroll_top: u64,
    pub viewport_height: u32,
    /// Index of the first rendered row (the insertion point when nothing is rendered).
    pub first: i64,
    pub rendered: usize,
    pub rendered_height: u64,
}

impl BufferSnapshot {
    pub fn total_height(&self) -> u64 {
        self.padding.total().saturating_add(self.rendered_height)
    }

    /// Index of the last rendered row, or `first - 1` when nothing is rendered.
    pub fn last(&self) -> i64 {
        self.first + (self.rendered as i64 - 1)
    }
}
