use crate::Edge;

/// Lowest usable index. `i64::MIN` is kept free so that "one before the first row" always
/// exists.
pub(crate) const LOWEST_INDEX: i64 = i64::MIN + 1;

/// Inclusive bounds of the indexes known to exist in the data source.
///
/// `min > max` denotes an empty range. An edge stays open until the data source reports a
/// short page (or the host provides a hint), at which point `bof`/`eof` closes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogicalRange {
    pub min: i64,
    pub max: i64,
    /// No data exists before `min`.
    pub bof: bool,
    /// No data exists after `max`.
    pub eof: bool,
}

impl LogicalRange {
    /// An empty, open range positioned so that the first discovered row is `start`.
    ///
    /// `i64::MIN` is raised to `i64::MIN + 1`.
    pub fn empty_at(start: i64) -> Self {
        let start = start.max(LOWEST_INDEX);
        Self {
            min: start,
            max: start - 1,
            bof: false,
            eof: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.max.abs_diff(self.min) + 1
        }
    }

    pub fn contains(&self, index: i64) -> bool {
        self.min <= index && index <= self.max
    }

    pub fn is_closed(&self, edge: Edge) -> bool {
        match edge {
            Edge::Top => self.bof,
            Edge::Bottom => self.eof,
        }
    }

    /// `true` when both edges are closed, i.e. `len()` is the real row count.
    pub fn is_fully_known(&self) -> bool {
        self.bof && self.eof
    }
}
