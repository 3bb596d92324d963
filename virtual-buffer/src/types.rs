/// One side of the row buffer.
///
/// `Top` is the head (lower indexes), `Bottom` is the tail (higher indexes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
}

/// A rendered row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row<T> {
    pub index: i64,
    pub item: T,
    /// Size in the scroll axis.
    pub height: u32,
}

/// The row under the viewport's leading edge, plus how far into that row the viewport starts.
///
/// Anchors are captured before a structural mutation and re-applied afterwards so the
/// content under the user's eye does not jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor {
    pub index: i64,
    pub offset_in_row: u64,
}

/// A page request issued by the window controller.
///
/// The host resolves it against its data source (synchronously or not) and hands the items
/// back through [`crate::ScrollBuffer::complete_fetch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest {
    pub edge: Edge,
    /// First requested index.
    pub from: i64,
    pub count: usize,
    pub generation: u64,
}

impl FetchRequest {
    /// One past the last requested index.
    pub fn end(&self) -> i64 {
        self.from.saturating_add(self.count as i64)
    }
}

/// Why a completed fetch was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiscardReason {
    /// An update or reposition happened after the request was issued.
    StaleGeneration,
    /// The buffer edge moved away from the requested indexes.
    EdgeMoved,
    /// No request was outstanding for that edge.
    NotPending,
}

/// Result of [`crate::ScrollBuffer::complete_fetch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The fetched rows were added to the buffer.
    Applied {
        rows: usize,
        /// `true` when the page was short and the edge is now closed.
        closed_edge: bool,
    },
    Discarded(DiscardReason),
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
