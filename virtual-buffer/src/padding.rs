use crate::Edge;

/// Heights of the two spacer regions around the rendered rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub top: u64,
    pub bottom: u64,
}

impl Padding {
    pub fn total(&self) -> u64 {
        self.top.saturating_add(self.bottom)
    }
}

/// Owns the padding sizes. Only the engine mutates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PaddingTracker {
    padding: Padding,
}

impl PaddingTracker {
    pub(crate) fn padding(&self) -> Padding {
        self.padding
    }

    pub(crate) fn top(&self) -> u64 {
        self.padding.top
    }

    pub(crate) fn bottom(&self) -> u64 {
        self.padding.bottom
    }

    fn slot(&mut self, edge: Edge) -> &mut u64 {
        match edge {
            Edge::Top => &mut self.padding.top,
            Edge::Bottom => &mut self.padding.bottom,
        }
    }

    pub(crate) fn grow(&mut self, edge: Edge, amount: u64) {
        let slot = self.slot(edge);
        *slot = slot.saturating_add(amount);
    }

    /// Shrinks one side; going below zero is a bookkeeping bug and clamps to zero.
    pub(crate) fn shrink(&mut self, edge: Edge, amount: u64) {
        let slot = self.slot(edge);
        if amount > *slot {
            vwarn!(
                ?edge,
                current = *slot,
                amount,
                "PaddingTracker: shrink below zero, clamping"
            );
            debug_assert!(
                amount <= *slot,
                "PaddingTracker: shrink below zero (edge={edge:?}, current={}, amount={amount})",
                *slot
            );
        }
        *slot = slot.saturating_sub(amount);
    }

    pub(crate) fn reset(&mut self, top: u64, bottom: u64) {
        self.padding = Padding { top, bottom };
    }
}
