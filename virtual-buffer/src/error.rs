use core::fmt;

/// A malformed update descriptor. Nothing was mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidUpdateError {
    /// Updates address non-negative indexes only.
    NegativeIndex(i64),
    /// Splicing `len` items at `index` would overflow the index space.
    IndexOverflow { index: i64, len: usize },
}

impl fmt::Display for InvalidUpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeIndex(index) => {
                write!(f, "applyUpdates: {index} is not a valid index")
            }
            Self::IndexOverflow { index, len } => {
                write!(
                    f,
                    "applyUpdates: replacing index {index} with {len} items overflows the index space"
                )
            }
        }
    }
}

impl core::error::Error for InvalidUpdateError {}
