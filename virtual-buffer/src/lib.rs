//! A headless buffer/padding reconciliation engine for virtual scrolling.
//!
//! For a datasource-driven facade, see the `virtual-buffer-adapter` crate.
//!
//! Given a viewport and a data source exposing an indexed (possibly unbounded) sequence of
//! items, this crate keeps only the rows near the visible area rendered, and represents the
//! rest as two spacer heights (top and bottom padding). It keeps the scroll position, the
//! paddings and the rendered rows consistent while the user scrolls and while the data set is
//! changed out-of-band (rows removed, replaced or inserted by index or by predicate).
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to:
//! - report viewport height and scroll position
//! - resolve [`FetchRequest`]s against its data source
//! - size two spacer elements from [`ScrollBuffer::padding`] and render [`ScrollBuffer::rows`]
//!
//! All rows share one configured height.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod buffer;
mod error;
mod options;
mod padding;
mod range;
mod row_buffer;
mod state;
mod types;
mod update;
mod window;

#[cfg(test)]
mod tests;

pub use buffer::ScrollBuffer;
pub use error::InvalidUpdateError;
pub use options::BufferOptions;
pub use padding::Padding;
pub use range::LogicalRange;
pub use row_buffer::RowBuffer;
pub use state::BufferSnapshot;
pub use types::{DiscardReason, Edge, FetchOutcome, FetchRequest, Row, ScrollAnchor};
pub use update::{Update, UpdatePredicate};
