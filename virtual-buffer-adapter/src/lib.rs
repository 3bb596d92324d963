//! Datasource-driven adapter for the `virtual-buffer` crate.
//!
//! The `virtual-buffer` crate is UI-agnostic and only plans fetches; it never calls a data
//! source itself. This crate provides the pieces most hosts need on top of it:
//!
//! - A [`Datasource`] trait (`get(from, count)` plus optional index hints)
//! - An in-memory [`MemoryDatasource`] for demos and tests
//! - An [`Adapter`] facade that resolves fetches synchronously after every event and update
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod datasource;


pub use adapter::Adapter;
pub use datasource::{Datasource, MemoryDatasource};
