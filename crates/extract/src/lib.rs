//! Version key parsing, struct extraction and change timelines for
//! versioned C headers.
//!
//! The three pieces compose into a pipeline:
//!
//! 1. [`VersionKey`](models::VersionKey) turns a header's filename into a
//!    totally ordered release identity, so the corpus can be sorted.
//! 2. [`find_struct`]/[`extract`] pull a single struct definition out of a
//!    header by brace-balanced scanning.
//! 3. [`build_timeline`] walks the sorted headers and keeps only the
//!    releases where a struct's definition changed.
//!
//! Everything here is pure: no I/O, no shared state.

mod compare;
mod consts;
pub mod error;
mod extract;
pub mod models;
mod timeline;

pub use crate::consts::DEFAULT_DESIGNATOR;
pub use crate::extract::{extract, find_struct};
pub use crate::timeline::{StructHistory, Timeline, build_timeline};
