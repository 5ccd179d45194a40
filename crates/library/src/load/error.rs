//! Error types for the [`load`](super) module.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A load error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for load operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Listing the input directory or reading a header failed.
    Storage,
    /// A header's filename isn't a valid version token.
    #[display("cannot determine version of header: {}", _0.display())]
    Version(#[error(not(source))] PathBuf),
}

