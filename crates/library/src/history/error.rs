//! Error types for the [`history`](super) module.

use derive_more::{Display, Error};

/// A history error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for history operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// Writing a snapshot to the storage backend failed.
    #[display("failed to write snapshot of {structure} at {version}")]
    Storage {
        structure: String,
        version: String,
    },
}

