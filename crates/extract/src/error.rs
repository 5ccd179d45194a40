//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A filename does not carry a parseable version token.
    #[display("malformed version token: {_0}")]
    MalformedVersionToken(#[error(not(source))] String),
    /// A struct definition was found, but its braces never balance before
    /// the end of the header.
    #[display("unbalanced definition of struct '{structure}' starting at byte {offset}")]
    MalformedHeaderStruct {
        /// Name of the struct being extracted.
        structure: String,
        /// Byte offset of the `typedef struct` match.
        offset: usize,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Headers and filenames are either well-formed or they're not.
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::MalformedVersionToken("2021.x".to_string()).to_string(),
            "malformed version token: 2021.x"
        );
        assert_eq!(
            ErrorKind::MalformedHeaderStruct { structure: "Il2CppClass".to_string(), offset: 42 }.to_string(),
            "unbalanced definition of struct 'Il2CppClass' starting at byte 42"
        );
    }

    #[test]
    fn error_kind_never_retryable() {
        assert!(!ErrorKind::MalformedVersionToken(String::new()).is_retryable());
        assert!(!ErrorKind::MalformedHeaderStruct { structure: String::new(), offset: 0 }.is_retryable());
    }
}
