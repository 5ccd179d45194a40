//! Binary Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No headers directory was given on the command line.
    #[display("Usage: ihist <path to headers directory>")]
    MissingPath,
    /// Clap rejected the command line; holds its rendered message.
    #[display("{_0}")]
    InvalidArguments(#[error(not(source))] String),
    #[display("Directory at '{}' does not exist", _0.display())]
    NotADirectory(#[error(not(source))] PathBuf),
    #[display("failed to open headers directory")]
    Storage,
    #[display("failed to build struct histories")]
    Run,
}

impl ErrorKind {
    /// Usage errors are reported on stdout without any log noise.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingPath | Self::InvalidArguments(_) | Self::NotADirectory(_))
    }
}
