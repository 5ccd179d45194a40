use super::VersionKey;
use std::path::PathBuf;

/// The full text of one header file, paired with the release it describes.
///
/// One record exists per discovered input file. Records are sorted by
/// [`VersionKey`] once at load time and never mutated afterwards; every
/// [`StructSnapshot`](super::StructSnapshot) borrows from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileRecord {
    pub version: VersionKey,
    /// Where the header was read from, kept for diagnostics only.
    pub path: PathBuf,
    pub text: String,
}
impl RawFileRecord {
    pub fn new(version: VersionKey, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            version,
            path: path.into(),
            text: text.into(),
        }
    }
}
impl AsRef<RawFileRecord> for RawFileRecord {
    fn as_ref(&self) -> &RawFileRecord {
        self
    }
}
