//! Storage models.

use std::path::{Path, PathBuf};

/// File metadata returned by storage backends when listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Relative path from storage root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}
impl FileInfo {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self { path: path.into(), size }
    }
}
impl AsRef<Path> for FileInfo {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_ref_path() {
        let info = FileInfo::new("2021.1.0a3.h", 10);
        let path: &Path = info.as_ref();
        assert_eq!(path, Path::new("2021.1.0a3.h"));
        assert_eq!(info.size, 10);
    }
}
