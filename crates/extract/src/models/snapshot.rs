use super::VersionKey;

/// The extracted definition of one struct at one release.
///
/// An empty `text` means the struct wasn't found in that release's header.
/// Snapshots borrow from the [`RawFileRecord`](super::RawFileRecord) they
/// were extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSnapshot<'a> {
    pub version: &'a VersionKey,
    pub text: &'a str,
}
impl<'a> StructSnapshot<'a> {
    pub fn new(version: &'a VersionKey, text: &'a str) -> Self {
        Self { version, text }
    }

    /// Returns `true` if the struct was absent from this release.
    pub fn is_absent(&self) -> bool {
        self.text.is_empty()
    }
}
