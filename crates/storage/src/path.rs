//! Path validation.
//!
//! Every path handed to a backend is relative to the backend's root. Output
//! paths are built from struct names and version tokens, so they are checked
//! here before anything touches the disk.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates and normalizes a storage path.
///
/// Current-directory components and repeated or trailing separators are
/// dropped, and `..` is resolved lexically. A path that would leave the
/// storage root, contains a null byte, carries a Windows prefix, or
/// normalizes to nothing is rejected with
/// [`InvalidPath`](crate::error::ErrorKind::InvalidPath).
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ihist_storage::validate_path;
///
/// assert!(validate_path("2021.1.0a3.h").is_ok());
/// assert!(validate_path("PerVersionParsed/Il2CppClass/2021.1.0a3.h").is_ok());
/// assert!(validate_path("../2021.1.0a3.h").is_err());
/// assert!(validate_path("a\0b.h").is_err());
/// assert_eq!(
///     validate_path("./PerVersionParsed//MethodInfo/../FieldInfo/2019.4.0o0.h").unwrap(),
///     Path::new("PerVersionParsed/FieldInfo/2019.4.0o0.h")
/// );
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(path.to_path_buf());
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => {
                // Null bytes pass through Path::components() on Unix but
                // truncate paths in C-based syscalls.
                if s.as_encoded_bytes().contains(&0) {
                    exn::bail!(invalid());
                }
                components.push(s)
            },
            Component::CurDir | Component::RootDir => {},
            Component::Prefix(_) => exn::bail!(invalid()),
            Component::ParentDir => {
                if components.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
        }
    }
    if components.is_empty() {
        exn::bail!(invalid());
    }
    Ok(components.into_iter().collect())
}
