//! Local filesystem storage backend.
//!
//! Files are accessed relative to a configured root directory using
//! `tokio::fs` for async I/O.

use crate::backend::FileInfoStream;
use crate::error::ErrorKind;
use crate::{FileInfo, StorageBackend, error::Result, path::validate as validate_path};
use async_stream::stream;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, DirEntry};

/// Local filesystem storage backend.
///
/// All paths are relative to the root directory, which must already exist.
///
/// # Examples
///
/// ```no_run
/// use ihist_storage::backend::LocalBackend;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = LocalBackend::new("headers", "/path/to/headers")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct LocalBackend {
    name: String,
    /// Root directory of the header corpus
    root: PathBuf,
}
impl LocalBackend {
    /// Create a new local filesystem backend.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if the root is not an
    /// absolute path, and [`NotFound`](ErrorKind::NotFound) if it isn't an
    /// existing directory. The root is never created: a missing input
    /// directory is almost certainly a typo.
    pub fn new(name: impl Into<String>, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        if !root.is_dir() {
            exn::bail!(ErrorKind::NotFound(root));
        }
        Ok(Self { name: name.into(), root })
    }

    /// Get the absolute path for a relative storage path.
    fn absolute_path(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let validated = validate_path(path.as_ref())?;
        Ok(self.root.join(validated))
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }

    /// Turns a directory entry into a listing result, or `None` if it isn't
    /// a regular file. Symlinks are followed; broken ones are dropped.
    async fn process_entry(entry: DirEntry, relative_dir: &Path) -> Result<Option<FileInfo>> {
        let path = entry.path();
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => exn::bail!(Self::map_io_error(err, &path)),
        };
        if !metadata.is_file() {
            return Ok(None);
        }
        Ok(Some(FileInfo::new(relative_dir.join(entry.file_name()), metadata.len())))
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_stream<'a>(&'a self, directory: Option<&'a Path>) -> FileInfoStream<'a> {
        let relative_dir = match directory.map(validate_path).transpose() {
            Ok(dir) => dir.unwrap_or_default(),
            Err(e) => return Box::pin(futures::stream::once(async { Result::Err(e) })),
        };
        Box::pin(stream! {
            let absolute_dir = self.root.join(&relative_dir);
            let mut entries = match fs::read_dir(&absolute_dir).await {
                Ok(entries) => entries,
                // Listing a directory that doesn't exist is an empty list, not an error.
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return,
                Err(err) => {
                    yield Err(exn::Exn::from(Self::map_io_error(err, &absolute_dir)));
                    return;
                }
            };
            loop {
                let entry = match entries.next_entry().await {
                    Ok(Some(entry)) => entry,
                    Ok(None) => break,
                    Err(e) => { yield Err(exn::Exn::from(Self::map_io_error(e, &absolute_dir))); continue; },
                };
                match Self::process_entry(entry, &relative_dir).await {
                    Ok(Some(info)) => yield Ok(info),
                    Ok(None) => {},
                    Err(e) => yield Err(e),
                }
            }
        })
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::try_exists(&abs_path).await.map_err(ErrorKind::Io)?)
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let abs_path = self.absolute_path(path)?;
        Ok(fs::read(&abs_path).await.map_err(|e| Self::map_io_error(e, path))?)
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let abs_path = self.absolute_path(path)?;
        if let Some(parent) = abs_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| Self::map_io_error(e, path))?;
        }
        Ok(fs::write(&abs_path, data).await.map_err(|e| Self::map_io_error(e, path))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(dir: &tempfile::TempDir) -> LocalBackend {
        LocalBackend::new("headers", dir.path()).unwrap()
    }

    #[test]
    fn test_new_requires_absolute_existing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(LocalBackend::new("headers", temp_dir.path()).is_ok());
        assert!(LocalBackend::new("headers", "relative/path").is_err());
        let missing = temp_dir.path().join("missing");
        let err = LocalBackend::new("headers", &missing).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        // The root was not created as a side effect.
        assert!(!missing.exists());
    }

    #[test]
    fn test_new_rejects_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("2021.1.0a3.h");
        std::fs::write(&file, "").unwrap();
        assert!(LocalBackend::new("headers", &file).is_err());
    }

    #[test]
    fn test_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        let expected = temp_dir.path().join("PerVersionParsed/FieldInfo/2019.4.0o0.h");
        assert_eq!(backend.absolute_path(Path::new("PerVersionParsed/FieldInfo/2019.4.0o0.h")).unwrap(), expected);
        assert!(backend.absolute_path(Path::new("../etc/passwd")).is_err());
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        let data = b"typedef struct Foo\n{ int a; }";
        backend.write(Path::new("2021.1.0a3.h"), data).await.unwrap();
        assert_eq!(backend.read(Path::new("2021.1.0a3.h")).await.unwrap(), data);
    }

    #[tokio::test]
    async fn test_write_creates_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        let path = Path::new("PerVersionParsed/MethodInfo/2020.1.0f1.h");
        backend.write(path, b"").await.unwrap();
        assert!(backend.exists(path).await.unwrap());
        assert_eq!(backend.read(path).await.unwrap(), b"");
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        backend.write(Path::new("file.h"), b"first").await.unwrap();
        backend.write(Path::new("file.h"), b"second").await.unwrap();
        assert_eq!(backend.read(Path::new("file.h")).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = backend(&temp_dir).read(Path::new("missing.h")).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_is_top_level_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        backend.write(Path::new("2019.4.0f1.h"), b"a").await.unwrap();
        backend.write(Path::new("2020.1.0a1.h"), b"bb").await.unwrap();
        backend.write(Path::new("PerVersionParsed/FieldInfo/2019.4.0f1.h"), b"c").await.unwrap();
        let mut files = backend.list(None).await.unwrap();
        files.sort_by(|a, b| a.path.cmp(&b.path));
        assert_eq!(files, vec![FileInfo::new("2019.4.0f1.h", 1), FileInfo::new("2020.1.0a1.h", 2)]);
    }

    #[tokio::test]
    async fn test_list_subdirectory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        backend.write(Path::new("PerVersionParsed/FieldInfo/2019.4.0f1.h"), b"c").await.unwrap();
        backend.write(Path::new("2019.4.0f1.h"), b"a").await.unwrap();
        let files = backend.list(Some(Path::new("PerVersionParsed/FieldInfo"))).await.unwrap();
        assert_eq!(files, vec![FileInfo::new("PerVersionParsed/FieldInfo/2019.4.0f1.h", 1)]);
    }

    #[tokio::test]
    async fn test_list_empty_and_missing_directories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        assert!(backend.list(None).await.unwrap().is_empty());
        assert!(backend.list(Some(Path::new("nonexistent"))).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_security() {
        let temp_dir = tempfile::tempdir().unwrap();
        let backend = backend(&temp_dir);
        assert!(backend.read(Path::new("../etc/passwd")).await.is_err());
        assert!(backend.write(Path::new("../escape.h"), b"data").await.is_err());
        assert!(backend.list(Some(Path::new("../.."))).await.is_err());
    }
}
