//! Header-filtered storage backend decorator.
//!
//! Wraps another backend and restricts all operations to C header files
//! (`.h` extension, case-insensitive).

use crate::backend::FileInfoStream;
use crate::error::ErrorKind;
use crate::{BackendHandle, StorageBackend, error::Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::Path;

const HEADER_EXTENSION: &str = "h";

/// Check if a path's final extension is `.h`.
///
/// - `2021.1.0a3.h` -> true
/// - `2021.1.0a3.H` -> true
/// - `2021.1.0a3.hpp` -> false
/// - `2021.1.0a3.h.bak` -> false
fn is_header_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(HEADER_EXTENSION))
}

/// Header-filtered storage backend.
///
/// Listings silently omit non-header files; every other operation on a
/// non-header path fails with [`FilteredPath`](ErrorKind::FilteredPath).
#[derive(Clone)]
pub struct HeaderOnlyBackend {
    inner: BackendHandle,
}
impl HeaderOnlyBackend {
    pub fn new(inner: BackendHandle) -> Self {
        Self { inner }
    }

    fn check(path: &Path) -> Result<()> {
        if !is_header_path(path) {
            exn::bail!(ErrorKind::FilteredPath(path.to_path_buf()));
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for HeaderOnlyBackend {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn list_stream<'a>(&'a self, directory: Option<&'a Path>) -> FileInfoStream<'a> {
        Box::pin(self.inner.list_stream(directory).filter(|item| {
            std::future::ready(match item {
                Ok(info) => is_header_path(&info.path),
                Err(_) => true, // propagate errors
            })
        }))
    }

    async fn exists(&self, path: &Path) -> Result<bool> {
        Self::check(path)?;
        self.inner.exists(path).await
    }

    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Self::check(path)?;
        self.inner.read(path).await
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        Self::check(path)?;
        self.inner.write(path, data).await
    }
}
