pub(crate) mod error;

use crate::Context;
use crate::MalformedPolicy;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::load::error::{ErrorKind, Result as LoadResult};
use exn::ResultExt;
use ihist_extract::models::{RawFileRecord, VersionKey};
use ihist_storage::BackendHandle;
use tracing::instrument;

/// Reads every file the backend lists at its root into a [`RawFileRecord`],
/// sorted ascending by [`VersionKey`].
///
/// Listing is not recursive, so previous output under
/// [`OUTPUT_DIRECTORY`](crate::OUTPUT_DIRECTORY) is never read back in. Wrap
/// the backend in a [`HeaderOnlyBackend`](ihist_storage::backend::HeaderOnlyBackend)
/// to ignore anything that isn't a `.h` file.
///
/// Contents are decoded as UTF-8; invalid byte sequences are replaced with
/// U+FFFD rather than rejected. Sorting is stable and the listing is ordered
/// by path first, so headers sharing a version always load in the same order.
///
/// A filename that isn't a valid version token either aborts the load or is
/// skipped with a warning, depending on [`Context::on_malformed`].
pub async fn load_records(backend: &BackendHandle, ctx: &Context) -> LibraryResult<Vec<RawFileRecord>> {
    load_records_inner(backend, ctx).await.or_raise(|| LibraryErrorKind::Load)
}

#[instrument(skip_all, fields(backend = backend.name()))]
pub(crate) async fn load_records_inner(backend: &BackendHandle, ctx: &Context) -> LoadResult<Vec<RawFileRecord>> {
    let mut files = backend.list(None).await.or_raise(|| ErrorKind::Storage)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    let mut records = Vec::with_capacity(files.len());
    for file in files {
        let version = match VersionKey::from_path(&file.path) {
            Ok(version) => version,
            Err(err) if ctx.on_malformed == MalformedPolicy::Skip => {
                tracing::warn!(path = %file.path.display(), error = ?err, "Skipping header with malformed version token");
                continue;
            },
            Err(err) => return Err(err).or_raise(|| ErrorKind::Version(file.path.clone())),
        };
        let bytes = backend.read(&file.path).await.or_raise(|| ErrorKind::Storage)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(path = %file.path.display(), %version, size = bytes.len(), "Loaded header");
        records.push(RawFileRecord::new(version, file.path, text));
    }
    records.sort_by(|a, b| a.version.cmp(&b.version));
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => {
            tracing::info!(count = records.len(), first = %first.version, last = %last.version, "Loaded headers")
        },
        _ => tracing::warn!("No headers found"),
    }
    Ok(records)
}
