use crate::OUTPUT_DIRECTORY;
use crate::error::{ErrorKind as LibraryErrorKind, Result as LibraryResult};
use crate::history::error::{ErrorKind, Result as HistoryResult};
use exn::ResultExt;
use ihist_extract::build_timeline;
use ihist_extract::models::{RawFileRecord, VersionKey};
use ihist_storage::BackendHandle;
use std::path::PathBuf;
use tracing::instrument;

/// A snapshot that has been written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSnapshot {
    pub version: VersionKey,
    /// Path relative to the storage root.
    pub path: PathBuf,
    /// The struct wasn't defined at this version; an empty file was written.
    pub absent: bool,
}

/// The outcome of building and persisting one struct's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureReport {
    pub structure: String,
    /// Number of headers the struct was extracted from.
    pub examined: u64,
    /// Snapshots written, in ascending version order.
    pub snapshots: Vec<PersistedSnapshot>,
}

/// Where the snapshot of `structure` at `version` is stored, relative to the
/// storage root: `PerVersionParsed/<structure>/<version>.h`.
///
/// # Examples
///
/// ```rust
/// use ihist_library::snapshot_path;
/// use std::path::Path;
///
/// let version = "2021.1.0a3".parse().unwrap();
/// assert_eq!(snapshot_path("Il2CppClass", &version), Path::new("PerVersionParsed/Il2CppClass/2021.1.0a3.h"));
/// ```
pub fn snapshot_path(structure: &str, version: &VersionKey) -> PathBuf {
    [OUTPUT_DIRECTORY, structure, &format!("{version}.h")].iter().collect()
}

/// Builds the timeline of `structure` over `records` (which must be sorted
/// by version) and writes every kept snapshot to storage.
///
/// Writes overwrite whatever is already there. Nothing is rolled back if a
/// write fails part way through; rerunning produces identical files.
pub async fn persist_structure(
    backend: &BackendHandle,
    records: &[RawFileRecord],
    structure: &str,
) -> LibraryResult<StructureReport> {
    persist_structure_inner(backend, records, structure).await.or_raise(|| LibraryErrorKind::History)
}

#[instrument(skip(backend, records), fields(records = records.len()))]
pub(crate) async fn persist_structure_inner(
    backend: &BackendHandle,
    records: &[RawFileRecord],
    structure: &str,
) -> HistoryResult<StructureReport> {
    let mut snapshots = Vec::new();
    for snapshot in build_timeline(records, structure) {
        let path = snapshot_path(structure, snapshot.version);
        backend.write(&path, snapshot.text.as_bytes()).await.or_raise(|| ErrorKind::Storage {
            structure: structure.to_string(),
            version: snapshot.version.to_string(),
        })?;
        tracing::debug!(version = %snapshot.version, path = %path.display(), bytes = snapshot.text.len(), "Wrote snapshot");
        snapshots.push(PersistedSnapshot {
            version: snapshot.version.clone(),
            path,
            absent: snapshot.is_absent(),
        });
    }
    tracing::info!(kept = snapshots.len(), "Built struct history");
    Ok(StructureReport {
        structure: structure.to_string(),
        examined: u64::try_from(records.len()).unwrap_or(u64::MAX),
        snapshots,
    })
}
