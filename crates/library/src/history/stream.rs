use crate::Context;
use crate::error::Result as LibraryResult;
use crate::history::file::{StructureReport, persist_structure};
use crate::load::load_records;
use async_stream::stream;
use futures::stream::FuturesUnordered;
use futures::{Stream, StreamExt};
use ihist_storage::BackendHandle;

/// Progress events emitted by [`history`].
///
/// Events follow a strict ordering:
/// 1. [`Started`](Self::Started), exactly once.
/// 2. [`Loaded`](Self::Loaded), exactly once, with the number of headers
///    loaded.
/// 3. [`Structure`](Self::Structure), once per struct, in completion order.
/// 4. [`Complete`](Self::Complete), exactly once.
///
/// A load failure terminates the stream early, in which case
/// [`Complete`](Self::Complete) is never emitted.
#[derive(Debug)]
pub enum HistoryEvent {
    /// Processing has begun; emitted exactly once before any other event.
    Started,
    /// All headers have been read and sorted.
    Loaded(u64),
    /// One struct's history has been built and written.
    Structure(StructureReport),
    /// Every struct has been processed; the stream is finished.
    Complete,
}

/// Streams [`HistoryEvent`]s while building the history of every struct
/// named in `ctx`.
///
/// All headers are loaded and sorted before any timeline is built. The
/// structs are then processed concurrently, up to `ctx.concurrency` at a
/// time, over the same immutable records; each struct writes to its own
/// directory, so they never contend. A failure to persist one struct is
/// surfaced as an `Err` item without terminating the stream; only a load
/// failure ends it early.
pub fn history<'a>(backend: &'a BackendHandle, ctx: &'a Context) -> impl Stream<Item = LibraryResult<HistoryEvent>> + 'a {
    // `rustfmt` does not format macros that use braces. Wrap in parentheses!
    stream!({
        yield Ok(HistoryEvent::Started);

        let records = match load_records(backend, ctx).await {
            Ok(records) => records,
            Err(e) => {
                yield Err(e);
                return;
            },
        };
        yield Ok(HistoryEvent::Loaded(u64::try_from(records.len()).unwrap_or(u64::MAX)));

        let mut pending: Vec<_> =
            ctx.struct_names.iter().map(|structure| persist_structure(backend, &records, structure)).collect();
        let initial = ctx.concurrency.max(1).min(pending.len());
        let mut processing: FuturesUnordered<_> = pending.drain(..initial).collect();
        while let Some(result) = processing.next().await {
            yield result.map(HistoryEvent::Structure);
            // Pop-n-push, but FIFO instead of LIFO.
            if !pending.is_empty() {
                processing.push(pending.remove(0));
            }
        }

        yield Ok(HistoryEvent::Complete);
    })
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of headers loaded.
    pub records: u64,
    /// One report per struct, in the order the structs were configured.
    pub structures: Vec<StructureReport>,
}
impl Summary {
    /// Total number of snapshot files written across all structs.
    pub fn written(&self) -> usize {
        self.structures.iter().map(|report| report.snapshots.len()).sum()
    }
}

/// Runs [`history`] to completion.
///
/// Unlike the stream, this stops at the first error of any kind.
pub async fn run(backend: &BackendHandle, ctx: &Context) -> LibraryResult<Summary> {
    let mut summary = Summary::default();
    let mut events = std::pin::pin!(history(backend, ctx));
    while let Some(event) = events.next().await {
        match event? {
            HistoryEvent::Loaded(count) => summary.records = count,
            HistoryEvent::Structure(report) => summary.structures.push(report),
            HistoryEvent::Started | HistoryEvent::Complete => {},
        }
    }
    summary
        .structures
        .sort_by_key(|report| ctx.struct_names.iter().position(|name| *name == report.structure));
    Ok(summary)
}
