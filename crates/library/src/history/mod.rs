pub(crate) mod error;
mod file;
mod stream;

pub use self::file::{PersistedSnapshot, StructureReport, persist_structure, snapshot_path};
pub use self::stream::{HistoryEvent, Summary, history, run};
