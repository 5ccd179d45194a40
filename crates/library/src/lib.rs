//! Builds and persists the change history of a fixed set of structs across
//! a directory of versioned C headers.
//!
//! The flow is strictly one way:
//!
//! 1. [`load_records`](load::load_records) lists the top-level headers, turns
//!    each filename into a [`VersionKey`](ihist_extract::models::VersionKey),
//!    reads the contents and sorts everything by version.
//! 2. [`history`](history::history) builds one timeline per struct over
//!    the shared records and writes each kept snapshot to
//!    `PerVersionParsed/<struct>/<version>.h`.

mod context;
pub mod error;
pub mod history;
pub mod load;

pub use crate::context::{Context, MalformedPolicy};
pub use crate::history::{HistoryEvent, PersistedSnapshot, StructureReport, Summary, history, run, snapshot_path};
pub use crate::load::load_records;

/// The structs whose history is tracked.
pub const STRUCT_NAMES: &[&str] = &[
    "MethodInfo",
    "Il2CppClass",
    "Il2CppType",
    "ParameterInfo",
    "Il2CppImage",
    "Il2CppAssembly",
    "FieldInfo",
    "EventInfo",
    "PropertyInfo",
    "VirtualInvokeData",
    "Il2CppAssemblyName",
];

/// Directory, relative to the input root, that snapshots are written under.
pub const OUTPUT_DIRECTORY: &str = "PerVersionParsed";

/// Upper bound on the number of structs processed at the same time.
pub const MAX_PROCESS_CONCURRENCY: usize = 16;
