use crate::{MAX_PROCESS_CONCURRENCY, STRUCT_NAMES};

/// What to do with a header whose filename isn't a valid version token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Fail the whole run. A corpus with a stray file is more likely to be
    /// the wrong directory than a directory with one bad file.
    #[default]
    Abort,
    /// Log a warning and leave the file out.
    Skip,
}

/// Settings shared by every stage of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Structs to build a history for, in processing order.
    pub struct_names: Vec<String>,
    pub on_malformed: MalformedPolicy,
    /// Maximum number of structs processed concurrently; values below one
    /// are treated as one.
    pub concurrency: usize,
}
impl Context {
    pub fn new(struct_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            struct_names: struct_names.into_iter().map(Into::into).collect(),
            on_malformed: MalformedPolicy::default(),
            concurrency: MAX_PROCESS_CONCURRENCY,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}
impl Default for Context {
    fn default() -> Self {
        Self::new(STRUCT_NAMES.iter().copied())
    }
}
