mod record;
mod snapshot;
mod version;

pub use self::record::RawFileRecord;
pub use self::snapshot::StructSnapshot;
pub use self::version::{NumericVersion, VersionKey};
