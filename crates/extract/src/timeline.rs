//! Per-struct change timelines.

use crate::extract::extract;
use crate::models::{RawFileRecord, StructSnapshot, VersionKey};
use std::iter::FusedIterator;

/// Lazily walks header records in version order, yielding only the
/// snapshots where a struct's definition changed.
///
/// The first record is always yielded, whatever its text. Every later record
/// is yielded only if its extracted text differs from the most recently
/// *yielded* snapshot, so a definition that changes and later reverts
/// (`A, B, A`) is yielded three times, but runs of identical text collapse
/// into their first occurrence.
///
/// Created by [`build_timeline`].
#[derive(Debug, Clone)]
pub struct Timeline<'a, 'n> {
    records: std::slice::Iter<'a, RawFileRecord>,
    structure: &'n str,
    previous: Option<&'a str>,
}
impl<'a, 'n> Timeline<'a, 'n> {
    /// Consumes the rest of the timeline into a [`StructHistory`].
    pub fn collect_history(self) -> StructHistory<'a> {
        self.collect()
    }
}
impl<'a> Iterator for Timeline<'a, '_> {
    type Item = StructSnapshot<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for record in self.records.by_ref() {
            let text = extract(&record.text, self.structure);
            if self.previous == Some(text) {
                continue;
            }
            self.previous = Some(text);
            return Some(StructSnapshot::new(&record.version, text));
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len();
        match self.previous {
            // The first record is always kept.
            None if remaining > 0 => (1, Some(remaining)),
            _ => (0, Some(remaining)),
        }
    }
}
impl FusedIterator for Timeline<'_, '_> {}

/// Builds the change timeline of `structure` across `records`.
///
/// `records` must already be sorted ascending by [`VersionKey`]; records that
/// share a key are not merged, each is extracted and compared on its own.
/// An empty slice produces an empty timeline.
///
/// # Examples
///
/// ```rust
/// use ihist_extract::build_timeline;
/// use ihist_extract::models::RawFileRecord;
///
/// let header = |body: &str| format!("typedef struct Foo\n{{ {body} }}");
/// let records = vec![
///     RawFileRecord::new("2020.1.0".parse().unwrap(), "2020.1.0.h", header("int a;")),
///     RawFileRecord::new("2020.2.0".parse().unwrap(), "2020.2.0.h", header("int a;")),
///     RawFileRecord::new("2021.1.0".parse().unwrap(), "2021.1.0.h", header("long a;")),
/// ];
/// let kept: Vec<String> = build_timeline(&records, "Foo").map(|s| s.version.to_string()).collect();
/// assert_eq!(kept, ["2020.1.0o0", "2021.1.0o0"]);
/// ```
pub fn build_timeline<'a, 'n>(records: &'a [RawFileRecord], structure: &'n str) -> Timeline<'a, 'n> {
    debug_assert!(records.windows(2).all(|pair| pair[0].version <= pair[1].version), "records must be sorted");
    Timeline {
        records: records.iter(),
        structure,
        previous: None,
    }
}

/// A materialized timeline.
///
/// Answers the question downstream consumers of the persisted snapshots
/// ask: what did the struct look like at a given release?
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructHistory<'a> {
    snapshots: Vec<StructSnapshot<'a>>,
}
impl<'a> StructHistory<'a> {
    /// Returns the snapshot in effect at `version`: the kept snapshot with
    /// the greatest version that is less than or equal to it.
    ///
    /// Returns `None` for versions older than the first snapshot. If several
    /// snapshots share the matching version, the last one wins.
    pub fn snapshot_at(&self, version: &VersionKey) -> Option<&StructSnapshot<'a>> {
        let index = self.snapshots.partition_point(|snapshot| snapshot.version <= version);
        index.checked_sub(1).map(|i| &self.snapshots[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StructSnapshot<'a>> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
impl<'a> FromIterator<StructSnapshot<'a>> for StructHistory<'a> {
    fn from_iter<I: IntoIterator<Item = StructSnapshot<'a>>>(iter: I) -> Self {
        Self { snapshots: iter.into_iter().collect() }
    }
}
impl<'a> IntoIterator for StructHistory<'a> {
    type Item = StructSnapshot<'a>;
    type IntoIter = std::vec::IntoIter<StructSnapshot<'a>>;
    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}
impl<'h, 'a> IntoIterator for &'h StructHistory<'a> {
    type Item = &'h StructSnapshot<'a>;
    type IntoIter = std::slice::Iter<'h, StructSnapshot<'a>>;
    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
