//! Version Key Comparison

use crate::models::{NumericVersion, VersionKey};
use std::cmp::Ordering;

impl Ord for NumericVersion {
    /// Component-wise comparison, most significant first.
    ///
    /// When one version is a prefix of the other the shorter one sorts
    /// first: `2021.1 < 2021.1.0`. Missing components are never padded with
    /// zeroes, otherwise two distinct filenames could collapse into the same
    /// release.
    fn cmp(&self, other: &Self) -> Ordering {
        self.components().cmp(other.components())
    }
}
impl PartialOrd for NumericVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionKey {
    /// Orders releases by numeric version, then designator letter (by code
    /// point), then numeric suffix.
    ///
    /// With the usual Unity designators this yields alphas, then betas, then
    /// final releases, then bare versions (designator `o`), then patches:
    /// `2021.1.0a3 < 2021.1.0b1 < 2021.1.0f1 < 2021.1.0 < 2021.1.0p2`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.numbers()
            .cmp(other.numbers())
            .then_with(|| self.designator().cmp(&other.designator()))
            .then_with(|| self.suffix().cmp(&other.suffix()))
    }
}
impl PartialOrd for VersionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(token: &str) -> VersionKey {
        token.parse().unwrap()
    }

    #[rstest]
    #[case("2021.1.0a3", "2021.1.0b1", Ordering::Less)]
    #[case("2021.1.0b1", "2021.1.0f1", Ordering::Less)]
    #[case("2021.1.0f1", "2021.1.0", Ordering::Less)]
    #[case("2021.1.0", "2021.1.0p2", Ordering::Less)]
    #[case("2021.1.0a3", "2021.1.0a12", Ordering::Less)]
    #[case("2021.1.0f1", "2021.1.1a1", Ordering::Less)]
    #[case("2019.4.9f1", "2019.4.10f1", Ordering::Less)]
    #[case("2021.1", "2021.1.0", Ordering::Less)]
    #[case("2021.1.0.1", "2021.1.1", Ordering::Less)]
    #[case("2022.1.0a1", "2021.3.40f1", Ordering::Greater)]
    #[case("2021.1.0a3", "2021.1.0a3", Ordering::Equal)]
    #[case("2021.1.0", "2021.1.0o0", Ordering::Equal)]
    fn test_ordering(#[case] left: &str, #[case] right: &str, #[case] expected: Ordering) {
        assert_eq!(key(left).cmp(&key(right)), expected);
        assert_eq!(key(right).cmp(&key(left)), expected.reverse());
    }

    #[test]
    fn test_ordering_matches_field_tuples() {
        let tokens = [
            "2018.3.0", "2018.3.0f2", "2019.4.0a1", "2019.4.0b12", "2019.4.0", "2019.4.0p1", "2019.4", "2020.1.0.3",
            "2020.1.0a3", "2020.1.0a21", "2021.1.0f1", "5.6.7f1",
        ];
        let keys: Vec<VersionKey> = tokens.iter().map(|t| key(t)).collect();
        for a in &keys {
            for b in &keys {
                let tuple_a = (a.numbers().components(), a.designator(), a.suffix());
                let tuple_b = (b.numbers().components(), b.designator(), b.suffix());
                assert_eq!(a.cmp(b), tuple_a.cmp(&tuple_b), "{a} vs {b}");
                // Equality agrees with ordering.
                assert_eq!(a == b, a.cmp(b) == Ordering::Equal);
                for c in &keys {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c} is not transitive");
                    }
                }
            }
        }
    }

    #[test]
    fn test_sorting() {
        let mut keys = vec![key("2021.1.0f1"), key("2020.3.1"), key("2021.1.0a3"), key("2021.1.0"), key("2021.1.0b2")];
        keys.sort();
        let sorted: Vec<String> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(sorted, ["2020.3.1o0", "2021.1.0a3", "2021.1.0b2", "2021.1.0f1", "2021.1.0o0"]);
    }
}
