use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;
use std::str::FromStr;

use exn::{OptionExt, ResultExt};

use crate::consts::{DEFAULT_DESIGNATOR, MIN_VERSION_COMPONENTS};
use crate::error::{Error, ErrorKind, Result};

/// Dot-delimited numeric release version, such as `2021.1.0`.
///
/// Components are compared one by one; a version that is a strict prefix of
/// another sorts before it, so `1.2` and `1.2.0` are distinct (missing
/// components are *not* treated as zero).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumericVersion(Vec<u32>);
impl NumericVersion {
    /// The individual components, most significant first.
    pub fn components(&self) -> &[u32] {
        &self.0
    }
}
impl FromStr for NumericVersion {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || ErrorKind::MalformedVersionToken(s.to_string());
        let mut components = Vec::new();
        for part in s.split('.') {
            // `u32::from_str` tolerates a leading `+`; release numbers don't.
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                exn::bail!(malformed());
            }
            components.push(part.parse::<u32>().or_raise(malformed)?);
        }
        if components.len() < MIN_VERSION_COMPONENTS {
            exn::bail!(malformed());
        }
        Ok(Self(components))
    }
}
impl Display for NumericVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

/// The release identity embedded in a header's filename.
///
/// A version token is a numeric version, optionally followed by a single
/// designator letter and a numeric suffix: `2021.1.0a3`, `2019.4.12f1`, or
/// just `2018.3.0`. Tokens without a letter get [`DEFAULT_DESIGNATOR`] and a
/// suffix of zero.
///
/// Keys are totally ordered by numeric version, then designator (by code
/// point), then suffix. See [`Ord`] for details.
///
/// # Examples
///
/// ```rust
/// use ihist_extract::models::VersionKey;
///
/// let alpha: VersionKey = "2021.1.0a3".parse().unwrap();
/// let release: VersionKey = "2021.1.0f1".parse().unwrap();
/// assert!(alpha < release);
/// assert_eq!(alpha.to_string(), "2021.1.0a3");
/// assert_eq!("2021.1.0".parse::<VersionKey>().unwrap().to_string(), "2021.1.0o0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionKey {
    numbers: NumericVersion,
    designator: char,
    suffix: u32,
}
impl VersionKey {
    pub fn new(numbers: NumericVersion, designator: char, suffix: u32) -> Self {
        Self { numbers, designator, suffix }
    }

    /// Parses a version token (a filename with its extension already
    /// stripped).
    ///
    /// The token is split at its first alphabetic character: everything
    /// before it is the numeric version, the character itself is the
    /// designator and everything after it must be the numeric suffix.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedVersionToken`](ErrorKind::MalformedVersionToken)
    /// if the numeric version doesn't parse, or if a designator is present
    /// but isn't followed by a plain run of digits.
    pub fn parse(token: &str) -> Result<Self> {
        let Some((index, designator)) = token.char_indices().find(|(_, c)| c.is_alphabetic()) else {
            let numbers = token.parse::<NumericVersion>()?;
            return Ok(Self::new(numbers, DEFAULT_DESIGNATOR, 0));
        };
        let malformed = || ErrorKind::MalformedVersionToken(token.to_string());
        let numbers = token[..index].parse::<NumericVersion>().or_raise(malformed)?;
        let remainder = &token[index + designator.len_utf8()..];
        if remainder.is_empty() || !remainder.bytes().all(|b| b.is_ascii_digit()) {
            exn::bail!(malformed());
        }
        let suffix = remainder.parse::<u32>().or_raise(malformed)?;
        Ok(Self::new(numbers, designator, suffix))
    }

    /// Parses the version token from a header's path, stripping the
    /// directory and final extension first (`headers/2021.1.0a3.h` becomes
    /// `2021.1.0a3`).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_raise(|| ErrorKind::MalformedVersionToken(path.display().to_string()))?;
        Self::parse(stem)
    }

    pub fn numbers(&self) -> &NumericVersion {
        &self.numbers
    }

    pub fn designator(&self) -> char {
        self.designator
    }

    pub fn suffix(&self) -> u32 {
        self.suffix
    }
}
impl FromStr for VersionKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
impl Display for VersionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}", self.numbers, self.designator, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2018.3.0", &[2018, 3, 0], 'o', 0)]
    #[case("5.3.2", &[5, 3, 2], 'o', 0)]
    #[case("2021.1.0a3", &[2021, 1, 0], 'a', 3)]
    #[case("2019.4.12f1", &[2019, 4, 12], 'f', 1)]
    #[case("2022.2.0b16", &[2022, 2, 0], 'b', 16)]
    #[case("2017.1.0p5", &[2017, 1, 0], 'p', 5)]
    #[case("2020.1", &[2020, 1], 'o', 0)]
    #[case("2020.1.0.4", &[2020, 1, 0, 4], 'o', 0)]
    fn test_parse(#[case] token: &str, #[case] numbers: &[u32], #[case] designator: char, #[case] suffix: u32) {
        let key = VersionKey::parse(token).unwrap();
        assert_eq!(key.numbers().components(), numbers);
        assert_eq!(key.designator(), designator);
        assert_eq!(key.suffix(), suffix);
    }

    #[rstest]
    #[case("")]
    #[case("2021")]
    #[case("2021.")]
    #[case(".1.0")]
    #[case("2021..0")]
    #[case("2021.1.0a")]
    #[case("2021.1.0a3x")]
    #[case("2021.1.0a+3")]
    #[case("2021.1.0a-3")]
    #[case("2021.1.0a 3")]
    #[case("2021.1.0-beta")]
    #[case("a3")]
    #[case("2021.1.x")]
    #[case("2021.1.99999999999")]
    #[case("2021.1.0a99999999999")]
    #[case("+2021.1.0")]
    fn test_parse_malformed(#[case] token: &str) {
        let err = VersionKey::parse(token).unwrap_err();
        assert!(matches!(&*err, ErrorKind::MalformedVersionToken(_)), "{token}: {err:?}");
    }

    #[rstest]
    #[case("2018.3.0")]
    #[case("2021.1.0a3")]
    #[case("2019.4.12f1")]
    fn test_display_recombines_parts(#[case] token: &str) {
        let key = VersionKey::parse(token).unwrap();
        let displayed = key.to_string();
        // Display always includes the (possibly defaulted) designator and
        // suffix, and parses back to the same key.
        assert_eq!(VersionKey::parse(&displayed).unwrap(), key);
    }

    #[test]
    fn test_display_of_bare_version() {
        assert_eq!(VersionKey::parse("2018.3.0").unwrap().to_string(), "2018.3.0o0");
    }

    #[test]
    fn test_bare_version_uses_defaults() {
        for token in ["1.0", "2018.3.0", "2022.3.10.1"] {
            let key = VersionKey::parse(token).unwrap();
            assert_eq!(key.designator(), DEFAULT_DESIGNATOR);
            assert_eq!(key.suffix(), 0);
        }
    }

    #[rstest]
    #[case("headers/2021.1.0a3.h", "2021.1.0a3")]
    #[case("2019.4.0f1.h", "2019.4.0f1")]
    #[case("/abs/path/2018.3.0.h", "2018.3.0o0")]
    fn test_from_path(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(VersionKey::from_path(path).unwrap().to_string(), expected);
    }

    #[test]
    fn test_from_path_malformed() {
        assert!(VersionKey::from_path("headers/README.h").is_err());
        assert!(VersionKey::from_path("").is_err());
    }

    #[test]
    fn test_numeric_version_display() {
        let numbers: NumericVersion = "2021.10.3".parse().unwrap();
        assert_eq!(numbers.to_string(), "2021.10.3");
        assert_eq!(numbers.components(), &[2021, 10, 3]);
    }
}
