//! Schema version identifiers.
//!
//! Identifiers look like `stack/v1` or `stack/v1alpha2` and are ordered the
//! way semver orders `1.0.0` and `1.0.0-alpha.2`: a release sorts after all
//! of its pre-releases, and `alpha` sorts before `beta`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, StackError};

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^stack/v(\d)(?:(alpha|beta)([1-9]?[0-9]))?$").expect("valid version pattern")
});

/// Pre-release channel of a schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Channel {
    Alpha,
    Beta,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Beta => write!(f, "beta"),
        }
    }
}

/// A parsed, comparable schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaVersion {
    /// Major version number.
    pub major: u32,
    /// Pre-release channel and number; `None` for a full release.
    pub pre: Option<(Channel, u32)>,
}

impl SchemaVersion {
    /// Parse an `apiVersion` identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use stack::schema::SchemaVersion;
    ///
    /// let beta = SchemaVersion::parse("stack/v0beta1").unwrap();
    /// let alpha = SchemaVersion::parse("stack/v1alpha1").unwrap();
    /// assert!(alpha > beta);
    /// assert!(SchemaVersion::parse("stack/v1").unwrap() > alpha);
    /// ```
    pub fn parse(identifier: &str) -> Result<Self> {
        let invalid = || StackError::InvalidVersion {
            version: identifier.to_string(),
        };
        let captures = VERSION_PATTERN.captures(identifier).ok_or_else(invalid)?;

        let major = captures[1].parse().map_err(|_| invalid())?;
        let pre = match (captures.get(2), captures.get(3)) {
            (Some(channel), Some(number)) => {
                let channel = match channel.as_str() {
                    "alpha" => Channel::Alpha,
                    _ => Channel::Beta,
                };
                Some((channel, number.as_str().parse().map_err(|_| invalid())?))
            }
            _ => None,
        };

        Ok(Self { major, pre })
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pre {
            Some((channel, number)) => write!(f, "{}.0.0-{}.{}", self.major, channel, number),
            None => write!(f, "{}.0.0", self.major),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prerelease() {
        let v = SchemaVersion::parse("stack/v0beta1").unwrap();
        assert_eq!(v.major, 0);
        assert_eq!(v.pre, Some((Channel::Beta, 1)));
        assert_eq!(v.to_string(), "0.0.0-beta.1");
    }

    #[test]
    fn parses_release() {
        let v = SchemaVersion::parse("stack/v2").unwrap();
        assert_eq!(v.major, 2);
        assert_eq!(v.pre, None);
        assert_eq!(v.to_string(), "2.0.0");
    }

    #[test]
    fn parses_two_digit_prerelease() {
        let v = SchemaVersion::parse("stack/v1alpha12").unwrap();
        assert_eq!(v.pre, Some((Channel::Alpha, 12)));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        for bad in [
            "",
            "v1",
            "stack/1",
            "stack/v10",
            "stack/v1gamma1",
            "stack/v1alpha",
            "stack/v1alpha01",
            "skaffold/v1",
            "stack/v1alpha1 ",
        ] {
            assert!(
                matches!(
                    SchemaVersion::parse(bad),
                    Err(StackError::InvalidVersion { .. })
                ),
                "expected {:?} to be rejected",
                bad
            );
        }
    }

    #[test]
    fn orders_channels_and_releases() {
        let ordered = [
            "stack/v0alpha1",
            "stack/v0beta1",
            "stack/v0beta2",
            "stack/v0",
            "stack/v1alpha1",
            "stack/v1alpha2",
            "stack/v1alpha10",
            "stack/v1beta1",
            "stack/v1",
            "stack/v2alpha1",
        ];
        let parsed: Vec<_> = ordered
            .iter()
            .map(|v| SchemaVersion::parse(v).unwrap())
            .collect();
        for pair in parsed.windows(2) {
            assert!(pair[0] < pair[1], "{} should sort before {}", pair[0], pair[1]);
        }
    }
}
