//! Dotted version parsing and the minimum-version gate.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{LiveLogsError, Result};

/// A dotted numeric version such as `7.16.0`
///
/// Components compare numerically; missing trailing components count as zero.
/// Text after a component's digits (`0-m001`) marks a pre-release, which sorts
/// before the plain release, so `7.16.0-m001 < 7.16.0`.
#[derive(Clone, Debug)]
pub struct Version {
    raw: String,
    parts: Vec<Component>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Component {
    number: u64,
    pre_release: Option<String>,
}

impl Component {
    fn parse(part: &str) -> Self {
        let split = part
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(part.len());
        let (digits, suffix) = part.split_at(split);
        Self {
            number: digits.parse().unwrap_or(0),
            pre_release: (!suffix.is_empty()).then(|| suffix.to_string()),
        }
    }
}

impl Ord for Component {
    fn cmp(&self, other: &Self) -> Ordering {
        self.number
            .cmp(&other.number)
            .then_with(|| match (&self.pre_release, &other.pre_release) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Version {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix(['v', 'V']).unwrap_or(raw);
        let mut parts: Vec<Component> = raw.split('.').map(Component::parse).collect();

        while parts.last() == Some(&Component::default()) {
            parts.pop();
        }

        Self {
            raw: raw.to_string(),
            parts,
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let zero = Component::default();
        let len = self.parts.len().max(other.parts.len());
        (0..len)
            .map(|i| {
                let a = self.parts.get(i).unwrap_or(&zero);
                let b = other.parts.get(i).unwrap_or(&zero);
                a.cmp(b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Fail when `current` is strictly below `minimum`.
pub fn check_version(current: &str, minimum: &'static str, product: &'static str) -> Result<()> {
    if Version::parse(current) < Version::parse(minimum) {
        return Err(LiveLogsError::UnsupportedVersion {
            product,
            current: current.trim().to_string(),
            minimum,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Version::parse("7.16.0") < Version::parse("7.18.0"));
        assert!(Version::parse("6.23.3") < Version::parse("7.16.0"));
        assert!(Version::parse("7.9.0") < Version::parse("7.16.0"));
        assert!(Version::parse("3.18.0") > Version::parse("3.9.12"));
    }

    #[test]
    fn test_equality_ignores_trailing_zeros_and_prefix() {
        assert_eq!(Version::parse("7.16"), Version::parse("7.16.0"));
        assert_eq!(Version::parse(" v2.7.0 "), Version::parse("2.7.0"));
    }

    #[test]
    fn test_pre_release_sorts_before_release() {
        assert!(Version::parse("7.16.0-m001") < Version::parse("7.16.0"));
        assert!(Version::parse("7.16-m001") < Version::parse("7.16"));
        assert!(Version::parse("7.16.0-m001") > Version::parse("7.15.9"));
        assert!(Version::parse("7.16.1-rc1") > Version::parse("7.16.0"));
        assert!(Version::parse("7.16.0-m001") < Version::parse("7.16.0-m002"));
    }

    #[test]
    fn test_check_version_pre_release_of_minimum_fails() {
        let err = check_version("7.16.0-m001", "7.16.0", "Artifactory").unwrap_err();
        assert!(matches!(err, LiveLogsError::UnsupportedVersion { .. }));
        assert!(check_version("7.16.1-m001", "7.16.0", "Artifactory").is_ok());
    }

    #[test]
    fn test_ordering_is_transitive() {
        let a = Version::parse("1.13.0");
        let b = Version::parse("1.13.5");
        let c = Version::parse("1.20.0");
        assert!(a < b && b < c && a < c);
    }

    #[test]
    fn test_check_version_equal_passes() {
        assert!(check_version("7.16.0", "7.16.0", "Artifactory").is_ok());
    }

    #[test]
    fn test_check_version_greater_passes() {
        assert!(check_version("7.18.0", "7.16.0", "Artifactory").is_ok());
    }

    #[test]
    fn test_check_version_less_fails() {
        let err = check_version("6.23.3", "7.16.0", "Artifactory").unwrap_err();
        assert!(matches!(err, LiveLogsError::UnsupportedVersion { .. }));
        assert!(err
            .to_string()
            .contains("minimum supported version is 7.16.0"));
    }
}
