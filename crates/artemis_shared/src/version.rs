//! # Protocol Version
//!
//! The server announces its version once per connection. Everything that is
//! version dependent (bit slot presence, enum variant counts) is a pure
//! function of this value.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A protocol version `(major, minor, patch)`.
///
/// Ordering is lexicographic over the three components, which the derive
/// provides because of the field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Major component.
    pub major: u32,
    /// Minor component.
    pub minor: u32,
    /// Patch component.
    pub patch: u32,
}

impl Version {
    /// Oldest server this client can talk to.
    pub const MINIMUM: Self = Self::new(2, 6, 0);

    /// Beacons, probes and tags join the ordnance list.
    pub const V2_6_3: Self = Self::new(2, 6, 3);

    /// Nebula types and emergency jump cooldowns appear.
    pub const V2_7_0: Self = Self::new(2, 7, 0);

    /// Newest server this client knows the layout of.
    pub const LATEST: Self = Self::new(2, 8, 1);

    /// Creates a version.
    #[inline]
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Returns true if `MINIMUM <= self <= LATEST`.
    ///
    /// With `allow_newer` the upper bound is ignored; newer servers are then
    /// decoded with the latest known layout.
    #[must_use]
    pub fn is_supported(self, allow_newer: bool) -> bool {
        self >= Self::MINIMUM && (allow_newer || self <= Self::LATEST)
    }
}

impl Default for Version {
    /// Until the server says otherwise, assume the newest layout.
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Failure to parse a `major.minor.patch` string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version string: {0:?}")]
pub struct VersionParseError(pub String);

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32, VersionParseError> {
            parts
                .next()
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| VersionParseError(s.to_owned()))
        };
        let version = Self::new(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(VersionParseError(s.to_owned()));
        }
        Ok(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(Version::new(2, 6, 3) > Version::new(2, 6, 0));
        assert!(Version::new(2, 7, 0) > Version::new(2, 6, 9));
        assert!(Version::new(3, 0, 0) > Version::new(2, 99, 99));
        assert_eq!(Version::new(2, 7, 1), Version::new(2, 7, 1));
    }

    #[test]
    fn test_supported_range() {
        assert!(Version::MINIMUM.is_supported(false));
        assert!(Version::LATEST.is_supported(false));
        assert!(!Version::new(2, 5, 9).is_supported(false));
        assert!(!Version::new(2, 8, 2).is_supported(false));
        assert!(Version::new(2, 8, 2).is_supported(true));
        assert!(!Version::new(2, 1, 0).is_supported(true));
    }

    #[test]
    fn test_default_is_latest() {
        assert_eq!(Version::default(), Version::LATEST);
    }

    #[test]
    fn test_display_and_parse() {
        let version: Version = "2.6.3".parse().unwrap();
        assert_eq!(version, Version::V2_6_3);
        assert_eq!(version.to_string(), "2.6.3");
        assert!("2.6".parse::<Version>().is_err());
        assert!("2.6.3.1".parse::<Version>().is_err());
        assert!("two.six.three".parse::<Version>().is_err());
    }
}
