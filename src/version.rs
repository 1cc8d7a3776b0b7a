//! Card schema versioning

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CardError, Result};

/// A card schema version such as "1.5".
///
/// Ordering is lexicographic on (major, minor), so field declaration order
/// matters for the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CardVersion {
    pub major: u32,
    pub minor: u32,
}

pub const V1_0: CardVersion = CardVersion::new(1, 0);
pub const V1_1: CardVersion = CardVersion::new(1, 1);
pub const V1_2: CardVersion = CardVersion::new(1, 2);
pub const V1_3: CardVersion = CardVersion::new(1, 3);
pub const V1_4: CardVersion = CardVersion::new(1, 4);
pub const V1_5: CardVersion = CardVersion::new(1, 5);
pub const V1_6: CardVersion = CardVersion::new(1, 6);

impl CardVersion {
    /// Version assumed by fields without an explicit requirement
    pub const BASELINE: CardVersion = V1_0;

    /// Version stamped on newly built documents
    pub const LATEST: CardVersion = V1_6;

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Parse a "major.minor" string. Exactly two numeric parts are accepted.
    pub fn parse(version_str: &str) -> Result<Self> {
        let parts: Vec<&str> = version_str.split('.').collect();
        if parts.len() != 2 {
            return Err(CardError::VersionParse(version_str.to_string()));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| CardError::VersionParse(version_str.to_string()))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| CardError::VersionParse(version_str.to_string()))?;

        Ok(Self::new(major, minor))
    }

    /// Whether a document declaring `self` may use a feature introduced in `required`.
    pub fn supports(&self, required: CardVersion) -> bool {
        *self >= required
    }
}

impl fmt::Display for CardVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for CardVersion {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for CardVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CardVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
