use std::{convert::TryFrom, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::utils::errors::RegionalError;

/// Revision of the LoRaWAN regional parameters a device implements.
///
/// Versions are totally ordered segment by segment, numerically, and then by
/// revision letter. A version without revision comes before its first
/// revision, so `1.0.2 < 1.0.2-a < 1.0.2-b < 1.0.3`. Missing segments count
/// as zero: `1.1` and `1.1.0` are the same version.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PHYVersion {
    major: u16,
    minor: u16,
    patch: u16,
    revision: Option<char>,
}

impl PHYVersion {
    pub const V1_0: PHYVersion = PHYVersion::new(1, 0, 0);
    pub const V1_0_1: PHYVersion = PHYVersion::new(1, 0, 1);
    pub const V1_0_2_REV_A: PHYVersion = PHYVersion::new(1, 0, 2).with_revision('a');
    pub const V1_0_2_REV_B: PHYVersion = PHYVersion::new(1, 0, 2).with_revision('b');
    pub const V1_0_3_REV_A: PHYVersion = PHYVersion::new(1, 0, 3).with_revision('a');
    pub const V1_1_REV_A: PHYVersion = PHYVersion::new(1, 1, 0).with_revision('a');
    pub const V1_1_REV_B: PHYVersion = PHYVersion::new(1, 1, 0).with_revision('b');

    pub const fn new(major: u16, minor: u16, patch: u16) -> Self {
        Self { major, minor, patch, revision: None }
    }

    /// `revision` must be a lowercase ASCII letter.
    pub const fn with_revision(mut self, revision: char) -> Self {
        self.revision = Some(revision);
        self
    }

    pub fn major(&self) -> u16 {
        self.major
    }

    pub fn minor(&self) -> u16 {
        self.minor
    }

    pub fn patch(&self) -> u16 {
        self.patch
    }

    pub fn revision(&self) -> Option<char> {
        self.revision
    }
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | '_' | '-')
}

impl FromStr for PHYVersion {
    type Err = RegionalError;

    /// Accepts `1.0`, `1.0.1`, `1.0.2a`, `1.0.2-a`, `1.0.2-revA`, `1.0.2-rev-a`
    /// and the enum style `PHY_V1_0_2_REV_A`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegionalError::InvalidPHYVersion(s.to_string());

        let lowered = s.trim().to_ascii_lowercase();
        let body = lowered.strip_prefix("phy").map(|rest| rest.trim_start_matches(is_separator)).unwrap_or(&lowered);
        let body = body.strip_prefix('v').unwrap_or(body);

        let split = body.find(|c: char| !(c.is_ascii_digit() || is_separator(c))).unwrap_or(body.len());
        let (numbers, rest) = body.split_at(split);

        let segments = numbers
            .trim_end_matches(is_separator)
            .split(|c: char| c == '.' || c == '_')
            .map(|segment| segment.parse::<u16>().map_err(|_| invalid()))
            .collect::<Result<Vec<u16>, RegionalError>>()?;
        if segments.is_empty() || segments.len() > 3 {
            return Err(invalid());
        }

        let rest = rest.trim_start_matches(is_separator);
        let rest = rest.strip_prefix("rev").map(|r| r.trim_start_matches(is_separator)).unwrap_or(rest);
        let mut letters = rest.chars();
        let revision = match (letters.next(), letters.next()) {
            (None, _) => None,
            (Some(c), None) if c.is_ascii_lowercase() => Some(c),
            _ => return Err(invalid()),
        };

        Ok(PHYVersion {
            major: segments[0],
            minor: segments.get(1).copied().unwrap_or(0),
            patch: segments.get(2).copied().unwrap_or(0),
            revision,
        })
    }
}

impl TryFrom<String> for PHYVersion {
    type Error = RegionalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PHYVersion> for String {
    fn from(v: PHYVersion) -> Self {
        v.to_string()
    }
}

impl Display for PHYVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;
        if self.patch != 0 {
            write!(f, ".{}", self.patch)?;
        }
        if let Some(revision) = self.revision {
            write!(f, "-{revision}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PHYVersion {
        s.parse().unwrap()
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!(v("1.0.2a"), PHYVersion::V1_0_2_REV_A);
        assert_eq!(v("1.0.2-a"), PHYVersion::V1_0_2_REV_A);
        assert_eq!(v("1.0.2-revA"), PHYVersion::V1_0_2_REV_A);
        assert_eq!(v("1.0.2-rev-a"), PHYVersion::V1_0_2_REV_A);
        assert_eq!(v("PHY_V1_0_2_REV_B"), PHYVersion::V1_0_2_REV_B);
        assert_eq!(v("V1_1_REV_A"), PHYVersion::V1_1_REV_A);
        assert_eq!(v("1.0"), PHYVersion::V1_0);
        assert_eq!(v("1.0.0"), PHYVersion::V1_0);
        assert_eq!(v(" 1.0.1 "), PHYVersion::V1_0_1);
        assert_eq!(v("2"), PHYVersion::new(2, 0, 0));
    }

    #[test]
    fn rejects_garbage() {
        for s in ["", "a", "1..0", "1.0.2-ab", "1.0.2-A1", "1.0.0.0", "x1.0", "99999999.0"] {
            assert!(s.parse::<PHYVersion>().is_err(), "{s} should not parse");
        }
    }

    #[test]
    fn orders_numerically_then_by_revision() {
        assert!(v("1.0.2") < v("1.0.2a"));
        assert!(v("1.0.2a") < v("1.0.2b"));
        assert!(v("1.0.2b") < v("1.0.3"));
        assert!(v("1.0.3a") < v("1.1"));
        assert!(v("1.1-b") < v("2.0"));
        assert!(v("1.2") < v("1.10"));
        assert!(v("1.0.9") < v("1.0.10"));
    }

    #[test]
    fn displays_canonical_form() {
        assert_eq!(PHYVersion::V1_0_2_REV_B.to_string(), "1.0.2-b");
        assert_eq!(PHYVersion::V1_1_REV_A.to_string(), "1.1-a");
        assert_eq!(PHYVersion::V1_0.to_string(), "1.0");
        assert_eq!(v(&PHYVersion::V1_0_3_REV_A.to_string()), PHYVersion::V1_0_3_REV_A);
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&PHYVersion::V1_0_2_REV_B).unwrap();
        assert_eq!(json, "\"1.0.2-b\"");
        assert_eq!(serde_json::from_str::<PHYVersion>("\"1.0.2b\"").unwrap(), PHYVersion::V1_0_2_REV_B);
        assert!(serde_json::from_str::<PHYVersion>("\"one\"").is_err());
    }
}
