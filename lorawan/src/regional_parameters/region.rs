use std::{convert::TryFrom, fmt::Display, str::FromStr};

use serde::{Serialize, Deserialize};

use crate::utils::errors::RegionalError;

/// Identifier of a regulatory region, i.e. of a band family.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Region {
    #[default] EU863_870,
    EU433,
    US902_928,
    CN779_787,
    AU915_928,
    CN470_510,
    AS923,
    KR920_923,
    INDIA865_867,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::EU863_870,
        Region::EU433,
        Region::US902_928,
        Region::CN779_787,
        Region::AU915_928,
        Region::CN470_510,
        Region::AS923,
        Region::KR920_923,
        Region::INDIA865_867,
    ];

    /// Canonical band identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Region::EU863_870 => "EU_863_870",
            Region::EU433 => "EU_433",
            Region::US902_928 => "US_902_928",
            Region::CN779_787 => "CN_779_787",
            Region::AU915_928 => "AU_915_928",
            Region::CN470_510 => "CN_470_510",
            Region::AS923 => "AS_923",
            Region::KR920_923 => "KR_920_923",
            Region::INDIA865_867 => "IN_865_867",
        }
    }

    /// Common short name, as used in LoRaWAN regional parameters documents.
    pub fn common_name(&self) -> &'static str {
        match self {
            Region::EU863_870 => "EU868",
            Region::EU433 => "EU433",
            Region::US902_928 => "US915",
            Region::CN779_787 => "CN779",
            Region::AU915_928 => "AU915",
            Region::CN470_510 => "CN470",
            Region::AS923 => "AS923",
            Region::KR920_923 => "KR920",
            Region::INDIA865_867 => "IN865",
        }
    }
}

impl FromStr for Region {
    type Err = RegionalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().chars().filter(|c| *c != '_' && *c != '-').collect::<String>().to_ascii_uppercase();
        Region::ALL
            .iter()
            .find(|r| {
                let id: String = r.id().chars().filter(|c| *c != '_').collect();
                id == normalized || r.common_name() == normalized
            })
            .copied()
            .ok_or_else(|| RegionalError::InvalidRegion(s.to_string()))
    }
}

impl TryFrom<String> for Region {
    type Error = RegionalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Region> for String {
    fn from(r: Region) -> Self {
        r.id().to_string()
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_common_names() {
        assert_eq!("EU_863_870".parse::<Region>().unwrap(), Region::EU863_870);
        assert_eq!("EU868".parse::<Region>().unwrap(), Region::EU863_870);
        assert_eq!("us915".parse::<Region>().unwrap(), Region::US902_928);
        assert_eq!("AS_923".parse::<Region>().unwrap(), Region::AS923);
        assert_eq!("IN_865_867".parse::<Region>().unwrap(), Region::INDIA865_867);
        assert!("XX_000".parse::<Region>().is_err());
    }

    #[test]
    fn every_region_parses_back_from_its_id() {
        for region in Region::ALL {
            assert_eq!(region.id().parse::<Region>().unwrap(), region);
            assert_eq!(region.common_name().parse::<Region>().unwrap(), region);
        }
    }
}
