use std::fmt::Display;

use thiserror::Error;

use crate::{physical_parameters::DataRate, regional_parameters::{region::Region, version::PHYVersion}};

/// Which list of a frequency plan a channel index refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    Uplink,
    Downlink,
    LoRaStandard,
    FSK,
}

impl Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelKind::Uplink => write!(f, "uplink"),
            ChannelKind::Downlink => write!(f, "downlink"),
            ChannelKind::LoRaStandard => write!(f, "LoRa standard"),
            ChannelKind::FSK => write!(f, "FSK"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegionalError {
    #[error("no band family registered for region {0}")]
    UnknownRegion(Region),
    #[error("unknown frequency plan `{0}`")]
    UnknownFrequencyPlan(String),
    #[error("region {region} has no band version {version}")]
    UnknownBandVersion { region: Region, version: PHYVersion },
    #[error("region {region} has no band compatible with PHY version {requested}")]
    NoCompatibleBandVersion { region: Region, requested: PHYVersion },
    #[error("frequency plan `{plan_id}`: {kind} channel {channel} ({min}..={max}) not supported by band {region} {band_version}")]
    IncompatibleFrequencyPlan {
        plan_id: String,
        kind: ChannelKind,
        channel: usize,
        min: DataRate,
        max: DataRate,
        region: Region,
        band_version: PHYVersion,
    },

    #[error("invalid band {region} {version}: {reason}")]
    InvalidBand { region: Region, version: PHYVersion, reason: String },
    #[error("band {region} {version} registered twice")]
    DuplicateBandVersion { region: Region, version: PHYVersion },
    #[error("band family for region {0} registered twice")]
    DuplicateBandFamily(Region),
    #[error("frequency plan `{0}` defined twice")]
    DuplicateFrequencyPlan(String),
    #[error("frequency plan `{plan_id}` extends unknown plan `{base_id}`")]
    UnknownBaseFrequencyPlan { plan_id: String, base_id: String },
    #[error("frequency plan `{0}` is part of an inheritance cycle")]
    FrequencyPlanCycle(String),
    #[error("invalid frequency plan `{plan_id}`: {reason}")]
    InvalidFrequencyPlanDescription { plan_id: String, reason: String },
    #[error("frequency plan descriptions could not be parsed: {0}")]
    MalformedFrequencyPlans(String),

    #[error("invalid PHY version `{0}`")]
    InvalidPHYVersion(String),
    #[error("invalid region identifier `{0}`")]
    InvalidRegion(String),
    #[error("invalid data rate index {0}")]
    InvalidDataRate(u8),
    #[error("invalid EUI64 `{0}`")]
    InvalidEUI64Buffer(String),
}

impl From<serde_json::Error> for RegionalError {
    fn from(e: serde_json::Error) -> Self {
        RegionalError::MalformedFrequencyPlans(e.to_string())
    }
}
