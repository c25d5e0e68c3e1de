use std::{collections::BTreeMap, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    physical_parameters::{Channel, DataRate, DataRateSpec, Rx2Parameters},
    regional_parameters::{region::Region, version::PHYVersion},
    utils::errors::RegionalError,
};

/// Whether the dwell time limit applies by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DwellTime {
    pub uplinks: bool,
    pub downlinks: bool,
}

/// How the RX1 downlink channel is derived from the uplink channel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Rx1ChannelMapping {
    /// RX1 uses the uplink frequency.
    #[default]
    SameAsUplink,
    /// RX1 uses downlink channel `uplink_channel % n`.
    Modulo(u8),
}

/// The LoRaWAN PHY rules of one region in one regional parameters revision.
///
/// Bands are assembled with the `with_*` methods and become immutable once
/// registered in a [`BandFamily`](super::band_family::BandFamily), which
/// rejects bands that fail [`Band::validate`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Band {
    region: Region,
    version: PHYVersion,

    data_rates: BTreeMap<DataRate, DataRateSpec>,
    uplink_channels: Vec<Channel>,
    downlink_channels: Vec<Channel>,
    min_frequency: u32,
    max_frequency: u32,

    max_eirp: f32,
    max_dwell_time: Option<Duration>,
    default_dwell_time: DwellTime,

    rx1_delay: Duration,
    rx1_channel: Rx1ChannelMapping,
    /// Indexed by uplink data rate, then by RX1 data rate offset.
    rx1_data_rate_offsets: BTreeMap<DataRate, Vec<DataRate>>,
    rx2_default: Rx2Parameters,
}

impl Band {
    pub fn new(region: Region, version: PHYVersion, rx2_default: Rx2Parameters) -> Self {
        Self {
            region,
            version,
            data_rates: BTreeMap::new(),
            uplink_channels: Vec::new(),
            downlink_channels: Vec::new(),
            min_frequency: 0,
            max_frequency: u32::MAX,
            max_eirp: 16.0,
            max_dwell_time: None,
            default_dwell_time: DwellTime::default(),
            rx1_delay: Duration::from_secs(1),
            rx1_channel: Rx1ChannelMapping::SameAsUplink,
            rx1_data_rate_offsets: BTreeMap::new(),
            rx2_default,
        }
    }

    pub fn with_data_rate(mut self, data_rate: DataRate, spec: DataRateSpec) -> Self {
        self.data_rates.insert(data_rate, spec);
        self
    }

    pub fn with_uplink_channels(mut self, channels: Vec<Channel>) -> Self {
        self.uplink_channels = channels;
        self
    }

    pub fn with_downlink_channels(mut self, channels: Vec<Channel>) -> Self {
        self.downlink_channels = channels;
        self
    }

    pub fn with_frequency_range(mut self, min_frequency: u32, max_frequency: u32) -> Self {
        self.min_frequency = min_frequency;
        self.max_frequency = max_frequency;
        self
    }

    pub fn with_max_eirp(mut self, max_eirp: f32) -> Self {
        self.max_eirp = max_eirp;
        self
    }

    pub fn with_dwell_time(mut self, limit: Duration, default: DwellTime) -> Self {
        self.max_dwell_time = Some(limit);
        self.default_dwell_time = default;
        self
    }

    pub fn with_rx1_channel(mut self, mapping: Rx1ChannelMapping) -> Self {
        self.rx1_channel = mapping;
        self
    }

    pub fn with_rx1_data_rate_offsets(mut self, uplink: DataRate, downlinks: Vec<DataRate>) -> Self {
        self.rx1_data_rate_offsets.insert(uplink, downlinks);
        self
    }

    /// Same rules under another version, used to derive a revision from its predecessor.
    pub fn revised(mut self, version: PHYVersion) -> Self {
        self.version = version;
        self
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn version(&self) -> &PHYVersion {
        &self.version
    }

    pub fn data_rates(&self) -> &BTreeMap<DataRate, DataRateSpec> {
        &self.data_rates
    }

    pub fn data_rate(&self, data_rate: DataRate) -> Option<&DataRateSpec> {
        self.data_rates.get(&data_rate)
    }

    pub fn supports_data_rates(&self, min: DataRate, max: DataRate) -> bool {
        min <= max && DataRate::range(min, max).all(|dr| self.data_rates.contains_key(&dr))
    }

    /// Default uplink channels every device starts with.
    pub fn uplink_channels(&self) -> &[Channel] {
        &self.uplink_channels
    }

    pub fn downlink_channels(&self) -> &[Channel] {
        &self.downlink_channels
    }

    pub fn contains_frequency(&self, frequency: u32) -> bool {
        self.min_frequency <= frequency && frequency <= self.max_frequency
    }

    pub fn max_eirp(&self) -> f32 {
        self.max_eirp
    }

    pub fn max_dwell_time(&self) -> Option<Duration> {
        self.max_dwell_time
    }

    pub fn default_dwell_time(&self) -> &DwellTime {
        &self.default_dwell_time
    }

    pub fn rx1_delay(&self) -> Duration {
        self.rx1_delay
    }

    /// RX2 opens one second after RX1.
    pub fn rx2_delay(&self) -> Duration {
        self.rx1_delay + Duration::from_secs(1)
    }

    pub fn rx1_channel(&self) -> Rx1ChannelMapping {
        self.rx1_channel
    }

    /// Data rate of the RX1 window for an uplink at `uplink` with the given offset.
    pub fn rx1_data_rate(&self, uplink: DataRate, offset: u8) -> Option<DataRate> {
        self.rx1_data_rate_offsets.get(&uplink)?.get(usize::from(offset)).copied()
    }

    pub fn rx2_default(&self) -> &Rx2Parameters {
        &self.rx2_default
    }

    /// Checks the band is internally consistent.
    pub fn validate(&self) -> Result<(), RegionalError> {
        let invalid = |reason: String| RegionalError::InvalidBand { region: self.region, version: self.version, reason };

        if self.data_rates.is_empty() {
            return Err(invalid("empty data rate table".to_string()));
        }
        if self.min_frequency > self.max_frequency {
            return Err(invalid(format!("frequency range {}..={} is inverted", self.min_frequency, self.max_frequency)));
        }
        for (dr, spec) in self.data_rates.iter() {
            if spec.max_mac_payload == 0 {
                return Err(invalid(format!("{dr} has no MAC payload")));
            }
        }
        for (direction, channels) in [("uplink", &self.uplink_channels), ("downlink", &self.downlink_channels)] {
            for (i, channel) in channels.iter().enumerate() {
                if !self.supports_data_rates(channel.min_data_rate, channel.max_data_rate) {
                    return Err(invalid(format!(
                        "default {direction} channel {i} uses {}..={} outside the data rate table",
                        channel.min_data_rate, channel.max_data_rate
                    )));
                }
                if !self.contains_frequency(channel.frequency) {
                    return Err(invalid(format!("default {direction} channel {i} at {} Hz is outside the band", channel.frequency)));
                }
            }
        }
        if !self.data_rates.contains_key(&self.rx2_default.data_rate) {
            return Err(invalid(format!("RX2 data rate {} outside the data rate table", self.rx2_default.data_rate)));
        }
        if !self.contains_frequency(self.rx2_default.frequency) {
            return Err(invalid(format!("RX2 frequency {} Hz is outside the band", self.rx2_default.frequency)));
        }
        for channel in self.uplink_channels.iter() {
            for dr in channel.data_rates() {
                if !self.rx1_data_rate_offsets.contains_key(&dr) {
                    return Err(invalid(format!("no RX1 data rate offsets for uplink {dr}")));
                }
            }
        }
        for (uplink, downlinks) in self.rx1_data_rate_offsets.iter() {
            if let Some(dr) = downlinks.iter().find(|dr| !self.data_rates.contains_key(dr)) {
                return Err(invalid(format!("RX1 offset for uplink {uplink} yields {dr} outside the data rate table")));
            }
        }
        if let Rx1ChannelMapping::Modulo(0) = self.rx1_channel {
            return Err(invalid("RX1 channel mapping modulo 0".to_string()));
        }
        Ok(())
    }
}
