use std::{convert::TryFrom, fmt::Display, ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};

use crate::utils::errors::RegionalError;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpreadingFactor {
    SF5,
    SF6,
    SF7,
    SF8,
    SF9,
    SF10,
    SF11,
    SF12,
}

impl SpreadingFactor {
    pub fn new(sf: u8) -> Self {
        match sf {
            0..=5 => SpreadingFactor::SF5,
            6 => SpreadingFactor::SF6,
            7 => SpreadingFactor::SF7,
            8 => SpreadingFactor::SF8,
            9 => SpreadingFactor::SF9,
            10 => SpreadingFactor::SF10,
            11 => SpreadingFactor::SF11,
            _ => SpreadingFactor::SF12,
        }
    }

    pub fn value(&self) -> u8 {
        match self {
            SpreadingFactor::SF5 => 5,
            SpreadingFactor::SF6 => 6,
            SpreadingFactor::SF7 => 7,
            SpreadingFactor::SF8 => 8,
            SpreadingFactor::SF9 => 9,
            SpreadingFactor::SF10 => 10,
            SpreadingFactor::SF11 => 11,
            SpreadingFactor::SF12 => 12,
        }
    }
}

impl Display for SpreadingFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SF{}", self.value())
    }
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LoRaBandwidth {
    BW125,
    BW250,
    BW500,
}

impl LoRaBandwidth {
    /// Bandwidth in Hz.
    pub fn hz(&self) -> u32 {
        match self {
            LoRaBandwidth::BW125 => 125_000,
            LoRaBandwidth::BW250 => 250_000,
            LoRaBandwidth::BW500 => 500_000,
        }
    }
}

impl Display for LoRaBandwidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BW{}", self.hz() / 1000)
    }
}

/// Index into a band's data rate table.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum DataRate {
    DR0,
    DR1,
    DR2,
    DR3,
    DR4,
    DR5,
    DR6,
    DR7,
    DR8,
    DR9,
    DR10,
    DR11,
    DR12,
    DR13,
    DR14,
    DR15,
}

impl DataRate {
    const ALL: [DataRate; 16] = [
        DataRate::DR0,
        DataRate::DR1,
        DataRate::DR2,
        DataRate::DR3,
        DataRate::DR4,
        DataRate::DR5,
        DataRate::DR6,
        DataRate::DR7,
        DataRate::DR8,
        DataRate::DR9,
        DataRate::DR10,
        DataRate::DR11,
        DataRate::DR12,
        DataRate::DR13,
        DataRate::DR14,
        DataRate::DR15,
    ];

    /// Saturates at `DR15`.
    pub fn new(i: u8) -> Self {
        Self::ALL[usize::from(i.min(15))]
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// All data rates from `min` to `max`, empty when `min > max`.
    pub fn range(min: DataRate, max: DataRate) -> impl Iterator<Item = DataRate> {
        let bounds: RangeInclusive<u8> = min.value()..=max.value();
        bounds.map(DataRate::new)
    }
}

impl TryFrom<u8> for DataRate {
    type Error = RegionalError;

    fn try_from(i: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(i)).copied().ok_or(RegionalError::InvalidDataRate(i))
    }
}

impl From<DataRate> for u8 {
    fn from(dr: DataRate) -> Self {
        dr.value()
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DR{}", self.value())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modulation {
    LoRa { spreading_factor: SpreadingFactor, bandwidth: LoRaBandwidth },
    FSK { bit_rate: u32 },
}

impl Display for Modulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Modulation::LoRa { spreading_factor, bandwidth } => write!(f, "{spreading_factor}{bandwidth}"),
            Modulation::FSK { bit_rate } => write!(f, "FSK {} kbps", bit_rate / 1000),
        }
    }
}

/// One entry of a band's data rate table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataRateSpec {
    pub modulation: Modulation,
    /// Maximum MAC payload size in bytes.
    pub max_mac_payload: u16,
    /// Maximum MAC payload size when the dwell time limit applies, `None` when the
    /// data rate cannot be used under the limit.
    pub max_mac_payload_dwell_limited: Option<u16>,
}

impl DataRateSpec {
    pub fn lora(spreading_factor: SpreadingFactor, bandwidth: LoRaBandwidth, max_mac_payload: u16) -> Self {
        Self {
            modulation: Modulation::LoRa { spreading_factor, bandwidth },
            max_mac_payload,
            max_mac_payload_dwell_limited: Some(max_mac_payload),
        }
    }

    pub fn fsk(bit_rate: u32, max_mac_payload: u16) -> Self {
        Self {
            modulation: Modulation::FSK { bit_rate },
            max_mac_payload,
            max_mac_payload_dwell_limited: Some(max_mac_payload),
        }
    }

    pub fn dwell_limited(mut self, max_mac_payload: Option<u16>) -> Self {
        self.max_mac_payload_dwell_limited = max_mac_payload;
        self
    }

    pub fn max_mac_payload(&self, dwell_time_limited: bool) -> Option<u16> {
        if dwell_time_limited {
            self.max_mac_payload_dwell_limited
        } else {
            Some(self.max_mac_payload)
        }
    }
}

/// A radio channel: center frequency in Hz and the allowed data rate range.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub frequency: u32,
    pub min_data_rate: DataRate,
    pub max_data_rate: DataRate,
}

impl Channel {
    pub fn new(frequency: u32, min_data_rate: DataRate, max_data_rate: DataRate) -> Self {
        Self { frequency, min_data_rate, max_data_rate }
    }

    pub fn data_rates(&self) -> impl Iterator<Item = DataRate> {
        DataRate::range(self.min_data_rate, self.max_data_rate)
    }

    pub fn supports(&self, data_rate: DataRate) -> bool {
        self.min_data_rate <= data_rate && data_rate <= self.max_data_rate
    }
}

/// Frequency and data rate of the second receive window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rx2Parameters {
    pub frequency: u32,
    pub data_rate: DataRate,
}

/// Parameters a downlink must be transmitted with.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TxParameters {
    pub frequency: u32,
    pub data_rate: DataRate,
    pub modulation: Modulation,
    pub max_eirp: f32,
    /// Time after the end of the uplink at which the window opens.
    pub delay: Duration,
}
