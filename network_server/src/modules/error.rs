use std::io::Error;

use lorawan::{physical_parameters::DataRate, utils::{errors::RegionalError, eui::EUI64}};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NSError {
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),
    #[error("malformed configuration: {0}")]
    InvalidConfiguration(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    IOError(#[from] Error),
    #[error("events backend unavailable: {0}")]
    EventsBackendUnavailable(String),

    #[error("invalid uplink from {dev_eui}: {reason}")]
    InvalidUplink { dev_eui: EUI64, reason: String },
    #[error("invalid downlink: {0}")]
    InvalidDownlink(String),
    #[error("no RX1 data rate for uplink {data_rate} with offset {offset}")]
    InvalidRx1DataRateOffset { data_rate: DataRate, offset: u8 },
    #[error(transparent)]
    RegionalError(#[from] RegionalError),
}
