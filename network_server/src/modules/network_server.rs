use std::time::Duration;

use lorawan::{
    device::Device,
    frequency_plans::FrequencyPlan,
    physical_parameters::{Channel, DataRate, Rx2Parameters, TxParameters},
    regional_parameters::{band::{Band, Rx1ChannelMapping}, catalog::RegionalCatalog, resolver::ResolvedRegionalContext},
    utils::{errors::ChannelKind, format_mhz},
};

use crate::modules::{context_cache::ContextCache, error::NSError, init::EventsBackend, shared_catalog::SharedCatalog};

/// Radio metadata of a received uplink.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UplinkMetadata {
    pub frequency: u32,
    pub data_rate: DataRate,
    pub mac_payload_size: u16,
}

/// The frequency plan channel an uplink was received on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UplinkChannel {
    pub kind: ChannelKind,
    pub index: usize,
    pub channel: Channel,
}

pub struct NetworkServer {
    catalog: SharedCatalog,
    contexts: ContextCache,
    events: EventsBackend,
}

impl NetworkServer {
    pub fn new(catalog: RegionalCatalog, events: EventsBackend, context_cache_size: usize) -> Self {
        Self {
            catalog: SharedCatalog::new(catalog),
            contexts: ContextCache::new(context_cache_size),
            events,
        }
    }

    pub fn events(&self) -> &EventsBackend {
        &self.events
    }

    /// Swaps in a new catalog; contexts resolved against the old one are dropped.
    pub fn reload_catalog(&self, catalog: RegionalCatalog) -> u64 {
        self.catalog.reload(catalog)
    }

    /// Regional context every MAC-layer decision for `device` must use.
    pub fn regional_context(&self, device: &Device) -> Result<ResolvedRegionalContext, NSError> {
        let snapshot = self.catalog.snapshot();
        let version = device.effective_phy_version();
        self.contexts
            .get_or_resolve(snapshot.generation, device.frequency_plan_id(), version, || {
                snapshot.catalog.resolver().resolve(device.frequency_plan_id(), version)
            })
            .map(|context| {
                if context.is_fallback() {
                    log::debug!("Device {} uses band {} for PHY version {version}", device.dev_eui(), context.band_version());
                }
                context
            })
            .map_err(|e| {
                log::error!("Regional parameters of device {} cannot be resolved: {e}", device.dev_eui());
                NSError::from(e)
            })
    }

    /// Checks an uplink against the device's plan and band.
    pub fn validate_uplink(&self, device: &Device, uplink: &UplinkMetadata) -> Result<UplinkChannel, NSError> {
        let context = self.regional_context(device)?;
        validate_uplink(device, &context, uplink)
    }

    /// Parameters of the first receive window following `uplink`.
    pub fn rx1_parameters(&self, device: &Device, uplink: &UplinkMetadata, rx1_dr_offset: u8) -> Result<TxParameters, NSError> {
        let context = self.regional_context(device)?;
        let (plan, band) = (context.frequency_plan(), context.band());
        let channel = validate_uplink(device, &context, uplink)?;

        let data_rate = band
            .rx1_data_rate(uplink.data_rate, rx1_dr_offset)
            .ok_or(NSError::InvalidRx1DataRateOffset { data_rate: uplink.data_rate, offset: rx1_dr_offset })?;
        let frequency = rx1_frequency(plan, band, &channel)?;
        tx_parameters(plan, band, frequency, data_rate, band.rx1_delay())
    }

    /// Parameters of the second receive window.
    pub fn rx2_parameters(&self, device: &Device) -> Result<TxParameters, NSError> {
        let context = self.regional_context(device)?;
        let (plan, band) = (context.frequency_plan(), context.band());
        let Rx2Parameters { frequency, data_rate } = *plan.rx2_channel().unwrap_or(band.rx2_default());
        tx_parameters(plan, band, frequency, data_rate, band.rx2_delay())
    }
}

fn validate_uplink(device: &Device, context: &ResolvedRegionalContext, uplink: &UplinkMetadata) -> Result<UplinkChannel, NSError> {
    let invalid = |reason: String| {
        log::warn!("Dropping uplink from {}: {reason}", device.dev_eui());
        NSError::InvalidUplink { dev_eui: *device.dev_eui(), reason }
    };
    let (plan, band) = (context.frequency_plan(), context.band());

    let (kind, index, channel) = plan
        .uplink_channel(uplink.frequency, uplink.data_rate)
        .ok_or_else(|| invalid(format!("no {} channel at {} for {}", plan.id(), format_mhz(uplink.frequency), uplink.data_rate)))?;

    let dwell_time_limited = band.max_dwell_time().is_some() && plan.dwell_time().unwrap_or(band.default_dwell_time()).uplinks;
    let max_payload = band
        .data_rate(uplink.data_rate)
        .and_then(|spec| spec.max_mac_payload(dwell_time_limited))
        .ok_or_else(|| invalid(format!("{} not usable under band {} {}", uplink.data_rate, band.region(), band.version())))?;
    if uplink.mac_payload_size > max_payload {
        return Err(invalid(format!("MAC payload of {} bytes exceeds {max_payload} at {}", uplink.mac_payload_size, uplink.data_rate)));
    }
    Ok(UplinkChannel { kind, index, channel: *channel })
}

fn rx1_frequency(plan: &FrequencyPlan, band: &Band, uplink: &UplinkChannel) -> Result<u32, NSError> {
    match band.rx1_channel() {
        Rx1ChannelMapping::SameAsUplink => Ok(uplink.channel.frequency),
        Rx1ChannelMapping::Modulo(n) => {
            // Band channel numbering, the plan only lists a subset.
            let index = band
                .uplink_channels()
                .iter()
                .position(|c| c.frequency == uplink.channel.frequency)
                .unwrap_or(uplink.index);
            let downlinks = if plan.downlink_channels().is_empty() { band.downlink_channels() } else { plan.downlink_channels() };
            let downlink = index % usize::from(n);
            downlinks.get(downlink).map(|c| c.frequency).ok_or_else(|| {
                NSError::InvalidDownlink(format!(
                    "uplink channel {index} at {} maps to RX1 channel {downlink}, but {} lists {} downlink channels",
                    format_mhz(uplink.channel.frequency),
                    plan.id(),
                    downlinks.len()
                ))
            })
        }
    }
}

fn tx_parameters(plan: &FrequencyPlan, band: &Band, frequency: u32, data_rate: DataRate, delay: Duration) -> Result<TxParameters, NSError> {
    if !band.contains_frequency(frequency) {
        return Err(NSError::InvalidDownlink(format!("{} outside band {} {}", format_mhz(frequency), band.region(), band.version())));
    }
    let spec = band
        .data_rate(data_rate)
        .ok_or_else(|| NSError::InvalidDownlink(format!("{data_rate} not in band {} {}", band.region(), band.version())))?;
    let max_eirp = plan
        .sub_band(frequency)
        .and_then(|s| s.max_eirp)
        .unwrap_or_else(|| plan.max_eirp().unwrap_or(band.max_eirp()));
    Ok(TxParameters { frequency, data_rate, modulation: spec.modulation, max_eirp, delay })
}
