use std::sync::Arc;

use crate::{
    device::Device,
    frequency_plans::{FrequencyPlan, Store},
    regional_parameters::{band::Band, registry::BandRegistry, version::PHYVersion},
    utils::errors::RegionalError,
};

/// The frequency plan and band revision governing one device.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedRegionalContext {
    frequency_plan: Arc<FrequencyPlan>,
    band: Arc<Band>,
    requested_version: PHYVersion,
}

impl ResolvedRegionalContext {
    pub fn frequency_plan(&self) -> &FrequencyPlan {
        &self.frequency_plan
    }

    pub fn band(&self) -> &Band {
        &self.band
    }

    /// Version of the band actually selected.
    pub fn band_version(&self) -> &PHYVersion {
        self.band.version()
    }

    /// Version the device declared.
    pub fn requested_version(&self) -> &PHYVersion {
        &self.requested_version
    }

    /// Whether an older revision was selected for lack of an exact match.
    pub fn is_fallback(&self) -> bool {
        self.band.version() != &self.requested_version
    }
}

/// Entry point of MAC-layer logic into the regional catalogs.
///
/// Resolution is a pure function of its inputs and the two borrowed stores,
/// so a resolver can be shared freely between request handlers.
#[derive(Clone, Copy, Debug)]
pub struct DeviceRegionalContextResolver<'a> {
    bands: &'a BandRegistry,
    frequency_plans: &'a Store,
}

impl<'a> DeviceRegionalContextResolver<'a> {
    pub fn new(bands: &'a BandRegistry, frequency_plans: &'a Store) -> Self {
        Self { bands, frequency_plans }
    }

    pub fn resolve(&self, plan_id: &str, declared_phy_version: &PHYVersion) -> Result<ResolvedRegionalContext, RegionalError> {
        let frequency_plan = self.frequency_plans.get_by_id(plan_id)?;
        let family = self.bands.get_family(frequency_plan.region())?;
        let band = family.resolve(declared_phy_version)?;
        check_channels(&frequency_plan, &band)?;
        Ok(ResolvedRegionalContext {
            frequency_plan,
            band,
            requested_version: *declared_phy_version,
        })
    }

    /// Resolves with the PHY version the device is currently bound to.
    pub fn resolve_device(&self, device: &Device) -> Result<ResolvedRegionalContext, RegionalError> {
        self.resolve(device.frequency_plan_id(), device.effective_phy_version())
    }
}

/// Every channel of the plan must only use data rates of the band's table.
fn check_channels(frequency_plan: &FrequencyPlan, band: &Band) -> Result<(), RegionalError> {
    match frequency_plan
        .channels()
        .find(|(_, _, c)| !band.supports_data_rates(c.min_data_rate, c.max_data_rate))
    {
        None => Ok(()),
        Some((kind, channel, c)) => Err(RegionalError::IncompatibleFrequencyPlan {
            plan_id: frequency_plan.id().to_string(),
            kind,
            channel,
            min: c.min_data_rate,
            max: c.max_data_rate,
            region: band.region(),
            band_version: *band.version(),
        }),
    }
}
