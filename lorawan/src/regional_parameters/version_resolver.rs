use std::sync::Arc;

use crate::{
    regional_parameters::{band::Band, band_family::BandFamily, version::PHYVersion},
    utils::errors::RegionalError,
};

/// Selects the band revision that governs a device implementing `requested`.
///
/// An exact match wins. Otherwise the greatest revision strictly older than
/// `requested` applies, so a device ahead of every known revision gets the
/// newest one. A device older than every revision gets the oldest one.
/// Fails with `NoCompatibleBandVersion` only when the family is empty, which
/// a validated registry never produces.
pub fn resolve(family: &BandFamily, requested: &PHYVersion) -> Result<Arc<Band>, RegionalError> {
    let bands = family.bands();
    match bands.binary_search_by(|b| b.version().cmp(requested)) {
        Ok(i) => Ok(Arc::clone(&bands[i])),
        Err(_) if bands.is_empty() => {
            Err(RegionalError::NoCompatibleBandVersion { region: family.region(), requested: *requested })
        }
        Err(0) => {
            let band = &bands[0];
            log::warn!(
                "PHY version {requested} predates every {} band, using the oldest revision {}",
                family.region(),
                band.version()
            );
            Ok(Arc::clone(band))
        }
        Err(i) => {
            let band = &bands[i - 1];
            log::debug!("No {} band for PHY version {requested}, falling back to {}", family.region(), band.version());
            Ok(Arc::clone(band))
        }
    }
}
