use std::sync::Arc;

use crate::{
    regional_parameters::{band::Band, region::Region, version::PHYVersion, version_resolver},
    utils::errors::RegionalError,
};

/// All revisions of one region's band, strictly ordered by version.
#[derive(Clone, Debug, PartialEq)]
pub struct BandFamily {
    region: Region,
    bands: Vec<Arc<Band>>,
}

impl BandFamily {
    /// Validates every band and orders them by version. Bands of another
    /// region and repeated versions are rejected.
    pub fn new(region: Region, mut bands: Vec<Band>) -> Result<Self, RegionalError> {
        for band in bands.iter() {
            if band.region() != region {
                return Err(RegionalError::InvalidBand {
                    region: band.region(),
                    version: *band.version(),
                    reason: format!("registered in the {region} family"),
                });
            }
            band.validate()?;
        }
        bands.sort_by(|a, b| a.version().cmp(b.version()));
        if let Some(pair) = bands.windows(2).find(|pair| pair[0].version() == pair[1].version()) {
            return Err(RegionalError::DuplicateBandVersion { region, version: *pair[0].version() });
        }
        if bands.is_empty() {
            log::warn!("Band family {region} has no revisions, every resolution for it will fail");
        }
        Ok(Self {
            region,
            bands: bands.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Revisions in increasing version order.
    pub fn bands(&self) -> &[Arc<Band>] {
        &self.bands
    }

    pub fn versions(&self) -> impl Iterator<Item = &PHYVersion> {
        self.bands.iter().map(|b| b.version())
    }

    pub fn latest(&self) -> Option<&Arc<Band>> {
        self.bands.last()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn get_exact(&self, version: &PHYVersion) -> Result<Arc<Band>, RegionalError> {
        self.bands
            .binary_search_by(|b| b.version().cmp(version))
            .map(|i| Arc::clone(&self.bands[i]))
            .map_err(|_| RegionalError::UnknownBandVersion { region: self.region, version: *version })
    }

    /// See [`version_resolver::resolve`].
    pub fn resolve(&self, requested: &PHYVersion) -> Result<Arc<Band>, RegionalError> {
        version_resolver::resolve(self, requested)
    }
}
