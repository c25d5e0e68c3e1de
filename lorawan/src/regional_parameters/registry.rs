use std::{collections::{BTreeMap, HashMap}, sync::Arc};

use crate::{
    regional_parameters::{band::Band, band_family::BandFamily, definitions, region::Region, version::PHYVersion},
    utils::errors::RegionalError,
};

/// Immutable catalog of band families, keyed by region.
#[derive(Clone, Debug, Default)]
pub struct BandRegistry {
    families: HashMap<Region, BandFamily>,
}

impl BandRegistry {
    /// Groups `bands` into families, validating every band.
    pub fn new(bands: Vec<Band>) -> Result<Self, RegionalError> {
        let mut grouped: BTreeMap<Region, Vec<Band>> = BTreeMap::new();
        for band in bands {
            grouped.entry(band.region()).or_default().push(band);
        }
        let families = grouped
            .into_iter()
            .map(|(region, bands)| BandFamily::new(region, bands))
            .collect::<Result<Vec<BandFamily>, RegionalError>>()?;
        Self::from_families(families)
    }

    pub fn from_families(families: Vec<BandFamily>) -> Result<Self, RegionalError> {
        let mut registry = Self::default();
        for family in families {
            let region = family.region();
            if registry.families.insert(region, family).is_some() {
                return Err(RegionalError::DuplicateBandFamily(region));
            }
        }
        Ok(registry)
    }

    /// The compiled-in regional parameters.
    pub fn builtin() -> Result<Self, RegionalError> {
        let registry = Self::new(definitions::all())?;
        log::info!("Loaded {} band revisions across {} regions", registry.len(), registry.families.len());
        Ok(registry)
    }

    pub fn get_family(&self, region: Region) -> Result<&BandFamily, RegionalError> {
        self.families.get(&region).ok_or(RegionalError::UnknownRegion(region))
    }

    pub fn get_exact(&self, region: Region, version: &PHYVersion) -> Result<Arc<Band>, RegionalError> {
        self.get_family(region)?.get_exact(version)
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.families.keys().copied()
    }

    /// Number of band revisions over all families.
    pub fn len(&self) -> usize {
        self.families.values().map(BandFamily::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
