use crate::{
    frequency_plans::{FrequencyPlanDescription, Store, builtin_descriptions},
    regional_parameters::{registry::BandRegistry, resolver::DeviceRegionalContextResolver},
    utils::errors::RegionalError,
};

/// A consistent pair of band registry and frequency plan store.
#[derive(Clone, Debug, Default)]
pub struct RegionalCatalog {
    bands: BandRegistry,
    frequency_plans: Store,
}

impl RegionalCatalog {
    pub fn new(bands: BandRegistry, frequency_plans: Store) -> Self {
        Self { bands, frequency_plans }
    }

    /// Builtin bands and builtin frequency plans.
    pub fn builtin() -> Result<Self, RegionalError> {
        Self::with_frequency_plans(builtin_descriptions()?)
    }

    /// Builtin bands with the given frequency plans.
    pub fn with_frequency_plans(descriptions: Vec<FrequencyPlanDescription>) -> Result<Self, RegionalError> {
        let bands = BandRegistry::builtin()?;
        let frequency_plans = Store::from_descriptions(descriptions)?;
        let unknown = frequency_plans
            .ids()
            .filter_map(|id| frequency_plans.get_by_id(id).ok())
            .filter(|plan| bands.get_family(plan.region()).is_err());
        for plan in unknown {
            log::warn!("Frequency plan {} references region {} without bands", plan.id(), plan.region());
        }
        Ok(Self { bands, frequency_plans })
    }

    pub fn bands(&self) -> &BandRegistry {
        &self.bands
    }

    pub fn frequency_plans(&self) -> &Store {
        &self.frequency_plans
    }

    pub fn resolver(&self) -> DeviceRegionalContextResolver<'_> {
        DeviceRegionalContextResolver::new(&self.bands, &self.frequency_plans)
    }
}
