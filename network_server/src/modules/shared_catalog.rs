use std::sync::{Arc, PoisonError, RwLock};

use lorawan::regional_parameters::catalog::RegionalCatalog;

/// A regional catalog snapshot and the generation it was published as.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    pub generation: u64,
    pub catalog: Arc<RegionalCatalog>,
}

/// The current regional catalog, replaced as a whole on reload.
///
/// Readers clone the snapshot `Arc` and resolve against it without holding
/// the lock, so a reload never changes a resolution already in flight.
#[derive(Debug)]
pub struct SharedCatalog {
    current: RwLock<CatalogSnapshot>,
}

impl SharedCatalog {
    pub fn new(catalog: RegionalCatalog) -> Self {
        Self {
            current: RwLock::new(CatalogSnapshot { generation: 0, catalog: Arc::new(catalog) }),
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Publishes `catalog` and returns its generation.
    pub fn reload(&self, catalog: RegionalCatalog) -> u64 {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        current.generation += 1;
        current.catalog = Arc::new(catalog);
        log::info!("Regional catalog reloaded, generation {}", current.generation);
        current.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_keeps_old_snapshots_alive() {
        let shared = SharedCatalog::new(RegionalCatalog::builtin().unwrap());
        let before = shared.snapshot();
        assert_eq!(shared.reload(RegionalCatalog::default()), 1);
        let after = shared.snapshot();
        assert_eq!(after.generation, 1);
        assert!(after.catalog.frequency_plans().is_empty());
        assert!(before.catalog.frequency_plans().get_by_id("EU_863_870_TTN").is_ok());
    }
}
