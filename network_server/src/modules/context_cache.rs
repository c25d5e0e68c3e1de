use std::{collections::HashMap, sync::{Mutex, PoisonError}};

use lorawan::{
    regional_parameters::{resolver::ResolvedRegionalContext, version::PHYVersion},
    utils::errors::RegionalError,
};

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    entries: HashMap<(String, PHYVersion), ResolvedRegionalContext>,
}

/// Memoized resolutions keyed by the exact `(plan id, PHY version)` pair.
///
/// Entries belong to one catalog generation and are dropped as soon as a
/// newer generation is seen. Failures are never stored.
#[derive(Debug)]
pub struct ContextCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl ContextCache {
    /// A `capacity` of 0 disables memoization.
    pub fn new(capacity: usize) -> Self {
        Self { capacity, state: Mutex::new(CacheState::default()) }
    }

    pub fn get_or_resolve<F>(
        &self,
        generation: u64,
        plan_id: &str,
        version: &PHYVersion,
        resolve: F,
    ) -> Result<ResolvedRegionalContext, RegionalError>
    where
        F: FnOnce() -> Result<ResolvedRegionalContext, RegionalError>,
    {
        if self.capacity == 0 {
            return resolve();
        }
        let key = (plan_id.to_string(), *version);
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.generation < generation {
                state.generation = generation;
                state.entries.clear();
            }
            if state.generation == generation {
                if let Some(context) = state.entries.get(&key) {
                    return Ok(context.clone());
                }
            }
        }

        // Resolved without the lock held; the result is only kept if no newer
        // generation was published meanwhile.
        let context = resolve()?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == generation {
            if state.entries.len() >= self.capacity && !state.entries.contains_key(&key) {
                if let Some(evicted) = state.entries.keys().next().cloned() {
                    state.entries.remove(&evicted);
                }
            }
            state.entries.insert(key, context.clone());
        }
        Ok(context)
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use lorawan::regional_parameters::catalog::RegionalCatalog;

    use super::*;

    #[test]
    fn hits_skip_resolution() {
        let catalog = RegionalCatalog::builtin().unwrap();
        let cache = ContextCache::new(16);
        let calls = Cell::new(0);
        let version = PHYVersion::V1_0_2_REV_B;
        let resolve = || {
            calls.set(calls.get() + 1);
            catalog.resolver().resolve("EU_863_870_TTN", &version)
        };
        let first = cache.get_or_resolve(0, "EU_863_870_TTN", &version, resolve).unwrap();
        let second = cache.get_or_resolve(0, "EU_863_870_TTN", &version, resolve).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_include_the_exact_version() {
        let catalog = RegionalCatalog::builtin().unwrap();
        let cache = ContextCache::new(16);
        let a = cache
            .get_or_resolve(0, "US_902_928_FSB_2", &PHYVersion::V1_0_1, || {
                catalog.resolver().resolve("US_902_928_FSB_2", &PHYVersion::V1_0_1)
            })
            .unwrap();
        let b = cache
            .get_or_resolve(0, "US_902_928_FSB_2", &PHYVersion::V1_1_REV_A, || {
                catalog.resolver().resolve("US_902_928_FSB_2", &PHYVersion::V1_1_REV_A)
            })
            .unwrap();
        assert_ne!(a.band_version(), b.band_version());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn newer_generation_invalidates_entries() {
        let catalog = RegionalCatalog::builtin().unwrap();
        let cache = ContextCache::new(16);
        let version = PHYVersion::V1_0_2_REV_B;
        let resolve = || catalog.resolver().resolve("EU_863_870_TTN", &version);
        cache.get_or_resolve(0, "EU_863_870_TTN", &version, resolve).unwrap();

        let empty = RegionalCatalog::default();
        let err = cache
            .get_or_resolve(1, "EU_863_870_TTN", &version, || empty.resolver().resolve("EU_863_870_TTN", &version))
            .unwrap_err();
        assert_eq!(err, RegionalError::UnknownFrequencyPlan("EU_863_870_TTN".to_string()));
        assert!(cache.is_empty());

        // A late resolution against the old generation is not cached.
        cache.get_or_resolve(0, "EU_863_870_TTN", &version, resolve).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn full_cache_evicts_a_single_entry() {
        let catalog = RegionalCatalog::builtin().unwrap();
        let cache = ContextCache::new(2);
        let versions = [PHYVersion::V1_0_1, PHYVersion::V1_0_2_REV_B, PHYVersion::V1_1_REV_A];
        for version in versions.iter() {
            cache
                .get_or_resolve(0, "US_902_928_FSB_2", version, || catalog.resolver().resolve("US_902_928_FSB_2", version))
                .unwrap();
        }
        assert_eq!(cache.len(), 2);

        // The latest insertion always survives its own eviction.
        let calls = Cell::new(0);
        let version = PHYVersion::V1_1_REV_A;
        cache
            .get_or_resolve(0, "US_902_928_FSB_2", &version, || {
                calls.set(calls.get() + 1);
                catalog.resolver().resolve("US_902_928_FSB_2", &version)
            })
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_disables_the_cache() {
        let catalog = RegionalCatalog::builtin().unwrap();
        let cache = ContextCache::new(0);
        let version = PHYVersion::V1_0_2_REV_B;
        cache
            .get_or_resolve(0, "EU_863_870_TTN", &version, || catalog.resolver().resolve("EU_863_870_TTN", &version))
            .unwrap();
        assert!(cache.is_empty());
    }
}
