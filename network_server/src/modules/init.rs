use lorawan::{
    frequency_plans::{builtin_descriptions, FrequencyPlanDescription},
    regional_parameters::catalog::RegionalCatalog,
};

use crate::modules::{
    config::{EventsBackendKind, FrequencyPlansConfig, RedisConfig, ServiceBase},
    error::NSError,
};

/// Events backend selected at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventsBackend {
    Internal,
    Redis(RedisConfig),
}

/// Resolves the shared configuration. Must complete before the server is ready.
pub fn initialize(config: &mut ServiceBase) -> Result<EventsBackend, NSError> {
    if config.cache.redis.is_zero() {
        log::debug!("Cache Redis configuration unset, using the default Redis configuration");
        config.cache.redis = config.redis.clone();
    }
    if config.events.redis.is_zero() {
        log::debug!("Events Redis configuration unset, using the default Redis configuration");
        config.events.redis = config.redis.clone();
    }
    initialize_events(config)
}

fn initialize_events(config: &ServiceBase) -> Result<EventsBackend, NSError> {
    match config.events.backend {
        EventsBackendKind::Internal => {
            log::info!("Using the internal events backend");
            Ok(EventsBackend::Internal)
        }
        EventsBackendKind::Redis if config.events.redis.address.is_empty() => Err(NSError::EventsBackendUnavailable(
            "the redis events backend needs a redis address".to_string(),
        )),
        EventsBackendKind::Redis => {
            log::info!("Using the redis events backend at {}", config.events.redis.address);
            Ok(EventsBackend::Redis(config.events.redis.clone()))
        }
    }
}

/// Loads and validates the bands and frequency plans.
pub async fn load_catalog(config: &FrequencyPlansConfig) -> Result<RegionalCatalog, NSError> {
    let mut descriptions = if config.include_builtin { builtin_descriptions()? } else { Vec::new() };
    if let Some(path) = &config.path {
        let content = tokio::fs::read_to_string(path).await?;
        let configured: Vec<FrequencyPlanDescription> = serde_json::from_str(&content)?;
        log::info!("Loaded {} frequency plans from {path}", configured.len());
        descriptions.extend(configured);
    }
    if descriptions.is_empty() {
        return Err(NSError::ConfigurationMissing("no frequency plans configured".to_string()));
    }
    let catalog = RegionalCatalog::with_frequency_plans(descriptions)?;
    log::info!(
        "Regional catalog ready: {} band revisions, {} frequency plans",
        catalog.bands().len(),
        catalog.frequency_plans().len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redis(address: &str) -> RedisConfig {
        RedisConfig { address: address.to_string(), ..Default::default() }
    }

    #[test]
    fn unset_backends_fall_back_to_default_redis() {
        let mut config = ServiceBase { redis: redis("localhost:6379"), ..Default::default() };
        assert_eq!(initialize(&mut config).unwrap(), EventsBackend::Internal);
        assert_eq!(config.cache.redis, redis("localhost:6379"));
        assert_eq!(config.events.redis, redis("localhost:6379"));
    }

    #[test]
    fn configured_backends_are_kept() {
        let mut config = ServiceBase { redis: redis("localhost:6379"), ..Default::default() };
        config.cache.redis = redis("cache:6379");
        config.events.redis = redis("events:6379");
        config.events.backend = EventsBackendKind::Redis;
        assert_eq!(initialize(&mut config).unwrap(), EventsBackend::Redis(redis("events:6379")));
        assert_eq!(config.cache.redis, redis("cache:6379"));
    }

    #[test]
    fn redis_events_need_an_address() {
        let mut config = ServiceBase::default();
        config.events.backend = EventsBackendKind::Redis;
        assert!(matches!(initialize(&mut config), Err(NSError::EventsBackendUnavailable(_))));
    }

    #[tokio::test]
    async fn catalog_needs_frequency_plans() {
        let config = FrequencyPlansConfig { include_builtin: false, path: None };
        assert!(matches!(load_catalog(&config).await, Err(NSError::ConfigurationMissing(_))));

        let catalog = load_catalog(&FrequencyPlansConfig::default()).await.unwrap();
        assert!(catalog.frequency_plans().get_by_id("EU_863_870_TTN").is_ok());
    }
}
