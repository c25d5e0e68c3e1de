use std::path::Path;

use lorawan::device::Device;
use serde::{Deserialize, Serialize};

use crate::modules::error::NSError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub address: String,
    pub database: u8,
    pub namespace: Vec<String>,
    pub password: Option<String>,
    pub pool_size: u16,
}

impl RedisConfig {
    /// An unset configuration, which falls back to the service default.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub redis: RedisConfig,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventsBackendKind {
    #[default]
    Internal,
    Redis,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    pub backend: EventsBackendKind,
    pub redis: RedisConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrequencyPlansConfig {
    /// Load the compiled-in plans, which configured plans may extend.
    pub include_builtin: bool,
    /// JSON file with an array of frequency plan descriptions.
    pub path: Option<String>,
}

impl Default for FrequencyPlansConfig {
    fn default() -> Self {
        Self { include_builtin: true, path: None }
    }
}

/// Configuration shared by the network server components.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceBase {
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    pub events: EventsConfig,
    pub frequency_plans: FrequencyPlansConfig,
    /// Maximum number of memoized regional contexts, 0 disables the cache.
    pub context_cache_size: usize,
    pub devices: Vec<Device>,
}

impl Default for ServiceBase {
    fn default() -> Self {
        Self {
            redis: RedisConfig::default(),
            cache: CacheConfig::default(),
            events: EventsConfig::default(),
            frequency_plans: FrequencyPlansConfig::default(),
            context_cache_size: 4096,
            devices: Vec::new(),
        }
    }
}

impl ServiceBase {
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, NSError> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
