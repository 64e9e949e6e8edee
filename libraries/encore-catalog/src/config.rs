//! Client settings
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables (`ENCORE_SERVER_URL`, `ENCORE_TIMEOUTS_REQUEST`, ...).

use crate::error::Result;
use crate::types::ServerConfig;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_FILE: &str = "encore.toml";
const ENV_PREFIX: &str = "ENCORE";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClientSettings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default = "default_timeouts")]
    pub timeouts: TimeoutSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_client")]
    pub client: ClientIdentity,
}

/// HTTP timeouts in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimeoutSettings {
    #[serde(default = "default_request_timeout")]
    pub request: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Track References kept by `CachedResolver`
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientIdentity {
    /// Sent as the Subsonic `c` parameter
    #[serde(default = "default_client_name")]
    pub name: String,
}

impl ClientSettings {
    /// Load from `encore.toml` (if present) and `ENCORE_*` variables
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_FILE);
        let file = path.exists().then_some(path);
        Self::load_with(file.as_deref(), ENV_PREFIX)
    }

    /// Load from a specific file and `ENCORE_*` variables
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with(Some(path), ENV_PREFIX)
    }

    /// Load from an optional file and variables under `env_prefix`
    pub fn load_with(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        Self::finish(builder, Some(env_prefix))
    }

    /// Parse TOML text, ignoring the environment
    pub fn from_toml(text: &str) -> Result<Self> {
        let builder = Config::builder().add_source(File::from_str(text, FileFormat::Toml));
        Self::finish(builder, None)
    }

    fn finish(mut builder: ConfigBuilder<DefaultState>, env_prefix: Option<&str>) -> Result<Self> {
        if let Some(prefix) = env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix)
                    .separator("_")
                    .try_parsing(true),
            );
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        tracing::debug!(
            url = %settings.server.url,
            client = %settings.client.name,
            "Loaded client settings"
        );
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connect)
    }

    /// Cache capacity, at least one entry
    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache.capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            timeouts: default_timeouts(),
            cache: default_cache(),
            client: default_client(),
        }
    }
}

// Default values
fn default_timeouts() -> TimeoutSettings {
    TimeoutSettings {
        request: default_request_timeout(),
        connect: default_connect_timeout(),
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        capacity: default_cache_capacity(),
    }
}

fn default_cache_capacity() -> usize {
    512
}

fn default_client() -> ClientIdentity {
    ClientIdentity {
        name: default_client_name(),
    }
}

fn default_client_name() -> String {
    "Encore".to_string()
}
