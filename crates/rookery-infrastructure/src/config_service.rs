//! Configuration service implementation.
//!
//! Loads the client configuration from ~/.config/rookery/config.toml and
//! resolves the GraphQL endpoint with the priority:
//! explicit override > `ROOKERY_GRAPHQL_URL` environment variable >
//! config file > compiled default.

use crate::paths::RookeryPaths;
use rookery_core::config::ClientConfig;
use rookery_core::{Result, RookeryError};
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variable overriding the configured endpoint.
pub const GRAPHQL_URL_ENV: &str = "ROOKERY_GRAPHQL_URL";

/// Configuration service that loads and caches the client configuration.
///
/// Reads config.toml once and caches the result to avoid repeated file
/// I/O; `invalidate_cache` forces a reload on next access.
#[derive(Debug, Clone, Default)]
pub struct ConfigService {
    /// Cached configuration loaded from file.
    /// Uses RwLock for thread-safe lazy loading.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a new ConfigService. The configuration is loaded lazily on
    /// first access.
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the client configuration, loading from file if not cached.
    ///
    /// A missing or unreadable config file degrades to the defaults; the
    /// client must stay usable without any configuration on disk.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap();
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = Self::load_config().unwrap_or_else(|err| {
            tracing::warn!(%err, "config load failed, using defaults");
            ClientConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap();
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap();
        *write_lock = None;
    }

    /// Resolves the GraphQL endpoint, applying the override priority.
    ///
    /// # Arguments
    ///
    /// * `override_url` - An explicit endpoint (e.g. from a CLI flag)
    ///   that wins over every other source when present.
    pub fn resolve_endpoint(&self, override_url: Option<&str>) -> String {
        if let Some(url) = override_url {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(GRAPHQL_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }
        self.get_config().graphql_url().to_string()
    }

    fn load_config() -> Result<ClientConfig> {
        let path = RookeryPaths::config_file().map_err(|e| RookeryError::config(e.to_string()))?;
        Self::load_from(&path)
    }

    /// Loads a config file. A missing file degrades to the defaults; an
    /// unreadable or malformed one is a configuration error.
    fn load_from(path: &Path) -> Result<ClientConfig> {
        if !path.exists() {
            return Ok(ClientConfig::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| {
            RookeryError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            RookeryError::config(format!("invalid config {}: {}", path.display(), e))
        })
    }
}
