//! Application configuration
//!
//! Loaded from an optional `config.toml` plus `STOPFINDER_*` environment
//! variables (double-underscore separated, e.g.
//! `STOPFINDER_TRANSIT__API_KEY`). The transit API key may alternatively
//! live in a separate secret file named by `api_key_file`, keeping the key
//! itself out of the main configuration.

use std::fs;
use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use integration_transit::{NominatimConfig, TransitConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Transit provider settings
    #[serde(default)]
    pub transit: TransitSettings,

    /// Geocoding settings
    #[serde(default)]
    pub geocoding: NominatimConfig,
}

/// Transit provider settings as they appear in the configuration file
///
/// Mirrors [`TransitConfig`] and adds the secret-file indirection for the
/// API key; [`to_client_config`](Self::to_client_config) resolves and
/// validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitSettings {
    /// Base URL for the Transit App public API
    #[serde(default = "default_transit_base_url")]
    pub base_url: String,

    /// Static API key, sent as the `apiKey` request header
    #[serde(default)]
    pub api_key: String,

    /// File to read the API key from when `api_key` is empty
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[serde(default = "default_transit_timeout")]
    pub timeout_secs: u64,

    /// Search cutoff in meters for nearby-stop and nearby-route queries
    #[serde(default = "default_transit_radius")]
    pub max_distance_meters: u32,

    /// Ask the provider to refresh realtime data before answering
    #[serde(default = "default_true")]
    pub realtime: bool,
}

fn default_transit_base_url() -> String {
    TransitConfig::default().base_url
}

const fn default_transit_timeout() -> u64 {
    TransitConfig::DEFAULT_TIMEOUT_SECS
}

const fn default_transit_radius() -> u32 {
    TransitConfig::DEFAULT_RADIUS_METERS
}

const fn default_true() -> bool {
    true
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            base_url: default_transit_base_url(),
            api_key: String::new(),
            api_key_file: None,
            timeout_secs: default_transit_timeout(),
            max_distance_meters: default_transit_radius(),
            realtime: default_true(),
        }
    }
}

impl TransitSettings {
    /// Resolve the API key and build a validated client configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the key file cannot be read or
    /// when the resolved configuration is invalid — in particular a
    /// missing/empty API key, which must abort startup rather than surface
    /// per request.
    pub fn to_client_config(&self) -> Result<TransitConfig, ApplicationError> {
        let api_key = self.resolve_api_key()?;

        let client_config = TransitConfig {
            base_url: self.base_url.clone(),
            api_key,
            timeout_secs: self.timeout_secs,
            max_distance_meters: self.max_distance_meters,
            realtime: self.realtime,
        };

        client_config
            .validate()
            .map_err(ApplicationError::Configuration)?;

        Ok(client_config)
    }

    fn resolve_api_key(&self) -> Result<String, ApplicationError> {
        let inline = self.api_key.trim();
        if !inline.is_empty() {
            return Ok(inline.to_string());
        }

        if let Some(path) = &self.api_key_file {
            debug!(path = %path.display(), "Reading transit API key from file");
            let contents = fs::read_to_string(path).map_err(|e| {
                ApplicationError::Configuration(format!(
                    "cannot read api_key_file {}: {e}",
                    path.display()
                ))
            })?;
            return Ok(contents.trim().to_string());
        }

        // Leave the empty key for validate() to report, so the error
        // message is the same for both misconfiguration shapes.
        Ok(String::new())
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when an explicitly given file is missing or when
    /// any source fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file_source)
            // Override with environment variables
            // (e.g. STOPFINDER_TRANSIT__API_KEY)
            .add_source(
                config::Environment::with_prefix("STOPFINDER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
