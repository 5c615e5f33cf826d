//! Transit provider configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Transit App public API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL for the Transit App public API
    #[serde(default = "transit_base_url")]
    pub base_url: String,

    /// Static API key, sent as the `apiKey` request header
    ///
    /// Required: an empty key fails [`validate`](Self::validate), which
    /// makes client construction a fatal startup error rather than a
    /// per-request failure.
    #[serde(default)]
    pub api_key: String,

    /// Bounded wait for each request, in seconds
    #[serde(default = "request_timeout")]
    pub timeout_secs: u64,

    /// Search cutoff in meters for nearby-stop and nearby-route queries
    #[serde(default = "search_radius")]
    pub max_distance_meters: u32,

    /// Ask the provider to refresh realtime data before answering
    #[serde(default = "realtime_on")]
    pub realtime: bool,
}

fn transit_base_url() -> String {
    "https://external.transitapp.com/v3/public".to_string()
}

const fn request_timeout() -> u64 {
    TransitConfig::DEFAULT_TIMEOUT_SECS
}

const fn search_radius() -> u32 {
    TransitConfig::DEFAULT_RADIUS_METERS
}

const fn realtime_on() -> bool {
    true
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: transit_base_url(),
            api_key: String::new(),
            timeout_secs: request_timeout(),
            max_distance_meters: search_radius(),
            realtime: true,
        }
    }
}

impl TransitConfig {
    /// Default search radius for nearby-stop and nearby-route queries
    pub const DEFAULT_RADIUS_METERS: u32 = 1_000;

    /// Provider-imposed ceiling on the search radius
    pub const MAX_RADIUS_METERS: u32 = 1_500;

    /// Default bounded wait for each request, in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid field; a missing or
    /// empty API key is the case that must abort startup.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("transit base_url must not be empty".to_string());
        }

        if self.api_key.trim().is_empty() {
            return Err("transit API key is missing or empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("transit timeout_secs must be positive".to_string());
        }

        if !(1..=Self::MAX_RADIUS_METERS).contains(&self.max_distance_meters) {
            return Err(format!(
                "max_distance_meters must be between 1 and {}",
                Self::MAX_RADIUS_METERS
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_documented_surface() {
        let config = TransitConfig::default();
        assert_eq!(config.base_url, "https://external.transitapp.com/v3/public");
        assert_eq!(config.timeout_secs, TransitConfig::DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.max_distance_meters,
            TransitConfig::DEFAULT_RADIUS_METERS
        );
        assert!(config.realtime);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_testing_config_passes_validation() {
        assert!(TransitConfig::for_testing().validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let message = TransitConfig::default().validate().unwrap_err();
        assert!(message.contains("API key"));
    }

    #[test]
    fn test_whitespace_api_key_fails_validation() {
        let config = TransitConfig {
            api_key: " \t ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_fails_validation() {
        let config = TransitConfig {
            timeout_secs: 0,
            ..TransitConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_radius_must_stay_under_provider_ceiling() {
        let over = TransitConfig {
            max_distance_meters: TransitConfig::MAX_RADIUS_METERS + 1,
            ..TransitConfig::for_testing()
        };
        assert!(over.validate().is_err());

        let at_cap = TransitConfig {
            max_distance_meters: TransitConfig::MAX_RADIUS_METERS,
            ..TransitConfig::for_testing()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_zero_radius_fails_validation() {
        let config = TransitConfig {
            max_distance_meters: 0,
            ..TransitConfig::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_fields() {
        let config = TransitConfig::for_testing();
        let json = serde_json::to_string(&config).unwrap();
        let back: TransitConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_key, config.api_key);
        assert_eq!(back.max_distance_meters, config.max_distance_meters);
    }

    #[test]
    fn test_empty_json_fills_every_default() {
        let config: TransitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.base_url, TransitConfig::default().base_url);
        assert_eq!(
            config.max_distance_meters,
            TransitConfig::DEFAULT_RADIUS_METERS
        );
    }
}
