use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_PROFILE: &str = "driving-car";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ORS_API_KEY is not set")]
    MissingApiKey,
    #[error("ORS_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Settings for the OpenRouteService client, handed to it at construction.
#[derive(Clone)]
pub struct RoutingConfig {
    pub api_key: String,
    pub base_url: String,
    pub profile: String,
    /// `None` disables the request timeout.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for RoutingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RoutingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `ORS_TIMEOUT_SECS=0` turns the timeout off.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("ORS_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(url) = lookup("ORS_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(profile) = lookup("ORS_PROFILE") {
            config.profile = profile;
        }
        if let Some(raw) = lookup("ORS_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn directions_url(&self) -> String {
        format!("{}/v2/directions/{}", self.base_url, self.profile)
    }
}

pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key() {
        assert_eq!(
            RoutingConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            RoutingConfig::from_lookup(lookup(&[("ORS_API_KEY", "  ")])).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_defaults() {
        let config = RoutingConfig::from_lookup(lookup(&[("ORS_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(
            config.directions_url(),
            "https://api.openrouteservice.org/v2/directions/driving-car"
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn test_overrides() {
        let config = RoutingConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ORS_BASE_URL", "http://localhost:9000/"),
            ("ORS_PROFILE", "cycling-regular"),
            ("ORS_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(
            config.directions_url(),
            "http://localhost:9000/v2/directions/cycling-regular"
        );
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_invalid_timeout() {
        let err = RoutingConfig::from_lookup(lookup(&[
            ("ORS_API_KEY", "secret"),
            ("ORS_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidTimeout("soon".into()));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = RoutingConfig::new("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
