/// Client configuration.
///
/// Mirrors the layering used by the original deployment: compiled-in
/// defaults, then an optional TOML file, then environment overrides (the
/// binary loads `.env` before this module runs). The `use_mock_data` switch
/// is read by the data source on every call — changing the config between
/// calls changes the behavior of the next call.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/javaweb";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable names recognized by `apply_env_overrides`.
pub const ENV_BASE_URL: &str = "EVCHARGE_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "EVCHARGE_TIMEOUT_MS";
pub const ENV_USE_MOCK_DATA: &str = "EVCHARGE_USE_MOCK_DATA";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout for every remote call.
    pub timeout_ms: u64,
    /// When set, the data source answers from the static dataset without
    /// touching the network.
    pub use_mock_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            use_mock_data: false,
        }
    }
}

impl ApiConfig {
    /// Parses a TOML configuration file. Missing keys fall back to the
    /// defaults above.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config file {}: {}", path.display(), e))?;
        toml::from_str(&raw)
            .map_err(|e| format!("cannot parse config file {}: {}", path.display(), e))
    }

    /// Loads configuration: the file at `path` if given, defaults otherwise,
    /// with environment overrides applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Applies `EVCHARGE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Override application with an injected lookup, so tests can exercise
    /// the logic without mutating the process environment.
    pub fn apply_overrides_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_MS) {
            if let Ok(ms) = raw.parse::<u64>() {
                self.timeout_ms = ms;
            }
        }
        if let Some(raw) = get(ENV_USE_MOCK_DATA) {
            self.use_mock_data = matches!(raw.as_str(), "1" | "true" | "yes");
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------

/// REST endpoint paths, defined once so the client and the diagnostics
/// probes agree on them.
pub mod endpoints {
    pub const STATIONS_LIST: &str = "/api/stations";
    pub const STATIONS_SEARCH: &str = "/api/stations/search";
    pub const STATIONS_NEARBY: &str = "/api/stations/nearby";

    pub fn station_detail(id: u32) -> String {
        format!("/api/stations/{}", id)
    }

    pub const BOOKINGS: &str = "/api/bookings";

    pub fn booking_detail(id: u32) -> String {
        format!("/api/bookings/{}", id)
    }

    pub fn booking_cancel(id: u32) -> String {
        format!("/api/bookings/{}/cancel", id)
    }

    pub const USER_PROFILE: &str = "/api/users/profile";
    pub const USER_RECHARGE: &str = "/api/users/recharge";

    pub const AUTH_LOGIN: &str = "/api/auth/login";
    pub const AUTH_REGISTER: &str = "/api/auth/register";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert!(!config.use_mock_data);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: ApiConfig = toml::from_str("use_mock_data = true").unwrap();
        assert!(config.use_mock_data);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_full_toml() {
        let raw = r#"
            base_url = "https://charge.example.com/api-root"
            timeout_ms = 2500
            use_mock_data = false
        "#;
        let config: ApiConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.base_url, "https://charge.example.com/api-root");
        assert_eq!(config.timeout_ms, 2500);
        assert!(!config.use_mock_data);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ApiConfig::default();
        config.apply_overrides_from(|name| match name {
            ENV_BASE_URL => Some("http://10.0.0.2:8080/javaweb/".to_string()),
            ENV_TIMEOUT_MS => Some("500".to_string()),
            ENV_USE_MOCK_DATA => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://10.0.0.2:8080/javaweb");
        assert_eq!(config.timeout_ms, 500);
        assert!(config.use_mock_data);
    }

    #[test]
    fn test_invalid_timeout_override_is_ignored() {
        let mut config = ApiConfig::default();
        config.apply_overrides_from(|name| {
            (name == ENV_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let mut config = ApiConfig::default();
        config.base_url = "http://localhost:8080/javaweb/".to_string();
        assert_eq!(
            config.url(endpoints::STATIONS_LIST),
            "http://localhost:8080/javaweb/api/stations"
        );
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoints::station_detail(7), "/api/stations/7");
        assert_eq!(endpoints::booking_cancel(3), "/api/bookings/3/cancel");
    }
}
