//! Application configuration structures.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Accepted range for `fallback.expiring_within_days`.
const EXPIRING_WINDOW_DAYS: RangeInclusive<i64> = 1..=3650;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend discovery and request settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Display strings used while repairing records
    #[serde(default)]
    pub display: DisplayConfig,

    /// Degraded-mode behavior for read operations
    #[serde(default)]
    pub fallback: FallbackConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_urls.is_empty() {
            return Err(AppError::validation("api.base_urls is empty"));
        }
        for candidate in &self.api.base_urls {
            let parsed = url::Url::parse(candidate).map_err(|e| {
                AppError::validation(format!("api.base_urls entry '{candidate}': {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "api.base_urls entry '{candidate}' must be http or https"
                )));
            }
        }
        if !self.api.probe_endpoint.starts_with('/') {
            return Err(AppError::validation(
                "api.probe_endpoint must start with '/'",
            ));
        }
        if self.api.probe_timeout_secs == 0 {
            return Err(AppError::validation("api.probe_timeout_secs must be > 0"));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(AppError::validation("api.request_timeout_secs must be > 0"));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.display.placeholder_image.trim().is_empty() {
            return Err(AppError::validation("display.placeholder_image is empty"));
        }
        if !EXPIRING_WINDOW_DAYS.contains(&self.fallback.expiring_within_days) {
            return Err(AppError::validation(format!(
                "fallback.expiring_within_days must be within {}..={}",
                EXPIRING_WINDOW_DAYS.start(),
                EXPIRING_WINDOW_DAYS.end()
            )));
        }
        Ok(())
    }
}

/// Backend discovery and request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Ordered base URL candidates, probed first to last
    #[serde(default = "defaults::base_urls")]
    pub base_urls: Vec<String>,

    /// Cheap endpoint used to probe a candidate
    #[serde(default = "defaults::probe_endpoint")]
    pub probe_endpoint: String,

    /// Timeout for a single discovery probe
    #[serde(default = "defaults::probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Timeout for data requests
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_urls: defaults::base_urls(),
            probe_endpoint: defaults::probe_endpoint(),
            probe_timeout_secs: defaults::probe_timeout(),
            request_timeout_secs: defaults::request_timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Strings substituted for missing record fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "defaults::placeholder_image")]
    pub placeholder_image: String,

    /// Unit appended to synthesized sizes ("6x3 m")
    #[serde(default = "defaults::size_unit")]
    pub size_unit: String,

    /// Currency appended to prices
    #[serde(default = "defaults::currency")]
    pub currency: String,

    #[serde(default = "defaults::unspecified_employee")]
    pub unspecified_employee: String,

    #[serde(default = "defaults::fallback_category_name")]
    pub fallback_category_name: String,

    #[serde(default = "defaults::fallback_category_icon")]
    pub fallback_category_icon: String,

    #[serde(default = "defaults::fallback_category_color")]
    pub fallback_category_color: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_image: defaults::placeholder_image(),
            size_unit: defaults::size_unit(),
            currency: defaults::currency(),
            unspecified_employee: defaults::unspecified_employee(),
            fallback_category_name: defaults::fallback_category_name(),
            fallback_category_icon: defaults::fallback_category_icon(),
            fallback_category_color: defaults::fallback_category_color(),
        }
    }
}

/// Degraded-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Serve mock data when a read fails
    #[serde(default = "defaults::fallback_enabled")]
    pub enabled: bool,

    /// Window used by the mock expiring-soon query
    #[serde(default = "defaults::expiring_within_days")]
    pub expiring_within_days: i64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::fallback_enabled(),
            expiring_within_days: defaults::expiring_within_days(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn base_urls() -> Vec<String> {
        vec![
            "https://api.location.utu-ranch.uz/api".into(),
            "https://api.location.utu-ranch.uz".into(),
            "http://api.location.utu-ranch.uz/api".into(),
            "http://api.location.utu-ranch.uz".into(),
        ]
    }
    pub fn probe_endpoint() -> String {
        "/categories/".into()
    }
    pub fn probe_timeout() -> u64 {
        5
    }
    pub fn request_timeout() -> u64 {
        10
    }
    pub fn user_agent() -> String {
        concat!("billboard-api/", env!("CARGO_PKG_VERSION")).into()
    }

    // Display defaults
    pub fn placeholder_image() -> String {
        "/placeholder.svg?height=400&width=600".into()
    }
    pub fn size_unit() -> String {
        "m".into()
    }
    pub fn currency() -> String {
        "sum".into()
    }
    pub fn unspecified_employee() -> String {
        "Not specified".into()
    }
    pub fn fallback_category_name() -> String {
        "Advertising structure".into()
    }
    pub fn fallback_category_icon() -> String {
        "monitor".into()
    }
    pub fn fallback_category_color() -> String {
        "#3b82f6".into()
    }

    // Fallback defaults
    pub fn fallback_enabled() -> bool {
        true
    }
    pub fn expiring_within_days() -> i64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_candidates() {
        let mut config = Config::default();
        config.api.base_urls.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_http_candidate() {
        let mut config = Config::default();
        config.api.base_urls = vec!["ftp://example.com/api".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.probe_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_expiring_window() {
        let mut config = Config::default();
        for days in [0, -5, 3651, i64::MAX] {
            config.fallback.expiring_within_days = days;
            assert!(config.validate().is_err(), "accepted {days}");
        }
        config.fallback.expiring_within_days = 3650;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_urls = ["http://localhost:8000/api"]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_urls, vec!["http://localhost:8000/api"]);
        assert_eq!(config.api.probe_timeout_secs, 5);
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.display.fallback_category_name, "Advertising structure");
        assert!(config.fallback.enabled);
    }
}
