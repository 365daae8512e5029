// src/config.rs

//! Configuration loading utilities.
//!
//! Settings come from a TOML file (falling back to defaults when it is
//! missing or malformed), then from the environment, and are validated
//! last.

use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::Config;

/// Comma-separated list of base URL candidates, tried in order.
pub const URL_ENV: &str = "BILLBOARD_API_URL";
/// Per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "BILLBOARD_API_TIMEOUT";

/// Load configuration from `path`, apply environment overrides and validate.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path);
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Apply overrides looked up through `lookup`.
pub fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
    if let Some(value) = lookup(URL_ENV) {
        let candidates: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .collect();
        if candidates.is_empty() {
            log::warn!("{URL_ENV} is set but empty; keeping configured candidates");
        } else {
            log::debug!("{URL_ENV} overrides base URLs: {candidates:?}");
            config.api.base_urls = candidates;
        }
    }

    if let Some(value) = lookup(TIMEOUT_ENV) {
        let secs = value
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::config(format!("{TIMEOUT_ENV}='{value}': {e}")))?;
        config.api.request_timeout_secs = secs;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_url_override_splits_candidates() {
        let mut config = Config::default();
        apply_overrides(
            &mut config,
            env(&[(URL_ENV, "http://a.local/api/, http://b.local ,")]),
        )
        .unwrap();
        assert_eq!(
            config.api.base_urls,
            vec!["http://a.local/api", "http://b.local"]
        );
    }

    #[test]
    fn test_blank_url_override_ignored() {
        let mut config = Config::default();
        let before = config.api.base_urls.clone();
        apply_overrides(&mut config, env(&[(URL_ENV, " , ")])).unwrap();
        assert_eq!(config.api.base_urls, before);
    }

    #[test]
    fn test_timeout_override() {
        let mut config = Config::default();
        apply_overrides(&mut config, env(&[(TIMEOUT_ENV, "3")])).unwrap();
        assert_eq!(config.api.request_timeout_secs, 3);

        let err = apply_overrides(&mut config, env(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let mut config = Config::default();
        apply_overrides(&mut config, env(&[])).unwrap();
        assert_eq!(config.api.request_timeout_secs, 10);
        assert_eq!(config.api.base_urls.len(), 4);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_urls = [\"http://localhost:8000/api\"]\n\n[fallback]\nenabled = false"
        )
        .unwrap();

        let mut config = Config::load(file.path()).unwrap();
        apply_overrides(&mut config, env(&[])).unwrap();
        config.validate().unwrap();
        assert_eq!(config.api.base_urls, vec!["http://localhost:8000/api"]);
        assert!(!config.fallback.enabled);
        assert_eq!(config.api.probe_endpoint, "/categories/");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_or_default("/nonexistent/billboard.toml");
        assert!(config.fallback.enabled);
    }
}
