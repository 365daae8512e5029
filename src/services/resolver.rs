// src/services/resolver.rs

//! Base URL discovery.
//!
//! Probes an ordered list of candidate origins with a cheap `GET` and
//! remembers the first one that answers 2xx. The cached value lives as
//! long as the resolver; [`BaseUrlResolver::reset`] forgets it.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;
use crate::utils::http::{HttpRequest, Transport};
use crate::utils::url::join;

/// Finds and memoizes a reachable API origin.
pub struct BaseUrlResolver {
    candidates: Vec<String>,
    probe_endpoint: String,
    probe_timeout: Duration,
    transport: Arc<dyn Transport>,
    cached: RwLock<Option<String>>,
}

impl BaseUrlResolver {
    pub fn new(config: &ApiConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            candidates: config.base_urls.clone(),
            probe_endpoint: config.probe_endpoint.clone(),
            probe_timeout: config.probe_timeout(),
            transport,
            cached: RwLock::new(None),
        }
    }

    /// Previously discovered base URL, if any.
    pub fn cached(&self) -> Option<String> {
        self.cached
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Forget the discovered base URL so the next call probes again.
    pub fn reset(&self) {
        *self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Return the cached base URL or probe candidates in order.
    pub async fn resolve(&self) -> Result<String> {
        if let Some(url) = self.cached() {
            return Ok(url);
        }

        for candidate in &self.candidates {
            let probe = join(candidate, &self.probe_endpoint);
            log::debug!("Probing API candidate {}", probe);

            match self
                .transport
                .send(HttpRequest::get(&probe, self.probe_timeout))
                .await
            {
                Ok(response) if response.is_success() => {
                    log::info!("API reachable at {} (HTTP {})", candidate, response.status);
                    return Ok(self.remember(candidate));
                }
                Ok(response) => {
                    log::warn!("API candidate {} answered HTTP {}", candidate, response.status);
                }
                Err(e) => {
                    log::warn!("API candidate {} failed: {}", candidate, e);
                }
            }
        }

        Err(AppError::NoReachableEndpoint {
            tried: self.candidates.clone(),
        })
    }

    /// Set the cache if still empty; concurrent winners keep the first value.
    fn remember(&self, url: &str) -> String {
        let mut guard = self
            .cached
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get_or_insert_with(|| url.to_string()).clone()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::utils::http::HttpResponse;

    /// Answers 200 only for URLs starting with `up`, recording every probe.
    struct Probe {
        up: &'static str,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for Probe {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.seen.lock().unwrap().push(request.url.clone());
            if request.url.starts_with(self.up) {
                Ok(HttpResponse::new(200, "[]"))
            } else {
                Err(AppError::Timeout { url: request.url })
            }
        }
    }

    fn config(candidates: &[&str]) -> ApiConfig {
        ApiConfig {
            base_urls: candidates.iter().map(|c| c.to_string()).collect(),
            ..ApiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_first_reachable_candidate_wins_and_is_cached() {
        let probe = Arc::new(Probe {
            up: "http://b",
            seen: Mutex::new(Vec::new()),
        });
        let resolver = BaseUrlResolver::new(&config(&["http://a/api", "http://b/api"]), probe.clone());

        assert_eq!(resolver.resolve().await.unwrap(), "http://b/api");
        assert_eq!(resolver.resolve().await.unwrap(), "http://b/api");

        let seen = probe.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec!["http://a/api/categories/", "http://b/api/categories/"]
        );
    }

    #[tokio::test]
    async fn test_all_candidates_fail() {
        let probe = Arc::new(Probe {
            up: "http://nowhere",
            seen: Mutex::new(Vec::new()),
        });
        let resolver = BaseUrlResolver::new(&config(&["http://a", "http://b"]), probe);

        match resolver.resolve().await {
            Err(AppError::NoReachableEndpoint { tried }) => assert_eq!(tried.len(), 2),
            other => panic!("expected NoReachableEndpoint, got {other:?}"),
        }
        assert!(resolver.cached().is_none());
    }

    #[tokio::test]
    async fn test_reset_forces_new_probe() {
        let probe = Arc::new(Probe {
            up: "http://a",
            seen: Mutex::new(Vec::new()),
        });
        let resolver = BaseUrlResolver::new(&config(&["http://a"]), probe.clone());

        resolver.resolve().await.unwrap();
        resolver.reset();
        assert!(resolver.cached().is_none());
        resolver.resolve().await.unwrap();

        assert_eq!(probe.seen.lock().unwrap().len(), 2);
    }
}
