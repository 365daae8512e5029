// src/services/executor.rs

//! Typed request execution against the resolved base URL.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::services::resolver::BaseUrlResolver;
use crate::utils::http::{HttpRequest, Method, Transport};
use crate::utils::url::{join, with_query};

/// Issues JSON requests and translates failures into [`AppError`].
pub struct RequestExecutor {
    resolver: Arc<BaseUrlResolver>,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(
        resolver: Arc<BaseUrlResolver>,
        transport: Arc<dyn Transport>,
        timeout: Duration,
    ) -> Self {
        Self {
            resolver,
            transport,
            timeout,
        }
    }

    /// `GET` an endpoint and parse the body as `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.request(Method::Get, endpoint, query, None).await
    }

    /// Perform one call and parse the JSON body as `T`.
    ///
    /// An empty body (e.g. `204 No Content`) parses as JSON `null`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T> {
        let base = self.resolver.resolve().await?;
        let url = with_query(&join(&base, endpoint), query);

        let mut request = HttpRequest::new(method, &url, self.timeout);
        if let Some(body) = body {
            request = request.with_body(body);
        }

        log::debug!("{:?} {}", method, url);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            log::debug!("{:?} {} -> HTTP {}", method, url, response.status);
            return Err(AppError::Http {
                status: response.status,
                body: response.body,
            });
        }

        let text = response.body.trim();
        let text = if text.is_empty() { "null" } else { text };
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::ApiConfig;
    use crate::utils::http::HttpResponse;

    struct Fixed {
        status: u16,
        body: &'static str,
        requests: Mutex<Vec<HttpRequest>>,
    }

    #[async_trait]
    impl Transport for Fixed {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let probe = request.url.ends_with("/categories/") && request.body.is_none();
            self.requests.lock().unwrap().push(request);
            if probe {
                return Ok(HttpResponse::new(200, "[]"));
            }
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn executor(status: u16, body: &'static str) -> (RequestExecutor, Arc<Fixed>) {
        let transport = Arc::new(Fixed {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        });
        let config = ApiConfig {
            base_urls: vec!["http://api.test/api".into()],
            ..ApiConfig::default()
        };
        let resolver = Arc::new(BaseUrlResolver::new(&config, transport.clone()));
        (
            RequestExecutor::new(resolver, transport.clone(), config.request_timeout()),
            transport,
        )
    }

    #[tokio::test]
    async fn test_get_builds_url_and_parses() {
        let (executor, transport) = executor(200, r#"{"total": 3}"#);
        let value: Value = executor
            .get("/billboards/", &[("status", "active".to_string())])
            .await
            .unwrap();
        assert_eq!(value["total"], 3);

        let requests = transport.requests.lock().unwrap();
        let last = requests.last().unwrap();
        assert_eq!(last.url, "http://api.test/api/billboards/?status=active");
        assert_eq!(last.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_non_success_becomes_http_error() {
        let (executor, _) = executor(500, "boom");
        let result: Result<Value> = executor.get("/billboards/statistics/", &[]).await;
        match result {
            Err(AppError::Http { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_body_parses_as_unit() {
        let (executor, _) = executor(204, "");
        let result: Result<()> = executor
            .request(Method::Delete, "/billboards/4/", &[], None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let (executor, _) = executor(200, "<html>maintenance</html>");
        let result: Result<Value> = executor.get("/billboards/", &[]).await;
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
