// src/services/api.rs

//! Public data access operations.
//!
//! Reads try the live backend (resolve base URL, request, normalize) and
//! fall back to [`MockData`] on any failure, logging a warning. Writes
//! never fall back: a failed create/update/delete is returned to the
//! caller unchanged.

use std::future::Future;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{
    Billboard, BillboardInput, BillboardQuery, Category, Collection, Config, Contractor, Employee,
    HealthState, HealthStatus, Page, RawBillboard, Statistics,
};
use crate::services::executor::RequestExecutor;
use crate::services::mock::MockData;
use crate::services::normalize::{Normalizer, PLACEHOLDER_SLUG, decode_all};
use crate::services::resolver::BaseUrlResolver;
use crate::utils::http::{Method, ReqwestTransport, Transport};

const BILLBOARDS: &str = "/billboards/";
const STATISTICS: &str = "/billboards/statistics/";
const EXPIRING_SOON: &str = "/billboards/expiring_soon/";
const CATEGORIES: &str = "/categories/";
const CONTRACTORS: &str = "/contractors/";
const EMPLOYEES: &str = "/employees/";

/// Everything the dashboard needs on first load.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    pub health: HealthStatus,
    pub categories: Vec<Category>,
    pub employees: Vec<Employee>,
    pub statistics: Statistics,
}

/// Data access layer for the advertising structures backend.
pub struct ApiService {
    config: Arc<Config>,
    resolver: Arc<BaseUrlResolver>,
    executor: RequestExecutor,
    mock: MockData,
}

impl ApiService {
    /// Create a service talking HTTP through reqwest.
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.api)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a service over any transport, with the standard mock fixture.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        let mock = MockData::new(today());
        Self::with_parts(config, transport, mock)
    }

    pub fn with_parts(config: Config, transport: Arc<dyn Transport>, mock: MockData) -> Self {
        let resolver = Arc::new(BaseUrlResolver::new(&config.api, Arc::clone(&transport)));
        let executor = RequestExecutor::new(
            Arc::clone(&resolver),
            transport,
            config.api.request_timeout(),
        );
        Self {
            config: Arc::new(config),
            resolver,
            executor,
            mock,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolver(&self) -> &BaseUrlResolver {
        &self.resolver
    }

    /// Cached or freshly probed base URL.
    pub async fn resolve_base_url(&self) -> Result<String> {
        self.resolver.resolve().await
    }

    /// Probe the backend for a status banner. Never fails.
    pub async fn check_api_health(&self) -> HealthStatus {
        match self.resolver.resolve().await {
            Ok(url) => HealthStatus {
                status: HealthState::Ok,
                message: format!("API available at {url}"),
            },
            Err(e) => HealthStatus {
                status: HealthState::Error,
                message: format!("API unavailable, showing demonstration data: {e}"),
            },
        }
    }

    // --- Reads (fall back to mock data) ---

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_fallback(
            "list_categories",
            async {
                let body: Value = self.executor.get(CATEGORIES, &[]).await?;
                let items = Collection::decode(body)?.into_items();
                Ok::<_, AppError>(decode_all::<Category>(items, "category"))
            },
            || self.mock.categories(),
        )
        .await
    }

    /// One page of billboards matching `query`.
    ///
    /// Page 1 is meant to replace the caller's list, later pages to be
    /// appended to it.
    pub async fn list_billboards(&self, query: &BillboardQuery) -> Result<Page<Billboard>> {
        let normalizer = self.normalizer();
        self.with_fallback(
            "list_billboards",
            async {
                let body: Value = self.executor.get(BILLBOARDS, &query.to_pairs()).await?;
                let mut page = Collection::decode(body)?
                    .map_items(|items| normalizer.billboards(items))
                    .into_page();
                self.resolve_categories(&mut page.items).await;
                retain_category(&mut page, query);
                Ok::<_, AppError>(page)
            },
            || self.mock.billboards(&normalizer, query),
        )
        .await
    }

    pub async fn get_billboard(&self, id: i64) -> Result<Billboard> {
        let normalizer = self.normalizer();
        let live = async {
            let raw: RawBillboard = self.executor.get(&billboard_path(id), &[]).await?;
            let mut billboard = normalizer.billboard(raw);
            self.resolve_categories(std::slice::from_mut(&mut billboard))
                .await;
            Ok::<_, AppError>(billboard)
        }
        .await;

        match live {
            Ok(billboard) => Ok(billboard),
            Err(e) if self.config.fallback.enabled => {
                log::warn!("get_billboard({id}): {e}; looking up mock data");
                self.mock
                    .billboard(&normalizer, id)
                    .ok_or_else(|| AppError::not_found("Billboard", id))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn list_contractors(&self) -> Result<Vec<Contractor>> {
        self.with_fallback(
            "list_contractors",
            async {
                let body: Value = self.executor.get(CONTRACTORS, &[]).await?;
                let items = Collection::decode(body)?.into_items();
                Ok::<_, AppError>(decode_all::<Contractor>(items, "contractor"))
            },
            || self.mock.contractors(),
        )
        .await
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.with_fallback(
            "list_employees",
            async {
                let body: Value = self.executor.get(EMPLOYEES, &[]).await?;
                let items = Collection::decode(body)?.into_items();
                let employees = decode_all::<Employee>(items, "employee")
                    .into_iter()
                    .map(Employee::normalized)
                    .collect();
                Ok::<Vec<Employee>, AppError>(employees)
            },
            || self.mock.employees(),
        )
        .await
    }

    pub async fn get_statistics(&self) -> Result<Statistics> {
        let normalizer = self.normalizer();
        self.with_fallback(
            "get_statistics",
            self.executor.get::<Statistics>(STATISTICS, &[]),
            || self.mock.statistics(&normalizer),
        )
        .await
    }

    /// Active structures whose rental ends soon.
    pub async fn get_expiring_soon(&self) -> Result<Vec<Billboard>> {
        let normalizer = self.normalizer();
        self.with_fallback(
            "get_expiring_soon",
            async {
                let body: Value = self.executor.get(EXPIRING_SOON, &[]).await?;
                let items = Collection::decode(body)?.into_items();
                let mut billboards = normalizer.billboards(items);
                self.resolve_categories(&mut billboards).await;
                Ok::<_, AppError>(billboards)
            },
            || {
                self.mock.expiring_soon(
                    &normalizer,
                    today(),
                    self.config.fallback.expiring_within_days,
                )
            },
        )
        .await
    }

    /// Initial dashboard load.
    ///
    /// Health, categories, employees and statistics load concurrently.
    /// Only an empty or failed category list is fatal.
    pub async fn bootstrap(&self) -> Result<Bootstrap> {
        let (health, categories, employees, statistics) = futures::join!(
            self.check_api_health(),
            self.list_categories(),
            self.list_employees(),
            self.get_statistics(),
        );

        let categories = categories.map_err(|e| AppError::Bootstrap(e.to_string()))?;
        if categories.is_empty() {
            return Err(AppError::Bootstrap("no categories available".to_string()));
        }

        let employees = employees.unwrap_or_else(|e| {
            log::warn!("Bootstrap: employees unavailable: {e}");
            Vec::new()
        });
        let statistics = statistics.unwrap_or_else(|e| {
            log::warn!("Bootstrap: statistics unavailable: {e}");
            Statistics::default()
        });

        if !health.is_ok() {
            log::warn!("{}", health.message);
        }

        Ok(Bootstrap {
            health,
            categories,
            employees,
            statistics,
        })
    }

    // --- Writes (never fall back) ---

    pub async fn create_billboard(&self, input: &BillboardInput) -> Result<Billboard> {
        let raw: RawBillboard = self
            .write(Method::Post, BILLBOARDS, Some(serde_json::to_value(input)?))
            .await
            .inspect_err(|e| log::error!("Failed to create billboard: {e}"))?;
        Ok(self.normalizer().billboard(raw))
    }

    pub async fn update_billboard(&self, id: i64, input: &BillboardInput) -> Result<Billboard> {
        let raw: RawBillboard = self
            .write(Method::Put, &billboard_path(id), Some(serde_json::to_value(input)?))
            .await
            .inspect_err(|e| log::error!("Failed to update billboard {id}: {e}"))?;
        Ok(self.normalizer().billboard(raw))
    }

    pub async fn delete_billboard(&self, id: i64) -> Result<()> {
        self.write::<Value>(Method::Delete, &billboard_path(id), None)
            .await
            .inspect_err(|e| log::error!("Failed to delete billboard {id}: {e}"))?;
        log::info!("Deleted billboard {id}");
        Ok(())
    }

    // --- Internals ---

    async fn write<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T> {
        self.executor.request(method, endpoint, &[], body).await
    }

    /// Replace placeholder categories using the live category listing.
    ///
    /// Only records with a raw category id and no embedded category data
    /// are touched. If the listing cannot be loaded they keep the
    /// placeholder.
    async fn resolve_categories(&self, billboards: &mut [Billboard]) {
        let unresolved =
            |b: &Billboard| b.category_data.slug == PLACEHOLDER_SLUG && b.category.is_some();
        if !billboards.iter().any(unresolved) {
            return;
        }

        let categories = match self.executor.get::<Value>(CATEGORIES, &[]).await {
            Ok(body) => match Collection::decode(body) {
                Ok(collection) => decode_all::<Category>(collection.into_items(), "category"),
                Err(e) => {
                    log::debug!("Category lookup failed: {e}");
                    return;
                }
            },
            Err(e) => {
                log::debug!("Category lookup failed: {e}");
                return;
            }
        };

        for billboard in billboards.iter_mut().filter(|b| unresolved(b)) {
            if let Some(category) = categories.iter().find(|c| Some(c.id) == billboard.category) {
                billboard.category_data = category.clone();
            }
        }
    }

    /// Await `live`; on failure, warn and serve `mock()` instead.
    async fn with_fallback<T>(
        &self,
        operation: &str,
        live: impl Future<Output = Result<T>>,
        mock: impl FnOnce() -> T,
    ) -> Result<T> {
        match live.await {
            Ok(value) => Ok(value),
            Err(e) if self.config.fallback.enabled => {
                log::warn!("{operation}: {e}; serving mock data");
                Ok(mock())
            }
            Err(e) => Err(e),
        }
    }

    fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.config.display.clone(), today())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn billboard_path(id: i64) -> String {
    format!("{BILLBOARDS}{id}/")
}

/// Drop live records outside the queried category.
///
/// Records still carrying the placeholder category cannot be shown under
/// any category tab and are dropped too.
fn retain_category(page: &mut Page<Billboard>, query: &BillboardQuery) {
    if query.category.is_none() {
        return;
    }
    let before = page.items.len();
    page.items
        .retain(|b| b.category_data.slug != PLACEHOLDER_SLUG && query.matches_category(b));
    let dropped = before - page.items.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} records outside category filter");
        page.total_count = page.total_count.saturating_sub(dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::models::DisplayConfig;

    #[test]
    fn test_billboard_path() {
        assert_eq!(billboard_path(12), "/billboards/12/");
    }

    #[test]
    fn test_retain_category_drops_placeholders() {
        let n = Normalizer::new(DisplayConfig::default(), today());
        let items = n.billboards(vec![
            json!({"id": 1, "category": 2}),
            json!({"id": 2, "category_data": {"id": 2, "name": "Bus stop", "slug": "bus_stop"}}),
            json!({"id": 3, "category_data": {"id": 1, "name": "Billboard", "slug": "billboard"}}),
        ]);
        let mut page = Page {
            items,
            next_page: None,
            total_count: 3,
        };

        retain_category(&mut page, &BillboardQuery::category("bus_stop"));
        assert_eq!(page.items.iter().map(|b| b.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(page.total_count, 1);
    }
}
