//! Billboard listing parameters.
//!
//! The same query is sent to a live backend as URL parameters and applied
//! locally to mock data, so both paths filter identically.

use serde::{Deserialize, Serialize};

use super::billboard::{Billboard, BillboardStatus};

/// Filters and page selection for billboard listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillboardQuery {
    /// Category slug or id
    pub category: Option<String>,
    pub status: Option<BillboardStatus>,
    /// Employee id
    pub employee: Option<i64>,
    pub contractor: Option<i64>,
    pub search: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

impl BillboardQuery {
    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            category: Some(slug.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Requested page, defaulting to the first.
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Query pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(employee) = self.employee {
            pairs.push(("employee", employee.to_string()));
        }
        if let Some(search) = self.search_term() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(contractor) = self.contractor {
            pairs.push(("contractor", contractor.to_string()));
        }
        if let Some(page) = self.page.filter(|p| *p > 1) {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Local equivalent of the backend filters.
    pub fn matches(&self, billboard: &Billboard) -> bool {
        self.matches_category(billboard)
            && self.status.is_none_or(|s| billboard.status == s)
            && self.employee.is_none_or(|id| {
                billboard.employee_id == Some(id) || billboard.employee == id.to_string()
            })
            && self
                .contractor
                .is_none_or(|id| billboard.contractor == Some(id))
            && self.search_term().is_none_or(|term| search_matches(billboard, term))
    }

    /// Category filter on its own; placeholder categories match by raw id only.
    pub fn matches_category(&self, billboard: &Billboard) -> bool {
        let Some(key) = self.category.as_deref() else {
            return true;
        };
        billboard.category_data.slug == key
            || billboard.category.is_some_and(|id| id.to_string() == key)
    }

    /// Number of user-facing filters set (search, status, employee).
    pub fn active_filter_count(&self) -> usize {
        [
            self.search_term().is_some(),
            self.status.is_some(),
            self.employee.is_some(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// Drop user-facing filters and restart from the first page, keeping
    /// category and contractor scope.
    pub fn clear_filters(&mut self) {
        self.search = None;
        self.status = None;
        self.employee = None;
        self.page = None;
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn search_matches(billboard: &Billboard, term: &str) -> bool {
    let needle = term.to_lowercase();
    [
        billboard.title.as_deref(),
        Some(billboard.address.as_str()),
        Some(billboard.employee.as_str()),
        billboard.description.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_skip_first_page_and_blank_search() {
        let query = BillboardQuery {
            category: Some("billboard".into()),
            status: Some(BillboardStatus::Active),
            search: Some("   ".into()),
            page: Some(1),
            ..BillboardQuery::default()
        };
        assert_eq!(
            query.to_pairs(),
            vec![
                ("status", "active".to_string()),
                ("category", "billboard".to_string())
            ]
        );
    }

    #[test]
    fn test_pairs_include_later_pages() {
        let query = BillboardQuery::category("bus_stop").with_page(3);
        assert_eq!(query.page_number(), 3);
        assert!(query.to_pairs().contains(&("page", "3".to_string())));
    }

    #[test]
    fn test_active_filter_count_and_clear() {
        let mut query = BillboardQuery {
            category: Some("billboard".into()),
            search: Some("chorsu".into()),
            employee: Some(2),
            page: Some(4),
            ..BillboardQuery::default()
        };
        assert_eq!(query.active_filter_count(), 2);
        query.clear_filters();
        assert_eq!(query.active_filter_count(), 0);
        assert_eq!(query.page_number(), 1);
        assert_eq!(query.category.as_deref(), Some("billboard"));
    }
}
