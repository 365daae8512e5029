// src/services/view.rs

//! Paging state for one category tab.
//!
//! ```text
//! Idle -> Loading(1) -> Loaded(1) -> LoadingMore(n+1) -> Loaded(n+1) -> ...
//!           \______________\________________\____ Errored
//! ```
//!
//! Results arriving for a category or page the view no longer expects are
//! discarded, so rapid tab switching keeps the latest request's data.

use crate::error::Result;
use crate::models::{Billboard, BillboardQuery, Page};
use crate::services::api::ApiService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    Loading { page: u32 },
    Loaded { page: u32 },
    LoadingMore { page: u32 },
    Errored { message: String },
}

/// Accumulated billboards for the active category.
#[derive(Debug, Clone)]
pub struct CategoryView {
    category: Option<String>,
    state: ViewState,
    items: Vec<Billboard>,
    next_page: Option<u32>,
    total_count: usize,
}

impl Default for CategoryView {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryView {
    pub fn new() -> Self {
        Self {
            category: None,
            state: ViewState::Idle,
            items: Vec::new(),
            next_page: None,
            total_count: 0,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn items(&self) -> &[Billboard] {
        &self.items
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    pub fn can_load_more(&self) -> bool {
        self.next_page.is_some() && matches!(self.state, ViewState::Loaded { .. })
    }

    /// Switch to `category` and return the first-page query to issue.
    pub fn begin(&mut self, category: impl Into<String>) -> BillboardQuery {
        let category = category.into();
        self.category = Some(category.clone());
        self.items.clear();
        self.next_page = None;
        self.total_count = 0;
        self.state = ViewState::Loading { page: 1 };
        BillboardQuery::category(category).with_page(1)
    }

    /// Query for the next page, if there is one and nothing is in flight.
    pub fn begin_more(&mut self) -> Option<BillboardQuery> {
        if !self.can_load_more() {
            return None;
        }
        let page = self.next_page?;
        let category = self.category.clone()?;
        self.state = ViewState::LoadingMore { page };
        Some(BillboardQuery::category(category).with_page(page))
    }

    /// Apply a finished request. Returns `false` if the result was stale.
    pub fn apply(&mut self, query: &BillboardQuery, result: Result<Page<Billboard>>) -> bool {
        let page = query.page_number();
        let expected = match self.state {
            ViewState::Loading { page } | ViewState::LoadingMore { page } => page,
            _ => return false,
        };
        if query.category != self.category || page != expected {
            log::debug!(
                "Discarding stale result for {:?} page {}",
                query.category,
                page
            );
            return false;
        }

        match result {
            Ok(result) => {
                if page == 1 {
                    self.items = result.items;
                } else {
                    self.items.extend(result.items);
                }
                self.next_page = result.next_page;
                self.total_count = result.total_count;
                self.state = ViewState::Loaded { page };
            }
            Err(e) => {
                if page == 1 {
                    self.items.clear();
                }
                self.state = ViewState::Errored {
                    message: e.to_string(),
                };
            }
        }
        true
    }

    /// Load the first page of `category`.
    pub async fn load(&mut self, api: &ApiService, category: &str) {
        let query = self.begin(category);
        let result = api.list_billboards(&query).await;
        self.apply(&query, result);
    }

    /// Load and append the next page, if any.
    pub async fn load_more(&mut self, api: &ApiService) {
        if let Some(query) = self.begin_more() {
            let result = api.list_billboards(&query).await;
            self.apply(&query, result);
        }
    }
}
