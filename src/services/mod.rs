//! Service layer for the data access layer.
//!
//! This module contains the logic for:
//! - Base URL discovery (`BaseUrlResolver`)
//! - Request execution (`RequestExecutor`)
//! - Response repair (`Normalizer`)
//! - Demonstration data (`MockData`)
//! - Public operations with fallback (`ApiService`)
//! - Category paging state (`CategoryView`)

pub mod api;
pub mod executor;
pub mod mock;
pub mod normalize;
pub mod resolver;
pub mod view;

pub use api::{ApiService, Bootstrap};
pub use executor::RequestExecutor;
pub use mock::MockData;
pub use normalize::{Normalizer, display_name};
pub use resolver::BaseUrlResolver;
pub use view::{CategoryView, ViewState};
