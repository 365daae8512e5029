// src/models/mod.rs

//! Domain models for the data access layer.
//!
//! This module contains all data structures exchanged with the backend,
//! organized by entity.

mod billboard;
mod category;
mod collection;
mod config;
mod contractor;
mod employee;
mod query;
mod statistics;

// Re-export all public types
pub use billboard::{
    Billboard, BillboardInput, BillboardStatus, Location, RawBillboard, parse_date,
};
pub use category::Category;
pub use collection::{Collection, Page};
pub use config::{ApiConfig, Config, DisplayConfig, FallbackConfig};
pub use contractor::Contractor;
pub use employee::Employee;
pub use query::BillboardQuery;
pub use statistics::Statistics;

/// Result of the backend health probe, suitable for a status banner.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Ok,
    Error,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == HealthState::Ok
    }
}
