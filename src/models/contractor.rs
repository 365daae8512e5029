//! Contractor records.

use serde::{Deserialize, Serialize};

/// A contractor optionally associated with a billboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Contractor {
    pub id: i64,
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub contract_number: String,
    pub inn: String,
    pub website: String,
    pub notes: String,
    pub is_active: bool,
    pub billboards_count: u64,
    pub display_contact: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
