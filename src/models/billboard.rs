//! Billboard records: the raw wire shape and the normalized form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::category::Category;
use super::contractor::Contractor;

/// Rental status of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillboardStatus {
    #[default]
    Active,
    Pending,
    Expired,
    Maintenance,
}

impl BillboardStatus {
    pub const ALL: [BillboardStatus; 4] = [
        BillboardStatus::Active,
        BillboardStatus::Pending,
        BillboardStatus::Expired,
        BillboardStatus::Maintenance,
    ];

    /// Wire value used in query parameters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Expired => "expired",
            Self::Maintenance => "maintenance",
        }
    }

    /// Human label for banners and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Pending => "Pending",
            Self::Expired => "Expired",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for BillboardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillboardStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "expired" => Ok(Self::Expired),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(format!("unknown billboard status '{other}'")),
        }
    }
}

/// Geographic position of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A billboard exactly as some backend version sent it.
///
/// Scalar fields that different API versions encode differently (numbers
/// vs. decimal strings, ids vs. names) are kept as raw JSON values and
/// resolved by the normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBillboard {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Value>,
    pub category_data: Option<Value>,
    pub contractor: Option<Value>,
    pub contractor_data: Option<Value>,
    pub employee: Option<Value>,
    pub employee_name: Option<String>,
    pub width: Option<Value>,
    pub height: Option<Value>,
    pub size: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub location: Option<Value>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub period: Option<String>,
    pub status: Option<String>,
    pub price: Option<Value>,
    pub notes: Option<String>,
    /// Array of URLs or image objects; some backends send a single entry
    pub images: Option<Value>,
    pub days_until_expiry: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    /// Fields added by newer backends that nothing here knows about yet
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fully repaired billboard.
///
/// Always carries at least one image, a resolved location, and display
/// strings for size, period and employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Billboard {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<i64>,
    pub category_data: Category,
    pub contractor: Option<i64>,
    pub contractor_data: Option<Contractor>,

    /// Display name of the responsible employee
    pub employee: String,
    pub employee_id: Option<i64>,

    pub address: String,
    pub location: Location,
    pub size: String,
    pub period: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: BillboardStatus,
    pub price: Option<String>,
    pub notes: Option<String>,
    pub images: Vec<String>,
    pub days_until_expiry: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Billboard {
    /// Rental end date, if present and ISO formatted.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date.as_deref().and_then(parse_date)
    }

    /// True once the rental end date lies before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date().is_some_and(|end| end < today)
    }

    /// Name shown on cards and dialogs.
    pub fn display_name(&self) -> String {
        crate::services::normalize::display_name(self)
    }
}

/// Parse `YYYY-MM-DD`, ignoring any time component.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Write payload for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillboardInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contractor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BillboardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
