// src/services/normalize.rs

//! Response normalization.
//!
//! Repairs billboards so that every record exposes at least one image, a
//! numeric location, and display strings for size, period and employee,
//! whichever backend version produced it.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    Billboard, BillboardStatus, Category, Contractor, DisplayConfig, Location, RawBillboard,
    parse_date,
};

/// Slug given to records whose category could not be resolved.
pub const PLACEHOLDER_SLUG: &str = "unknown";

/// Extra field keeping a status value the client does not recognize.
pub const RAW_STATUS_KEY: &str = "status_raw";

/// Record fields tried, in order, when picking a display name.
const NAME_FIELDS: [&str; 5] = ["title", "name", "billboard_name", "display_name", "label"];

/// Repairs raw backend records using the configured display strings.
#[derive(Debug, Clone)]
pub struct Normalizer {
    display: DisplayConfig,
    today: NaiveDate,
}

impl Normalizer {
    pub fn new(display: DisplayConfig, today: NaiveDate) -> Self {
        Self { display, today }
    }

    /// Decode and repair a list of raw billboard values.
    ///
    /// Records that cannot be decoded at all (no numeric `id`) are skipped.
    pub fn billboards(&self, values: Vec<Value>) -> Vec<Billboard> {
        decode_all::<RawBillboard>(values, "billboard")
            .into_iter()
            .map(|raw| self.billboard(raw))
            .collect()
    }

    /// Repair a single raw billboard.
    pub fn billboard(&self, mut raw: RawBillboard) -> Billboard {
        let promoted_employee_id = raw.extra.remove("employee_id");
        let (category, category_data) = self.category(&raw);
        let contractor_data = raw
            .contractor_data
            .as_ref()
            .filter(|v| v.is_object())
            .and_then(|v| serde_json::from_value::<Contractor>(v.clone()).ok());
        let contractor = raw
            .contractor
            .as_ref()
            .and_then(as_i64)
            .or(contractor_data.as_ref().map(|c| c.id));
        let employee_id = raw
            .employee
            .as_ref()
            .and_then(as_i64)
            .or_else(|| promoted_employee_id.as_ref().and_then(as_i64));
        let status = raw
            .status
            .as_deref()
            .and_then(|s| match s.parse::<BillboardStatus>() {
                Ok(status) => Some(status),
                Err(e) => {
                    log::warn!("Billboard {}: {}, treating as active", raw.id, e);
                    raw.extra
                        .insert(RAW_STATUS_KEY.to_string(), Value::String(s.to_string()));
                    None
                }
            })
            .unwrap_or_default();
        let days_until_expiry = raw.days_until_expiry.or_else(|| {
            raw.end_date
                .as_deref()
                .and_then(parse_date)
                .map(|end| (end - self.today).num_days().max(0))
        });

        Billboard {
            id: raw.id,
            employee: self.employee(&raw),
            employee_id,
            images: self.images(raw.images.as_ref()),
            location: location(&raw),
            size: self.size(&raw),
            period: period(&raw),
            price: self.price(raw.price.as_ref()),
            address: raw.address.unwrap_or_default(),
            title: raw.title,
            description: raw.description,
            category,
            category_data,
            contractor,
            contractor_data,
            start_date: raw.start_date,
            end_date: raw.end_date,
            status,
            notes: raw.notes,
            days_until_expiry,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            extra: raw.extra,
        }
    }

    fn images(&self, raw: Option<&Value>) -> Vec<String> {
        let entries = match raw {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(single) => std::slice::from_ref(single),
        };
        let mut images: Vec<String> = entries
            .iter()
            .map(|entry| {
                let url = match entry {
                    Value::String(s) => Some(s.as_str()),
                    Value::Object(map) => map.get("image").and_then(Value::as_str),
                    _ => None,
                };
                url.map(str::trim)
                    .filter(|s| !s.is_empty())
                    .unwrap_or(self.display.placeholder_image.as_str())
                    .to_string()
            })
            .collect();

        if images.is_empty() {
            images.push(self.display.placeholder_image.clone());
        }
        images
    }

    fn employee(&self, raw: &RawBillboard) -> String {
        raw.employee_name
            .as_deref()
            .and_then(non_blank)
            .map(str::to_string)
            .or_else(|| {
                raw.employee.as_ref().and_then(|v| match v {
                    Value::Object(map) => map.get("full_name").and_then(as_text),
                    other => as_text(other),
                })
            })
            .unwrap_or_else(|| self.display.unspecified_employee.clone())
    }

    fn size(&self, raw: &RawBillboard) -> String {
        if let Some(size) = raw.size.as_deref().and_then(non_blank) {
            return size.to_string();
        }
        let dimension = |v: Option<&Value>| v.and_then(as_text).unwrap_or_else(|| "0".to_string());
        format!(
            "{}x{} {}",
            dimension(raw.width.as_ref()),
            dimension(raw.height.as_ref()),
            self.display.size_unit
        )
    }

    fn price(&self, raw: Option<&Value>) -> Option<String> {
        let amount = raw.and_then(as_text)?;
        Some(format!("{} {}", amount, self.display.currency))
    }

    fn category(&self, raw: &RawBillboard) -> (Option<i64>, Category) {
        // Some backends embed the category object in `category` itself.
        let embedded = raw
            .category_data
            .as_ref()
            .or(raw.category.as_ref().filter(|v| v.is_object()))
            .and_then(|v| serde_json::from_value::<Category>(v.clone()).ok());
        let id = raw
            .category
            .as_ref()
            .and_then(as_i64)
            .or(embedded.as_ref().map(|c| c.id));

        let data = embedded.unwrap_or_else(|| Category {
            id: id.unwrap_or(0),
            name: self.display.fallback_category_name.clone(),
            slug: PLACEHOLDER_SLUG.to_string(),
            description: String::new(),
            icon: self.display.fallback_category_icon.clone(),
            color: self.display.fallback_category_color.clone(),
            is_active: true,
            order: 0,
            billboards_count: 0,
        });
        (id, data)
    }
}

/// Name shown for a billboard: first populated name field, else
/// `"{category name} #{id}"`.
pub fn display_name(billboard: &Billboard) -> String {
    NAME_FIELDS
        .iter()
        .find_map(|field| {
            let candidate = match *field {
                "title" => billboard.title.as_deref(),
                other => billboard.extra.get(other).and_then(Value::as_str),
            };
            candidate.and_then(non_blank).map(str::to_string)
        })
        .unwrap_or_else(|| format!("{} #{}", billboard.category_data.name, billboard.id))
}

/// Decode each value as `T`, logging and skipping the ones that do not fit.
pub fn decode_all<T: DeserializeOwned>(values: Vec<Value>, kind: &str) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| {
            serde_json::from_value(value)
                .inspect_err(|e| log::warn!("Skipping malformed {} record: {}", kind, e))
                .ok()
        })
        .collect()
}

fn location(raw: &RawBillboard) -> Location {
    if raw.latitude.is_some() || raw.longitude.is_some() {
        return Location {
            lat: raw.latitude.as_ref().and_then(as_f64).unwrap_or(0.0),
            lng: raw.longitude.as_ref().and_then(as_f64).unwrap_or(0.0),
        };
    }
    raw.location
        .as_ref()
        .map(|v| Location {
            lat: v.get("lat").and_then(as_f64).unwrap_or(0.0),
            lng: v.get("lng").and_then(as_f64).unwrap_or(0.0),
        })
        .unwrap_or_default()
}

fn period(raw: &RawBillboard) -> String {
    if let Some(period) = raw.period.as_deref().and_then(non_blank) {
        return period.to_string();
    }
    format!(
        "{} – {}",
        raw.start_date.as_deref().unwrap_or_default(),
        raw.end_date.as_deref().unwrap_or_default()
    )
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Number or numeric string as `f64`; anything else is `None`.
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Non-empty string or number rendered as text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(s).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
