//! Advertising structure categories.

use serde::{Deserialize, Serialize};

/// A category of advertising structure (billboard, bus stop, ...).
///
/// `slug` is the stable identifier used for filtering and tab routing;
/// `id` is backend-internal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub icon: String,

    #[serde(default)]
    pub color: String,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub order: i64,

    #[serde(default)]
    pub billboards_count: u64,
}

fn default_active() -> bool {
    true
}

impl Category {
    /// True when `key` names this category by slug or by numeric id.
    pub fn matches(&self, key: &str) -> bool {
        self.slug == key || self.id.to_string() == key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_payload_uses_defaults() {
        let category: Category =
            serde_json::from_str(r#"{"id": 3, "name": "LED screen", "slug": "led"}"#).unwrap();
        assert!(category.is_active);
        assert_eq!(category.billboards_count, 0);
        assert!(category.description.is_empty());
    }

    #[test]
    fn test_matches_slug_or_id() {
        let category: Category =
            serde_json::from_str(r#"{"id": 2, "name": "Bus stop", "slug": "bus_stop"}"#).unwrap();
        assert!(category.matches("bus_stop"));
        assert!(category.matches("2"));
        assert!(!category.matches("billboard"));
    }
}
