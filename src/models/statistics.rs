//! Aggregate billboard counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::billboard::{Billboard, BillboardStatus};

/// Read-only counters shown on the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Statistics {
    pub total: u64,
    pub active: u64,
    pub pending: u64,
    pub expired: u64,
    pub maintenance: u64,

    /// Category slug -> count
    pub categories: BTreeMap<String, u64>,

    /// Contractor name -> count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractors: Option<BTreeMap<String, u64>>,
}

impl Statistics {
    /// Count a set of normalized billboards.
    pub fn from_billboards(billboards: &[Billboard]) -> Self {
        let mut stats = Self {
            total: billboards.len() as u64,
            ..Self::default()
        };
        let mut contractors = BTreeMap::new();

        for billboard in billboards {
            match billboard.status {
                BillboardStatus::Active => stats.active += 1,
                BillboardStatus::Pending => stats.pending += 1,
                BillboardStatus::Expired => stats.expired += 1,
                BillboardStatus::Maintenance => stats.maintenance += 1,
            }
            *stats
                .categories
                .entry(billboard.category_data.slug.clone())
                .or_insert(0) += 1;
            if let Some(contractor) = &billboard.contractor_data {
                *contractors.entry(contractor.name.clone()).or_insert(0) += 1;
            }
        }

        if !contractors.is_empty() {
            stats.contractors = Some(contractors);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_payload_without_maps() {
        let stats: Statistics = serde_json::from_str(
            r#"{"total": 10, "active": 6, "pending": 2, "expired": 1, "maintenance": 1}"#,
        )
        .unwrap();
        assert_eq!(stats.total, 10);
        assert!(stats.categories.is_empty());
        assert!(stats.contractors.is_none());
    }
}
