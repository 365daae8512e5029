//! Employee records used for filters and display names.

use serde::{Deserialize, Serialize};

/// An employee responsible for billboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Employee {
    pub id: i64,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl Employee {
    /// Derive `full_name` from first/last name when the backend omitted it.
    pub fn normalized(mut self) -> Self {
        if self.full_name.trim().is_empty() {
            let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            self.full_name = parts.join(" ");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_derived_from_parts() {
        let employee: Employee = serde_json::from_str(
            r#"{"id": 1, "first_name": "Aziz", "last_name": "Karimov", "email": "a@k.uz"}"#,
        )
        .unwrap();
        assert_eq!(employee.normalized().full_name, "Aziz Karimov");
    }

    #[test]
    fn test_existing_full_name_kept() {
        let employee: Employee =
            serde_json::from_str(r#"{"id": 1, "full_name": "Dilnoza R.", "first_name": "X"}"#)
                .unwrap();
        assert_eq!(employee.normalized().full_name, "Dilnoza R.");
    }
}
