//! Collection response shapes.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::utils::url::extract_page_number;

/// The two collection shapes the backend has been seen to return.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection<T> {
    /// Bare JSON array, no pagination metadata
    Array(Vec<T>),
    /// Paginated envelope `{results, count, next, previous}`
    Page {
        items: Vec<T>,
        count: Option<usize>,
        next: Option<String>,
        previous: Option<String>,
    },
}

impl Collection<Value> {
    /// Discriminate the response shape of a parsed body.
    pub fn decode(body: Value) -> Result<Self> {
        match body {
            Value::Array(items) => Ok(Self::Array(items)),
            Value::Object(mut map) => {
                let items = match map.remove("results") {
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(AppError::shape(format!(
                            "'results' is {}, expected an array",
                            json_kind(&other)
                        )));
                    }
                    None => {
                        return Err(AppError::shape(
                            "object without a 'results' array".to_string(),
                        ));
                    }
                };
                let count = map
                    .get("count")
                    .and_then(Value::as_u64)
                    .map(|c| c as usize);
                let link = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
                Ok(Self::Page {
                    items,
                    count,
                    next: link("next"),
                    previous: link("previous"),
                })
            }
            other => Err(AppError::shape(format!(
                "{} body, expected array or paginated object",
                json_kind(&other)
            ))),
        }
    }
}

impl<T> Collection<T> {
    /// Convert each item, keeping pagination metadata.
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Collection<U> {
        match self {
            Self::Array(items) => Collection::Array(f(items)),
            Self::Page {
                items,
                count,
                next,
                previous,
            } => Collection::Page {
                items: f(items),
                count,
                next,
                previous,
            },
        }
    }

    /// Flatten into a page result.
    pub fn into_page(self) -> Page<T> {
        match self {
            Self::Array(items) => Page::single(items),
            Self::Page {
                items, count, next, ..
            } => Page {
                total_count: count.unwrap_or(items.len()),
                next_page: next.as_deref().and_then(extract_page_number),
                items,
            },
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Array(items) | Self::Page { items, .. } => items,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page number to request next, `None` at the end
    pub next_page: Option<u32>,
    pub total_count: usize,
}

impl<T> Page<T> {
    /// An unpaginated result: everything on one page.
    pub fn single(items: Vec<T>) -> Self {
        Self {
            total_count: items.len(),
            next_page: None,
            items,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_bare_array() {
        let collection = Collection::decode(json!([{"id": 1}, {"id": 2}])).unwrap();
        let page = collection.into_page();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 2);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_decode_envelope_with_next() {
        let collection = Collection::decode(json!({
            "count": 45,
            "next": "https://host/api/billboards/?page=3&category=billboard",
            "previous": "https://host/api/billboards/?category=billboard",
            "results": [{"id": 1}]
        }))
        .unwrap();
        let page = collection.into_page();
        assert_eq!(page.next_page, Some(3));
        assert_eq!(page.total_count, 45);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_decode_envelope_last_page() {
        let page = Collection::decode(json!({"count": 1, "next": null, "results": [{"id": 1}]}))
            .unwrap()
            .into_page();
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_decode_rejects_other_shapes() {
        assert!(matches!(
            Collection::decode(json!({"detail": "Not found."})),
            Err(AppError::UnexpectedResponseShape(_))
        ));
        assert!(matches!(
            Collection::decode(json!({"results": {"id": 1}})),
            Err(AppError::UnexpectedResponseShape(_))
        ));
        assert!(matches!(
            Collection::decode(json!("ok")),
            Err(AppError::UnexpectedResponseShape(_))
        ));
    }
}
