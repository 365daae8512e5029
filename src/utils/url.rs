// src/utils/url.rs

//! URL manipulation utilities.

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// # Examples
/// ```
/// use billboard_api::utils::url::join;
///
/// assert_eq!(
///     join("https://example.com/api/", "/billboards/"),
///     "https://example.com/api/billboards/"
/// );
/// ```
pub fn join(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Append query pairs to a URL, percent-encoding values.
pub fn with_query(url: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            parsed
                .query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
            parsed.to_string()
        }
        Err(_) => {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            let sep = if url.contains('?') { '&' } else { '?' };
            format!("{url}{sep}{query}")
        }
    }
}

/// Extract the `page` query parameter from a pagination link.
///
/// # Examples
/// ```
/// use billboard_api::utils::url::extract_page_number;
///
/// assert_eq!(
///     extract_page_number("https://host/api/billboards/?page=3&category=billboard"),
///     Some(3)
/// );
/// ```
pub fn extract_page_number(link: &str) -> Option<u32> {
    // Relative links only need a base for parsing; the host is never used.
    let parsed = url::Url::parse(link)
        .or_else(|_| url::Url::parse("http://localhost/").and_then(|base| base.join(link)))
        .ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse::<u32>().ok())
        .filter(|page| *page > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_slashes() {
        assert_eq!(
            join("https://example.com/api", "categories/"),
            "https://example.com/api/categories/"
        );
        assert_eq!(
            join("https://example.com", "/categories/"),
            "https://example.com/categories/"
        );
    }

    #[test]
    fn test_with_query_encodes() {
        let url = with_query(
            "https://example.com/api/billboards/",
            &[("search", "Amir Temur".to_string()), ("page", "2".to_string())],
        );
        assert_eq!(
            url,
            "https://example.com/api/billboards/?search=Amir+Temur&page=2"
        );
    }

    #[test]
    fn test_with_query_empty_is_identity() {
        assert_eq!(
            with_query("https://example.com/api/billboards/", &[]),
            "https://example.com/api/billboards/"
        );
    }

    #[test]
    fn test_extract_page_number() {
        assert_eq!(
            extract_page_number("https://host/api/billboards/?category=billboard&page=12"),
            Some(12)
        );
        assert_eq!(
            extract_page_number("https://host/api/billboards/?category=billboard"),
            None
        );
        assert_eq!(extract_page_number("https://host/?page=abc"), None);
        assert_eq!(extract_page_number("not a url"), None);
    }

    #[test]
    fn test_extract_page_number_relative_link() {
        assert_eq!(extract_page_number("/api/billboards/?page=2"), Some(2));
        assert_eq!(extract_page_number("?page=5&category=bus_stop"), Some(5));
        assert_eq!(extract_page_number("/api/billboards/"), None);
    }
}
