//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;
use crate::filter::FilterCriteria;

/// Characters left as-is in query string values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Site-relative directory of the search page. The generator writes a
/// static copy there and the preview server answers it directly.
pub const SEARCH_PATH: &str = "search/";

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/posts/1/") // -> "/blog/posts/1/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}{}", config.url.trim_end_matches('/'), url_for(config, path))
}

/// Site-relative directory of a category page, e.g. `categories/ci-cd/`
pub fn category_path(config: &SiteConfig, category: &str) -> String {
    format!(
        "{}/{}/",
        config.category_dir.trim_matches('/'),
        slug::slugify(category)
    )
}

/// Link to the search endpoint carrying `criteria`
pub fn search_url(config: &SiteConfig, criteria: &FilterCriteria) -> String {
    let mut params = Vec::new();
    if !criteria.query.is_empty() {
        params.push(format!("q={}", encode_query_value(&criteria.query)));
    }
    if let Some(category) = &criteria.category {
        params.push(format!("category={}", encode_query_value(category)));
    }

    let base = url_for(config, SEARCH_PATH);
    if params.is_empty() {
        base
    } else {
        format!("{}?{}", base, params.join("&"))
    }
}

/// Percent-encode a query string value
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/blog/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/posts/1/"), "/blog/posts/1/");
        assert_eq!(url_for(&config, ""), "/blog/");
        assert_eq!(url_for(&SiteConfig::default(), "search"), "/search");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/posts/2/"),
            "https://example.com/blog/posts/2/"
        );
    }

    #[test]
    fn test_category_path() {
        let config = SiteConfig::default();
        assert_eq!(category_path(&config, "CI/CD"), "categories/ci-cd/");
        assert_eq!(category_path(&config, "IaC"), "categories/iac/");
    }

    #[test]
    fn test_search_url() {
        let config = SiteConfig::default();
        assert_eq!(
            search_url(&config, &FilterCriteria::default()),
            "/search/"
        );
        assert_eq!(
            search_url(&config, &FilterCriteria::new("k8s tips").with_category("CI/CD")),
            "/search/?q=k8s%20tips&category=CI%2FCD"
        );
    }
}
