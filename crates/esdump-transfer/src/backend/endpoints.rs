//! Search backend endpoint URL builders

use std::time::Duration;

/// Build initial scroll search URL
pub fn search_url(base_url: &str, index: &str) -> String {
    format!("{}/{}/_search", base_url, urlencoding::encode(index))
}

/// Build scroll advance/clear URL
pub fn scroll_url(base_url: &str) -> String {
    format!("{}/_search/scroll", base_url)
}

/// Build bulk URL
pub fn bulk_url(base_url: &str) -> String {
    format!("{}/_bulk", base_url)
}

/// Build index lifecycle URL (get, create, delete)
pub fn index_url(base_url: &str, index: &str) -> String {
    format!("{}/{}", base_url, urlencoding::encode(index))
}

/// Format a cursor lifetime the way the backend expects it (`"60s"`).
///
/// Sub-second lifetimes round up to one second.
pub fn keep_alive(lifetime: Duration) -> String {
    format!("{}s", lifetime.as_secs().max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url() {
        assert_eq!(
            search_url("http://localhost:9200", "books"),
            "http://localhost:9200/books/_search"
        );
    }

    #[test]
    fn test_scroll_and_bulk_urls() {
        assert_eq!(
            scroll_url("http://localhost:9200"),
            "http://localhost:9200/_search/scroll"
        );
        assert_eq!(bulk_url("http://es:9200"), "http://es:9200/_bulk");
    }

    #[test]
    fn test_index_url_encodes_name() {
        assert_eq!(index_url("http://es:9200", "logs-2024"), "http://es:9200/logs-2024");
        assert_eq!(index_url("http://es:9200", "a b"), "http://es:9200/a%20b");
    }

    #[test]
    fn test_keep_alive() {
        assert_eq!(keep_alive(Duration::from_secs(60)), "60s");
        assert_eq!(keep_alive(Duration::from_millis(200)), "1s");
    }
}
