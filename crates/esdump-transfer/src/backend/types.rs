//! Search backend request and response types
//!
//! Matches the Elasticsearch 7 REST API.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::time::Duration;

/// Query string used when the caller supplies neither a query nor a body.
pub const MATCH_ALL_QUERY: &str = "*:*";

/// How an export selects documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Lucene query string sent as the `q` URL parameter
    QueryString(String),
    /// Raw JSON search body
    Body(String),
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery::QueryString(MATCH_ALL_QUERY.to_string())
    }
}

impl SearchQuery {
    /// Pick the query from CLI-style options. A body wins over a query string.
    pub fn from_options(query: Option<String>, body: Option<String>) -> Self {
        match (query, body) {
            (_, Some(body)) if !body.trim().is_empty() => SearchQuery::Body(body),
            (Some(query), _) if !query.trim().is_empty() => SearchQuery::QueryString(query),
            _ => SearchQuery::default(),
        }
    }
}

/// Initial scroll search
#[derive(Debug, Clone)]
pub struct ScrollRequest {
    pub index: String,
    pub page_size: usize,
    pub keep_alive: Duration,
    pub query: SearchQuery,
}

/// One page of a scroll
#[derive(Debug, Default, Deserialize)]
pub struct ScrollPage {
    #[serde(rename = "_scroll_id", default)]
    pub scroll_id: Option<String>,

    #[serde(default)]
    pub hits: ScrollHits,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScrollHits {
    #[serde(default)]
    pub hits: Vec<Box<RawValue>>,
}

impl ScrollPage {
    pub fn len(&self) -> usize {
        self.hits.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }

    pub fn into_hits(self) -> Vec<Box<RawValue>> {
        self.hits.hits
    }
}

/// Body of a scroll advance
#[derive(Debug, Serialize)]
pub struct ScrollContinuation<'a> {
    pub scroll: String,
    pub scroll_id: &'a str,
}

/// Body of a scroll release
#[derive(Debug, Serialize)]
pub struct ClearScroll<'a> {
    pub scroll_id: [&'a str; 1],
}

/// Action line of a bulk create
#[derive(Debug, Serialize)]
pub struct BulkAction<'a> {
    pub create: CreateAction<'a>,
}

#[derive(Debug, Serialize)]
pub struct CreateAction<'a> {
    #[serde(rename = "_index")]
    pub index: &'a str,

    #[serde(rename = "_id")]
    pub id: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<&'a str>,
}

/// Response of a bulk request
#[derive(Debug, Default, Deserialize)]
pub struct BulkResponse {
    #[serde(default)]
    pub took: u64,

    #[serde(default)]
    pub errors: bool,

    #[serde(default)]
    pub items: Vec<BulkItem>,
}

/// One per-action result, keyed by the action name
#[derive(Debug, Deserialize)]
pub struct BulkItem {
    #[serde(default)]
    pub create: Option<BulkItemResult>,
}

#[derive(Debug, Deserialize)]
pub struct BulkItemResult {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    pub status: u16,

    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_precedence() {
        assert_eq!(
            SearchQuery::from_options(Some("title:dune".into()), Some(r#"{"size":1}"#.into())),
            SearchQuery::Body(r#"{"size":1}"#.into())
        );
        assert_eq!(
            SearchQuery::from_options(Some("title:dune".into()), None),
            SearchQuery::QueryString("title:dune".into())
        );
        assert_eq!(
            SearchQuery::from_options(None, Some("  ".into())),
            SearchQuery::QueryString(MATCH_ALL_QUERY.into())
        );
    }

    #[test]
    fn test_scroll_page_keeps_raw_hits() {
        let body = r#"{
            "_scroll_id": "abc",
            "took": 3,
            "hits": {"total": {"value": 2}, "hits": [{"_id":"1","_source":{"a":1}}, {"_id":"2","_source":{}}]}
        }"#;
        let page: ScrollPage = serde_json::from_str(body).unwrap();

        assert_eq!(page.scroll_id.as_deref(), Some("abc"));
        assert_eq!(page.len(), 2);
        assert_eq!(page.into_hits()[0].get(), r#"{"_id":"1","_source":{"a":1}}"#);
    }

    #[test]
    fn test_bulk_action_serialization() {
        let action = BulkAction {
            create: CreateAction {
                index: "books",
                id: "a\"b",
                routing: None,
            },
        };
        assert_eq!(
            serde_json::to_string(&action).unwrap(),
            r#"{"create":{"_index":"books","_id":"a\"b"}}"#
        );
    }

    #[test]
    fn test_bulk_response_parsing() {
        let body = r#"{"took":5,"errors":true,"items":[
            {"create":{"_index":"books","_id":"1","status":201,"result":"created"}},
            {"create":{"_index":"books","_id":"2","status":409,"error":{"type":"version_conflict_engine_exception"}}}
        ]}"#;
        let response: BulkResponse = serde_json::from_str(body).unwrap();

        assert!(response.errors);
        assert_eq!(response.items.len(), 2);
        let failed = response.items[1].create.as_ref().unwrap();
        assert_eq!(failed.status, 409);
        assert_eq!(failed.error.as_ref().unwrap()["type"], "version_conflict_engine_exception");
    }
}
