//! Common types used across esdump

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// A single document moved into an index by a load or generate transfer.
///
/// On disk a document is one search hit per line. Only `_id`, `_source` and
/// `_routing` are read; any other hit metadata (`_index`, `_type`, `_score`)
/// is ignored. The source is kept as raw JSON text and written back byte for
/// byte.
///
/// # Examples
///
/// ```rust
/// use esdump_common::Document;
///
/// let line = r#"{"_index":"books","_id":"42","_source":{"title":"Dune"}}"#;
/// let doc: Document = serde_json::from_str(line).unwrap();
/// assert_eq!(doc.id, "42");
/// assert_eq!(doc.source.get(), r#"{"title":"Dune"}"#);
/// assert!(doc.routing.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "_source")]
    pub source: Box<RawValue>,

    #[serde(rename = "_routing", default, skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, source: Box<RawValue>) -> Self {
        Self {
            id: id.into(),
            source,
            routing: None,
        }
    }

    pub fn with_routing(mut self, routing: impl Into<String>) -> Self {
        self.routing = Some(routing.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_keeps_source_verbatim() {
        let line = r#"{"_id":"a","_source":{"b": 1,  "a":[1,2]},"_routing":"r1"}"#;
        let doc: Document = serde_json::from_str(line).unwrap();

        assert_eq!(doc.id, "a");
        assert_eq!(doc.source.get(), r#"{"b": 1,  "a":[1,2]}"#);
        assert_eq!(doc.routing.as_deref(), Some("r1"));
    }

    #[test]
    fn test_document_ignores_hit_metadata() {
        let line = r#"{"_index":"x","_type":"_doc","_score":1.0,"_id":"7","_source":{}}"#;
        let doc: Document = serde_json::from_str(line).unwrap();
        assert_eq!(doc.id, "7");
    }

    #[test]
    fn test_document_requires_source() {
        let result = serde_json::from_str::<Document>(r#"{"_id":"7"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_document_serialization_skips_missing_routing() {
        let source = RawValue::from_string(r#"{"k":"v"}"#.to_string()).unwrap();
        let json = serde_json::to_string(&Document::new("1", source.clone())).unwrap();
        assert_eq!(json, r#"{"_id":"1","_source":{"k":"v"}}"#);

        let routed = Document::new("1", source).with_routing("shard-a");
        let json = serde_json::to_string(&routed).unwrap();
        assert!(json.contains(r#""_routing":"shard-a""#));
    }
}
