//! Populated block content: the at-rest and wire representation.
//!
//! A stream is an ordered JSON array of `{"type": ..., "value": {...}}`
//! records. Nested struct, list and stream fields recurse into the same
//! format, so a two-column layout's `left_column` value is itself a stream.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One populated block inside a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedBlock {
    /// Machine name of the block type.
    #[serde(rename = "type")]
    pub block_type: String,

    /// Field values keyed by field name.
    #[serde(default)]
    pub value: Map<String, Value>,

    /// Stable identity assigned by the editing surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
}

impl PopulatedBlock {
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            value: Map::new(),
            id: None,
        }
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.value.insert(field.to_string(), value.into());
        self
    }

    /// Assign a fresh time-ordered id.
    pub fn with_new_id(mut self) -> Self {
        self.id = Some(Uuid::now_v7());
        self
    }

    /// Get a field value as a specific type.
    pub fn get_field<T: for<'de> Deserialize<'de>>(&self, name: &str) -> Option<T> {
        self.value
            .get(name)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a field value.
    pub fn set_field<T: Serialize>(&mut self, name: &str, value: T) {
        if let Ok(v) = serde_json::to_value(value) {
            self.value.insert(name.to_string(), v);
        }
    }

    /// The `style` field, when present and a string.
    pub fn style(&self) -> Option<&str> {
        self.value.get("style").and_then(Value::as_str)
    }
}

/// Parse a stream from its JSON text.
pub fn parse_stream(json: &str) -> serde_json::Result<Vec<PopulatedBlock>> {
    serde_json::from_str(json)
}

/// A chosen page or document, as read back from storage.
///
/// The storage layer fills `url` when it resolves the reference; the core
/// never does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceValue {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Value of a `LinkBlock`: a page, a document, or a raw URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkValue {
    #[serde(default)]
    pub page: Option<ReferenceValue>,
    #[serde(default)]
    pub document: Option<ReferenceValue>,
    #[serde(default)]
    pub url: Option<String>,
}

impl LinkValue {
    /// The link target. A page wins over a document, which wins over a URL.
    /// Empty strings count as unset.
    pub fn href(&self) -> Option<&str> {
        fn resolved(r: &Option<ReferenceValue>) -> Option<&str> {
            r.as_ref()
                .and_then(|r| r.url.as_deref())
                .filter(|u| !u.is_empty())
        }
        resolved(&self.page)
            .or_else(|| resolved(&self.document))
            .or_else(|| self.url.as_deref().filter(|u| !u.is_empty()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn populated_block_wire_format() {
        let block = PopulatedBlock::new("SpacerBlock").with("height", 25);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json, serde_json::json!({"type": "SpacerBlock", "value": {"height": 25}}));
    }

    #[test]
    fn parse_stream_reads_nested_records() {
        let stream = parse_stream(
            r#"[{"type": "two_column_layout", "value": {"left_column": [{"type": "SpacerBlock", "value": {"height": 12}}]}}]"#,
        )
        .unwrap();
        assert_eq!(stream.len(), 1);
        let left: Vec<PopulatedBlock> = stream[0].get_field("left_column").unwrap();
        assert_eq!(left[0].block_type, "SpacerBlock");
        assert_eq!(left[0].get_field::<i64>("height"), Some(12));
    }

    #[test]
    fn missing_value_defaults_to_empty_object() {
        let stream = parse_stream(r#"[{"type": "SpacerBlock"}]"#).unwrap();
        assert!(stream[0].value.is_empty());
        assert!(stream[0].id.is_none());
    }

    #[test]
    fn style_reads_string_field() {
        let block = PopulatedBlock::new("ImagePanelBlock").with("style", "captioned");
        assert_eq!(block.style(), Some("captioned"));
        let block = PopulatedBlock::new("ImagePanelBlock").with("style", 3);
        assert_eq!(block.style(), None);
    }

    #[test]
    fn link_prefers_page_then_document_then_url() {
        let mut link = LinkValue {
            page: Some(ReferenceValue { id: 1, url: Some("/about/".into()) }),
            document: Some(ReferenceValue { id: 2, url: Some("/documents/2/a.pdf".into()) }),
            url: Some("https://example.com".into()),
        };
        assert_eq!(link.href(), Some("/about/"));
        link.page = None;
        assert_eq!(link.href(), Some("/documents/2/a.pdf"));
        link.document = None;
        assert_eq!(link.href(), Some("https://example.com"));
        link.url = Some(String::new());
        assert_eq!(link.href(), None);
    }

    #[test]
    fn unresolved_page_falls_through_to_url() {
        let link = LinkValue {
            page: Some(ReferenceValue { id: 1, url: None }),
            document: Some(ReferenceValue { id: 2, url: Some(String::new()) }),
            url: Some("/fallback/".into()),
        };
        let href: Option<&str> = link.href();
        assert_eq!(href, Some("/fallback/"));
    }

    #[test]
    fn set_field_round_trips_through_get_field() {
        let mut block = PopulatedBlock::new("LinkBlock");
        block.set_field("url", "/x");
        assert_eq!(block.get_field::<String>("url").as_deref(), Some("/x"));
    }
}
