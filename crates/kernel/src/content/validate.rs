//! Populated-content validation and cleaning.
//!
//! Cleaning walks a stream against its container schema and produces the
//! value that should be stored: defaults filled in, undeclared keys dropped,
//! rich text sanitized, embed markup rebuilt and references normalized. All
//! problems are collected so an editor sees every error at once.

use jetstream_sdk::content::PopulatedBlock;
use jetstream_sdk::types::FieldError;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::features::FeatureContext;
use crate::schema::{BlockType, ContainerType, FieldDefinition, FieldType, ReferenceKind};

use super::embed::clean_iframe;

const REQUIRED: &str = "This field is required.";

/// Validate and clean a stream against `container`.
///
/// Block types the container does not offer for `ctx` are errors, which
/// keeps a site from storing content for features it has not enabled.
pub fn validate_stream(
    container: &ContainerType,
    blocks: &[PopulatedBlock],
    ctx: Option<&FeatureContext<'_>>,
) -> Result<Vec<PopulatedBlock>, Vec<FieldError>> {
    let mut cleaner = Cleaner::new(ctx);
    let cleaned = cleaner.stream(container, blocks, "");
    cleaner.finish(cleaned)
}

/// Validate and clean the field values of a single block.
pub fn clean_block(
    block_type: &BlockType,
    value: &Map<String, Value>,
    ctx: Option<&FeatureContext<'_>>,
) -> Result<Map<String, Value>, Vec<FieldError>> {
    let mut cleaner = Cleaner::new(ctx);
    let cleaned = cleaner.fields(block_type, value, "");
    cleaner.finish(cleaned)
}

fn join(path: &str, segment: impl std::fmt::Display) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{path}.{segment}")
    }
}

struct Cleaner<'a, 'r> {
    ctx: Option<&'a FeatureContext<'r>>,
    errors: Vec<FieldError>,
}

impl<'a, 'r> Cleaner<'a, 'r> {
    fn new(ctx: Option<&'a FeatureContext<'r>>) -> Self {
        Self {
            ctx,
            errors: Vec::new(),
        }
    }

    fn finish<T>(self, cleaned: T) -> Result<T, Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(self.errors)
        }
    }

    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(path, message));
    }

    /// Convert a cleaned value back to JSON. A failure is recorded against
    /// `path` so the field is never dropped silently.
    fn store<T: Serialize>(&mut self, cleaned: T, path: &str) -> Option<Value> {
        match serde_json::to_value(cleaned) {
            Ok(value) => Some(value),
            Err(e) => {
                self.error(path, format!("Could not store the cleaned value: {e}"));
                None
            }
        }
    }

    fn stream(
        &mut self,
        container: &ContainerType,
        blocks: &[PopulatedBlock],
        path: &str,
    ) -> Vec<PopulatedBlock> {
        let mut cleaned = Vec::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            let block_path = join(path, i);
            let Some(block_type) = container.child_block(&block.block_type, self.ctx) else {
                self.error(&block_path, format!("unknown block type '{}'", block.block_type));
                continue;
            };
            let value = self.fields(&block_type, &block.value, &block_path);
            cleaned.push(PopulatedBlock {
                block_type: block.block_type.clone(),
                value,
                id: block.id,
            });
        }
        cleaned
    }

    fn fields(
        &mut self,
        block_type: &BlockType,
        value: &Map<String, Value>,
        path: &str,
    ) -> Map<String, Value> {
        let mut cleaned = Map::new();
        for field in &block_type.fields {
            let field_path = join(path, &field.field_name);
            let raw = value.get(&field.field_name).filter(|v| !v.is_null());
            let result = match (raw, &field.default) {
                (Some(raw), _) => self.value(field, raw, &field_path),
                (None, Some(default)) => Some(default.clone()),
                (None, None) if field.required => {
                    self.error(&field_path, REQUIRED);
                    None
                }
                (None, None) => self.empty(field, &field_path),
            };
            if let Some(v) = result {
                cleaned.insert(field.field_name.clone(), v);
            }
        }
        cleaned
    }

    /// Value stored for an absent optional field.
    fn empty(&mut self, field: &FieldDefinition, path: &str) -> Option<Value> {
        Some(match &field.field_type {
            FieldType::Text { .. }
            | FieldType::TextArea
            | FieldType::RichText
            | FieldType::Choice { .. }
            | FieldType::Embed
            | FieldType::EmbedMarkup
            | FieldType::Reference(ReferenceKind::Url) => Value::from(""),
            FieldType::Boolean => Value::Bool(false),
            FieldType::List(_) | FieldType::Stream(_) => Value::Array(Vec::new()),
            FieldType::Struct(inner) => Value::Object(self.fields(inner, &Map::new(), path)),
            FieldType::Integer
            | FieldType::IntegerChoice { .. }
            | FieldType::Reference(_)
            | FieldType::Image => Value::Null,
        })
    }

    fn value(&mut self, field: &FieldDefinition, raw: &Value, path: &str) -> Option<Value> {
        let cleaned = self.typed(&field.field_type, raw, path)?;
        if field.required && is_blank(&cleaned) {
            self.error(path, REQUIRED);
            return None;
        }
        Some(cleaned)
    }

    fn typed(&mut self, field_type: &FieldType, raw: &Value, path: &str) -> Option<Value> {
        match field_type {
            FieldType::Text { max_length } => {
                let s = self.string(raw, path)?;
                if let Some(max) = max_length {
                    let len = s.chars().count();
                    if len > *max {
                        self.error(
                            path,
                            format!("Ensure this value has at most {max} characters (it has {len})."),
                        );
                        return None;
                    }
                }
                Some(Value::from(s))
            }
            FieldType::TextArea | FieldType::Reference(ReferenceKind::Url) => {
                self.string(raw, path).map(Value::from)
            }
            FieldType::RichText => {
                let s = self.string(raw, path)?;
                Some(Value::from(ammonia::clean(s)))
            }
            FieldType::Integer => self.integer(raw, path).map(Value::from),
            FieldType::Boolean => match raw {
                Value::Bool(b) => Some(Value::Bool(*b)),
                _ => {
                    self.error(path, "Expected true or false.");
                    None
                }
            },
            FieldType::Choice { choices } => {
                let s = self.string(raw, path)?;
                if s.is_empty() || choices.iter().any(|c| c.value == s) {
                    Some(Value::from(s))
                } else {
                    self.error(
                        path,
                        format!("Select a valid choice. {s} is not one of the available choices."),
                    );
                    None
                }
            }
            FieldType::IntegerChoice { choices } => {
                if raw.as_str().is_some_and(str::is_empty) {
                    return Some(Value::Null);
                }
                let n = self.integer(raw, path)?;
                if choices.iter().any(|c| c.value == n) {
                    Some(Value::from(n))
                } else {
                    self.error(
                        path,
                        format!("Select a valid choice. {n} is not one of the available choices."),
                    );
                    None
                }
            }
            FieldType::Reference(_) | FieldType::Image => self.reference(raw, path),
            FieldType::Embed => {
                let s = self.string(raw, path)?;
                if s.is_empty() || s.starts_with("https://") || s.starts_with("http://") {
                    Some(Value::from(s))
                } else {
                    self.error(path, "Enter a valid URL.");
                    None
                }
            }
            FieldType::EmbedMarkup => {
                let s = self.string(raw, path)?;
                if s.trim().is_empty() {
                    return Some(Value::from(""));
                }
                match clean_iframe(s) {
                    Ok(markup) => Some(Value::from(markup)),
                    Err(e) => {
                        self.error(path, e.to_string());
                        None
                    }
                }
            }
            FieldType::Struct(inner) => match raw {
                Value::Object(map) => Some(Value::Object(self.fields(inner, map, path))),
                _ => {
                    self.error(path, "Expected an object.");
                    None
                }
            },
            FieldType::List(inner) => {
                let Value::Array(items) = raw else {
                    self.error(path, "Expected a list.");
                    return None;
                };
                let cleaned = items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| self.typed(inner, item, &join(path, i)))
                    .collect();
                Some(Value::Array(cleaned))
            }
            FieldType::Stream(container) => {
                let blocks: Vec<PopulatedBlock> = match serde_json::from_value(raw.clone()) {
                    Ok(blocks) => blocks,
                    Err(e) => {
                        self.error(path, format!("Expected a stream of blocks: {e}"));
                        return None;
                    }
                };
                let cleaned = self.stream(container, &blocks, path);
                self.store(cleaned, path)
            }
        }
    }

    fn string<'v>(&mut self, raw: &'v Value, path: &str) -> Option<&'v str> {
        match raw.as_str() {
            Some(s) => Some(s),
            None => {
                self.error(path, "Expected text.");
                None
            }
        }
    }

    fn integer(&mut self, raw: &Value, path: &str) -> Option<i64> {
        let n = match raw {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        if n.is_none() {
            self.error(path, "Enter a whole number.");
        }
        n
    }

    /// Normalize a chooser value to `{"id": n}` plus any resolved `url`.
    fn reference(&mut self, raw: &Value, path: &str) -> Option<Value> {
        if let Some(id) = raw.as_i64() {
            return Some(serde_json::json!({ "id": id }));
        }
        let id = raw.get("id").and_then(Value::as_i64);
        match id {
            Some(id) => {
                let mut out = Map::new();
                out.insert("id".into(), Value::from(id));
                if let Some(url) = raw.get("url").and_then(Value::as_str) {
                    out.insert("url".into(), Value::from(url));
                }
                Some(Value::Object(out))
            }
            None => {
                self.error(path, "Select a valid item.");
                None
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::catalog::{callout_block, iframe_embed_block, image_gallery_block, spacer_block};
    use serde_json::json;
    use std::sync::Arc;

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn unstorable_value_is_an_error() {
        // JSON object keys must be strings.
        let unstorable: std::collections::BTreeMap<(i64, i64), i64> = [((1, 2), 3)].into();
        let mut cleaner = Cleaner::new(None);
        assert_eq!(cleaner.store(unstorable, "0.left_column"), None);
        assert_eq!(
            cleaner.store(vec![PopulatedBlock::new("SpacerBlock")], "1"),
            Some(json!([{"type": "SpacerBlock", "value": {}}]))
        );
        let errors = cleaner.finish(()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "0.left_column");
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let cleaned = clean_block(&spacer_block(), &Map::new(), None).unwrap();
        assert_eq!(cleaned.get("height"), Some(&json!(25)));
    }

    #[test]
    fn undeclared_keys_dropped() {
        let cleaned = clean_block(&spacer_block(), &map(json!({"height": 50, "color": "red"})), None).unwrap();
        assert_eq!(Value::Object(cleaned), json!({"height": 50}));
    }

    #[test]
    fn integer_choice_accepts_numeric_strings() {
        let cleaned = clean_block(&spacer_block(), &map(json!({"height": "75"})), None).unwrap();
        assert_eq!(cleaned.get("height"), Some(&json!(75)));

        let errors = clean_block(&spacer_block(), &map(json!({"height": 13})), None).unwrap_err();
        assert_eq!(errors[0].path, "height");
        assert!(errors[0].message.contains("13 is not one of the available choices"));
    }

    #[test]
    fn required_and_length_errors_are_collected() {
        let long = "x".repeat(101);
        let errors = clean_block(&callout_block(), &map(json!({"title": long})), None).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["title", "body"]);
        assert!(errors[0].message.contains("at most 100 characters (it has 101)"));
        assert_eq!(errors[1].message, REQUIRED);
    }

    #[test]
    fn rich_text_is_sanitized() {
        let cleaned = clean_block(
            &callout_block(),
            &map(json!({"title": "Hi", "body": "<p>ok</p><script>alert(1)</script>"})),
            None,
        )
        .unwrap();
        assert_eq!(cleaned.get("body"), Some(&json!("<p>ok</p>")));
    }

    #[test]
    fn nested_struct_defaults_apply() {
        let cleaned = clean_block(
            &callout_block(),
            &map(json!({"title": "Hi", "body": "<p>b</p>"})),
            None,
        )
        .unwrap();
        assert_eq!(cleaned["fixed_dimensions"]["height"], json!(200));
        assert_eq!(cleaned["color"]["background_color"], json!(""));
    }

    #[test]
    fn embed_markup_is_replaced_by_cleaned_form() {
        let cleaned = clean_block(
            &iframe_embed_block(),
            &map(json!({"html": "<iframe src=\"https://x\" onload=\"x()\"></iframe>"})),
            None,
        )
        .unwrap();
        assert_eq!(cleaned.get("html"), Some(&json!("<iframe src=\"https://x\"></iframe>")));

        let errors =
            clean_block(&iframe_embed_block(), &map(json!({"html": "<b>no</b>"})), None).unwrap_err();
        assert_eq!(errors[0].path, "html");
        assert!(errors[0].message.contains("<iframe ...></iframe>"));
    }

    #[test]
    fn gallery_images_normalize_references() {
        let cleaned = clean_block(
            &image_gallery_block(),
            &map(json!({"images": [7, {"id": 8, "url": "/img/8.jpg", "extra": true}]})),
            None,
        )
        .unwrap();
        assert_eq!(cleaned["images"], json!([{"id": 7}, {"id": 8, "url": "/img/8.jpg"}]));
        assert_eq!(cleaned["style"], json!("gallery"));
        assert_eq!(cleaned["columns"], json!(3));
    }

    #[test]
    fn unknown_block_in_stream() {
        let container = ContainerType::new("body", vec![Arc::new(spacer_block())]).unwrap();
        let blocks = vec![
            PopulatedBlock::new("SpacerBlock"),
            PopulatedBlock::new("MysteryBlock"),
        ];
        let errors = validate_stream(&container, &blocks, None).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("1", "unknown block type 'MysteryBlock'")]);
    }

    #[test]
    fn wrong_json_type_reported() {
        let errors = clean_block(&spacer_block(), &map(json!({"height": [1]})), None).unwrap_err();
        assert_eq!(errors[0].message, "Enter a whole number.");
    }
}
