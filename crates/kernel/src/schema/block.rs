//! Block schema nodes.

use jetstream_sdk::types::{FeatureType, StyleSelection, StyleVariant};
use serde_json::{Map, Value};

use crate::error::SchemaResult;

use super::{FieldDefinition, FieldType, resolve_name};

/// Name of the field that carries the chosen style variant.
pub(crate) const STYLE_FIELD: &str = "style";

/// A named, typed unit of content.
///
/// Block types are plain data built once at startup and shared behind `Arc`
/// by every container that permits them.
#[derive(Debug, Clone)]
pub struct BlockType {
    /// Identifier of the implementing type, e.g. `ImagePanelBlock`.
    pub type_id: String,
    /// Explicit machine name; wins over `type_id` when non-empty.
    pub machine_name: Option<String>,
    pub label: String,
    /// Picker group. Empty string for ungrouped blocks.
    pub group: String,
    pub icon: String,
    /// Template used when the block declares no style variants.
    pub template: Option<String>,
    /// Feature classification; `None` for component sub-blocks.
    pub feature: Option<FeatureType>,
    pub fields: Vec<FieldDefinition>,
    pub styles: Vec<StyleVariant>,
}

impl BlockType {
    pub fn new(type_id: &str) -> Self {
        Self {
            type_id: type_id.into(),
            machine_name: None,
            label: type_id.into(),
            group: String::new(),
            icon: "placeholder".into(),
            template: None,
            feature: None,
            fields: Vec::new(),
            styles: Vec::new(),
        }
    }

    pub fn machine_name(mut self, name: &str) -> Self {
        self.machine_name = Some(name.into());
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }

    pub fn group(mut self, group: &str) -> Self {
        self.group = group.into();
        self
    }

    pub fn icon(mut self, icon: &str) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn template(mut self, template: &str) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn feature(mut self, feature: FeatureType) -> Self {
        self.feature = Some(feature);
        self
    }

    pub fn field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare style variants and the `style` choice field that selects
    /// between them. `default_key` pre-selects a variant for new content.
    pub fn styles(mut self, variants: Vec<StyleVariant>, default_key: &str) -> Self {
        let choices = variants
            .iter()
            .map(|v| (v.key.as_str(), v.label.as_str()))
            .collect::<Vec<_>>();
        let style_field =
            FieldDefinition::new(STYLE_FIELD, FieldType::choice(&choices)).default(default_key);
        self.fields.retain(|f| f.field_name != STYLE_FIELD);
        self.fields.push(style_field);
        self.styles = variants;
        self
    }

    /// Stable machine name; see [`resolve_name`].
    pub fn name(&self) -> SchemaResult<&str> {
        resolve_name(self)
    }

    /// Look up a declared field.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// Choose the template and extra classes for one populated value.
    ///
    /// With style variants, the `style` field picks one; a missing or
    /// unknown key yields the generic structural render. Without variants
    /// the block's own template is used.
    pub fn select_style(&self, value: &Map<String, Value>) -> StyleSelection {
        if self.styles.is_empty() {
            return match &self.template {
                Some(template) => StyleSelection::template(template.clone(), Vec::new()),
                None => StyleSelection::basic(),
            };
        }
        let key = value.get(STYLE_FIELD).and_then(Value::as_str);
        match key.and_then(|k| self.styles.iter().find(|s| s.key == k)) {
            Some(variant) => {
                StyleSelection::template(variant.template.clone(), variant.extra_classes.clone())
            }
            None => StyleSelection::basic(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn panel() -> BlockType {
        BlockType::new("ImagePanelBlock")
            .template("jetstream/blocks/image_panel.html")
            .styles(
                vec![
                    StyleVariant::new("card", "Card", "jetstream/blocks/image_panel-card.html"),
                    StyleVariant::new(
                        "thumbnail",
                        "Thumbnail",
                        "jetstream/blocks/image_panel-thumbnail.html",
                    )
                    .classes(&["left"]),
                ],
                "card",
            )
    }

    fn value(v: serde_json::Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn known_style_selects_variant() {
        let sel = panel().select_style(&value(json!({"style": "thumbnail"})));
        assert_eq!(
            sel.template.as_deref(),
            Some("jetstream/blocks/image_panel-thumbnail.html")
        );
        assert_eq!(sel.extra_classes, vec!["left".to_string()]);
    }

    #[test]
    fn unknown_or_missing_style_is_basic() {
        let block = panel();
        assert!(block.select_style(&value(json!({"style": "nope"}))).is_basic());
        assert!(block.select_style(&Map::new()).is_basic());
        assert!(block.select_style(&value(json!({"style": 4}))).is_basic());
    }

    #[test]
    fn unstyled_block_uses_its_template() {
        let block = BlockType::new("SpacerBlock").template("jetstream/blocks/spacer.html");
        let sel = block.select_style(&Map::new());
        assert_eq!(sel.template.as_deref(), Some("jetstream/blocks/spacer.html"));
        assert!(sel.extra_classes.is_empty());
        assert!(BlockType::new("LinkBlock").select_style(&Map::new()).is_basic());
    }

    #[test]
    fn styles_adds_single_style_field_with_default() {
        let block = panel().styles(
            vec![StyleVariant::new("card", "Card", "card.html")],
            "card",
        );
        let style_fields: Vec<_> = block
            .fields
            .iter()
            .filter(|f| f.field_name == STYLE_FIELD)
            .collect();
        assert_eq!(style_fields.len(), 1);
        assert_eq!(style_fields[0].default, Some(json!("card")));
    }
}
