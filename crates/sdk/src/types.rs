//! Schema-side value types exchanged with consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry of a container's picker list.
///
/// This is what an admin UI or API layer builds a block chooser from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSummary {
    /// Stable machine name used in serialized content.
    pub machine_name: String,
    /// Human-readable label.
    pub label: String,
    /// Sort category shown as a heading in the picker.
    pub group: String,
}

/// How a block type is offered as a site feature.
///
/// `Default` features are enabled for every new site; `Special` features
/// must be switched on per site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Default,
    Special,
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureType::Default => f.write_str("default"),
            FeatureType::Special => f.write_str("special"),
        }
    }
}

/// A value/label pair offered by a choice field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice<V> {
    pub value: V,
    pub label: String,
}

impl<V> Choice<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// A named alternate rendering of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleVariant {
    /// Value stored in the block's `style` field.
    pub key: String,
    /// Label shown in the style dropdown.
    pub label: String,
    /// Template identifier handed to the renderer.
    pub template: String,
    /// Extra markup classes for this variant.
    #[serde(default)]
    pub extra_classes: Vec<String>,
}

impl StyleVariant {
    pub fn new(key: &str, label: &str, template: &str) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            template: template.into(),
            extra_classes: Vec::new(),
        }
    }

    pub fn classes(mut self, classes: &[&str]) -> Self {
        self.extra_classes = classes.iter().map(|c| (*c).to_string()).collect();
        self
    }
}

/// Template and classes the renderer should use for one populated block.
///
/// A selection without a template means "render the block's generic
/// structure", which is also the fallback for unknown styles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSelection {
    pub template: Option<String>,
    #[serde(default)]
    pub extra_classes: Vec<String>,
}

impl StyleSelection {
    /// Generic structural render: no template, no extra classes.
    pub fn basic() -> Self {
        Self::default()
    }

    pub fn template(template: impl Into<String>, extra_classes: Vec<String>) -> Self {
        Self {
            template: Some(template.into()),
            extra_classes,
        }
    }

    pub fn is_basic(&self) -> bool {
        self.template.is_none()
    }

    /// Extra classes joined for a `class` attribute.
    pub fn class_string(&self) -> String {
        self.extra_classes.join(" ")
    }
}

/// A field-level validation error for the editing surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path to the offending field, e.g. `body.2.link.url`.
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
