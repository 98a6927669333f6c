//! Field definitions for block types.

use std::sync::Arc;

use jetstream_sdk::types::Choice;
use serde_json::Value;

use super::{BlockType, ContainerType};

/// What a reference field points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Page,
    Document,
    Url,
}

/// Typed sub-field of a block.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// Single-line text.
    Text { max_length: Option<usize> },
    /// Multi-line plain text.
    TextArea,
    /// Sanitized HTML.
    RichText,
    Integer,
    Boolean,
    /// String choice.
    Choice { choices: Vec<Choice<String>> },
    /// Choice whose stored value is an integer.
    IntegerChoice { choices: Vec<Choice<i64>> },
    Reference(ReferenceKind),
    Image,
    /// oEmbed video URL.
    Embed,
    /// Raw `<iframe>` markup, cleaned before storage.
    EmbedMarkup,
    /// Nested block value.
    Struct(Arc<BlockType>),
    /// Ordered list of the inner type.
    List(Box<FieldType>),
    /// Nested stream of blocks.
    Stream(ContainerType),
}

impl FieldType {
    /// Short name used in schema listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldType::Text { .. } => "text",
            FieldType::TextArea => "text_area",
            FieldType::RichText => "rich_text",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Choice { .. } => "choice",
            FieldType::IntegerChoice { .. } => "integer_choice",
            FieldType::Reference(ReferenceKind::Page) => "page",
            FieldType::Reference(ReferenceKind::Document) => "document",
            FieldType::Reference(ReferenceKind::Url) => "url",
            FieldType::Image => "image",
            FieldType::Embed => "embed",
            FieldType::EmbedMarkup => "embed_markup",
            FieldType::Struct(_) => "struct",
            FieldType::List(_) => "list",
            FieldType::Stream(_) => "stream",
        }
    }

    /// Build a string choice from `(value, label)` pairs.
    pub fn choice(pairs: &[(&str, &str)]) -> Self {
        FieldType::Choice {
            choices: pairs.iter().map(|(v, l)| Choice::new(v.to_string(), *l)).collect(),
        }
    }

    /// Build an integer choice whose labels are the numbers themselves.
    pub fn integer_choice(values: impl IntoIterator<Item = i64>) -> Self {
        FieldType::IntegerChoice {
            choices: values
                .into_iter()
                .map(|v| Choice::new(v, v.to_string()))
                .collect(),
        }
    }

    /// Composite kinds are optional unless declared otherwise.
    fn required_by_default(&self) -> bool {
        !matches!(
            self,
            FieldType::Boolean | FieldType::Struct(_) | FieldType::List(_) | FieldType::Stream(_)
        )
    }
}

/// A single field within a block type.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub field_name: String,
    pub field_type: FieldType,
    pub label: String,
    pub help_text: String,
    pub required: bool,
    /// Value used when the field is absent from populated content.
    pub default: Option<Value>,
}

impl FieldDefinition {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            field_name: name.into(),
            required: field_type.required_by_default(),
            field_type,
            label: default_label(name),
            help_text: String::new(),
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.into();
        self
    }

    pub fn help(mut self, help_text: &str) -> Self {
        self.help_text = help_text.into();
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// `left_column_width` becomes `Left column width`.
fn default_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
