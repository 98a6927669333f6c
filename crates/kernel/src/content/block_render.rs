//! Rendering of populated blocks through Tera templates.
//!
//! Each block's selected style names a template. Stream fields are rendered
//! first and handed to the template as `children`, so a layout template only
//! places pre-rendered column markup. A block whose style is unknown, or
//! whose template is not loaded, falls back to a structural `<dl>` render.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use jetstream_sdk::content::PopulatedBlock;
use serde_json::{Map, Value};
use tera::Tera;
use tracing::{debug, warn};

use crate::features::FeatureContext;
use crate::schema::{BlockType, ContainerType, FieldType};

use super::helpers::{
    html_escape, tera_image_dimensions, tera_link_url, tera_subtract_from_twelve,
    tera_width_from_arbitrary_parent,
};

/// Renders streams of populated blocks to HTML.
pub struct BlockRenderer {
    tera: Tera,
}

impl BlockRenderer {
    /// Load every `*.html` template under `template_dir`.
    pub fn new(template_dir: &Path) -> Result<Self> {
        let pattern = template_dir.join("**/*.html");
        let pattern_str = pattern
            .to_str()
            .context("invalid template directory path")?;
        let tera = Tera::new(pattern_str).context("failed to initialize Tera templates")?;
        debug!(count = tera.get_template_names().count(), "loaded block templates");
        Ok(Self::from_tera(tera))
    }

    /// Wrap a caller-supplied Tera instance and register the block helpers.
    pub fn from_tera(mut tera: Tera) -> Self {
        Self::register_functions(&mut tera);
        Self { tera }
    }

    /// A renderer with no templates; every block renders structurally.
    pub fn empty() -> Self {
        Self::from_tera(Tera::default())
    }

    fn register_functions(tera: &mut Tera) {
        tera.register_function("link_url", tera_link_url);
        tera.register_function("subtract_from_twelve", tera_subtract_from_twelve);
        tera.register_function("width_from_arbitrary_parent", tera_width_from_arbitrary_parent);
        tera.register_function("image_dimensions", tera_image_dimensions);
    }

    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    pub fn tera_mut(&mut self) -> &mut Tera {
        &mut self.tera
    }

    /// Render a stream. Blocks the container does not offer for `ctx` are
    /// skipped.
    pub fn render_stream(
        &self,
        container: &ContainerType,
        blocks: &[PopulatedBlock],
        ctx: Option<&FeatureContext<'_>>,
    ) -> Result<String> {
        let mut html = String::new();
        for block in blocks {
            let Some(block_type) = container.child_block(&block.block_type, ctx) else {
                warn!(
                    container = %container.name(),
                    block_type = %block.block_type,
                    "skipping block not offered by container"
                );
                continue;
            };
            let rendered = self.render_block(&block_type, &block.value, ctx)?;
            html.push_str(&format!(
                "<div class=\"block-{}\">{}</div>\n",
                html_escape(&block.block_type),
                rendered
            ));
        }
        Ok(html)
    }

    /// Render one block's value with its selected style.
    pub fn render_block(
        &self,
        block_type: &BlockType,
        value: &Map<String, Value>,
        ctx: Option<&FeatureContext<'_>>,
    ) -> Result<String> {
        let children = self.render_children(block_type, value, ctx)?;
        let selection = block_type.select_style(value);

        let Some(template) = selection.template.as_deref() else {
            return Ok(render_basic(block_type, value, &children));
        };
        if self.tera.get_template(template).is_err() {
            debug!(template = %template, block = %block_type.type_id, "template not loaded; rendering structure");
            return Ok(render_basic(block_type, value, &children));
        }

        let mut context = tera::Context::new();
        context.insert("self", value);
        context.insert("value", value);
        context.insert("extra_classes", &selection.class_string());
        context.insert("children", &children);
        if let Some(columns) = value.get("columns").and_then(Value::as_i64).filter(|c| *c > 0) {
            context.insert("bootstrap_column_width", &(12 / columns));
        }
        self.tera
            .render(template, &context)
            .with_context(|| format!("failed to render block type: {}", block_type.type_id))
    }

    fn render_children(
        &self,
        block_type: &BlockType,
        value: &Map<String, Value>,
        ctx: Option<&FeatureContext<'_>>,
    ) -> Result<BTreeMap<String, String>> {
        let mut children = BTreeMap::new();
        for field in &block_type.fields {
            let FieldType::Stream(container) = &field.field_type else {
                continue;
            };
            let blocks: Vec<PopulatedBlock> = match value.get(&field.field_name) {
                Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
                    warn!(field = %field.field_name, error = %e, "ignoring malformed stream value");
                    Vec::new()
                }),
                None => Vec::new(),
            };
            let html = self.render_stream(container, &blocks, ctx)?;
            children.insert(field.field_name.clone(), html);
        }
        Ok(children)
    }
}

impl std::fmt::Debug for BlockRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockRenderer")
            .field("template_count", &self.tera.get_template_names().count())
            .finish()
    }
}

/// Structural render: a definition list of declared fields and their values.
///
/// Stream fields show their pre-rendered `children` markup; everything else
/// is escaped.
pub fn render_basic(
    block_type: &BlockType,
    value: &Map<String, Value>,
    children: &BTreeMap<String, String>,
) -> String {
    let items: Vec<String> = block_type
        .fields
        .iter()
        .filter_map(|field| {
            let shown = match (&field.field_type, value.get(&field.field_name)) {
                (FieldType::Stream(_), _) => children.get(&field.field_name).cloned()?,
                (FieldType::Struct(inner), Some(Value::Object(map))) => {
                    render_basic(inner, map, &BTreeMap::new())
                }
                (_, Some(v)) => html_escape(&display_value(v)),
                (_, None) => return None,
            };
            Some(format!(
                "<dt>{}</dt>\n<dd>{}</dd>",
                html_escape(&field.field_name),
                shown
            ))
        })
        .collect();
    format!("<dl>\n{}\n</dl>", items.join("\n"))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
