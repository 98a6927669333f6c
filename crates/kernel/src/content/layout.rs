//! Column and sidebar layout blocks.
//!
//! Each layout has one definition instantiated at a nesting depth. A column
//! at depth `d` permits the column content blocks plus every layout built at
//! `d + 1`, as long as `d + 1` does not exceed the maximum layout depth. With
//! the default maximum of 1 a page gets full-width layouts whose columns may
//! hold one more level of layouts, and those inner columns hold content only.
//!
//! The full form (depth 0) and every nested form share one machine name, so
//! content moves freely between nesting levels.

use std::fmt;
use std::sync::Arc;

use jetstream_sdk::types::FeatureType;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{BlockType, ContainerType, FieldDefinition, FieldType, GroupRanks};

use super::catalog::background_options_block;

/// Default maximum nesting depth of layouts inside layout columns.
pub const DEFAULT_MAX_LAYOUT_DEPTH: usize = 1;

/// Largest maximum layout depth a deployment may configure.
pub const LAYOUT_DEPTH_LIMIT: usize = 8;

const COLUMN_WIDTH_HELP: &str =
    "Column width is represented as units out of twelve. EX. 6 / 12 units will take up half the container.";
const FIXED_HEIGHT_HELP: &str = "Blocks that contain images that are placed in one of the columns here will \
    set themselves to this height unless specifically overridden on the block.";

/// The layout families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    TwoColumn,
    ThreeColumn,
    FourColumn,
    Sidebar,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 4] = [
        LayoutKind::TwoColumn,
        LayoutKind::ThreeColumn,
        LayoutKind::FourColumn,
        LayoutKind::Sidebar,
    ];

    /// Machine name shared by every depth of this layout.
    pub fn machine_name(self) -> &'static str {
        match self {
            LayoutKind::TwoColumn => "two_column_layout",
            LayoutKind::ThreeColumn => "three_column_layout",
            LayoutKind::FourColumn => "four_column_layout",
            LayoutKind::Sidebar => "SidebarLayoutBlock",
        }
    }

    fn type_id(self, depth: usize) -> &'static str {
        match (self, depth) {
            (LayoutKind::TwoColumn, 0) => "TwoColumnLayoutBlock",
            (LayoutKind::TwoColumn, _) => "TwoColumnSubBlock",
            (LayoutKind::ThreeColumn, 0) => "ThreeColumnLayoutBlock",
            (LayoutKind::ThreeColumn, _) => "ThreeColumnSubBlock",
            (LayoutKind::FourColumn, 0) => "FourColumnLayoutBlock",
            (LayoutKind::FourColumn, _) => "FourColumnSubBlock",
            (LayoutKind::Sidebar, _) => "SidebarLayoutBlock",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutKind::TwoColumn => "Two Columns",
            LayoutKind::ThreeColumn => "Three Columns",
            LayoutKind::FourColumn => "Four Columns",
            LayoutKind::Sidebar => "Sidebar Layout",
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            LayoutKind::TwoColumn => "jetstream/blocks/layout/two_column_block.html",
            LayoutKind::ThreeColumn => "jetstream/blocks/layout/three_column_block.html",
            LayoutKind::FourColumn => "jetstream/blocks/layout/four_column_block.html",
            LayoutKind::Sidebar => "jetstream/blocks/layout/sidebar_layout_block.html",
        }
    }

    /// Names of the stream fields holding column content.
    pub fn column_fields(self) -> &'static [&'static str] {
        match self {
            LayoutKind::TwoColumn => &["left_column", "right_column"],
            LayoutKind::ThreeColumn => &["left_column", "middle_column", "right_column"],
            LayoutKind::FourColumn => &["column_one", "column_two", "column_three", "column_four"],
            LayoutKind::Sidebar => &["sidebar"],
        }
    }

    pub fn from_machine_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.machine_name() == name)
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.machine_name())
    }
}

/// Builds layout blocks and their column containers.
///
/// Every depth is built once, deepest first: the column container at depth
/// `d` holds the layouts built at `d + 1`, and all layouts at one depth share
/// that depth's container.
#[derive(Debug, Clone)]
pub struct LayoutFactory {
    content: Vec<Arc<BlockType>>,
    ranks: GroupRanks,
    max_depth: usize,
    columns: Vec<ContainerType>,
    layouts: Vec<Vec<Arc<BlockType>>>,
}

impl LayoutFactory {
    pub fn new(content: Vec<Arc<BlockType>>, ranks: GroupRanks, max_depth: usize) -> SchemaResult<Self> {
        let mut columns = Vec::with_capacity(max_depth + 1);
        let mut layouts: Vec<Vec<Arc<BlockType>>> = Vec::with_capacity(max_depth + 1);
        for depth in (0..=max_depth).rev() {
            let mut children = content.clone();
            if let Some(deeper) = layouts.last() {
                children.extend(deeper.iter().cloned());
            }
            let column = ContainerType::with_ranks(&format!("column@{depth}"), children, ranks.clone())?;
            let at_depth = LayoutKind::ALL
                .into_iter()
                .map(|kind| Arc::new(layout_block(kind, depth, &column)))
                .collect();
            columns.push(column);
            layouts.push(at_depth);
        }
        columns.reverse();
        layouts.reverse();
        debug!(max_depth, layouts = layouts.iter().map(Vec::len).sum::<usize>(), "layout blocks built");

        Ok(Self {
            content,
            ranks,
            max_depth,
            columns,
            layouts,
        })
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The top-level form.
    pub fn full(&self, kind: LayoutKind) -> SchemaResult<BlockType> {
        self.build(kind, 0)
    }

    /// The form nested one level inside another layout's column.
    pub fn sub(&self, kind: LayoutKind) -> SchemaResult<BlockType> {
        self.build(kind, 1)
    }

    /// Every layout at the top-level depth.
    pub fn full_layouts(&self) -> Vec<Arc<BlockType>> {
        self.layouts.first().cloned().unwrap_or_default()
    }

    /// Container used by every column of a layout at `depth`. Columns below
    /// the deepest layout hold content blocks only.
    pub fn column_container(&self, depth: usize) -> SchemaResult<ContainerType> {
        match self.columns.get(depth) {
            Some(column) => Ok(column.clone()),
            None => ContainerType::with_ranks(&format!("column@{depth}"), self.content.clone(), self.ranks.clone()),
        }
    }

    /// `kind` at nesting `depth`.
    pub fn build(&self, kind: LayoutKind, depth: usize) -> SchemaResult<BlockType> {
        let built = self
            .layouts
            .get(depth)
            .and_then(|at_depth| at_depth.iter().find(|b| b.type_id == kind.type_id(depth)));
        match built {
            Some(block) => Ok(BlockType::clone(block)),
            None => Err(SchemaError::LayoutDepthExceeded {
                name: kind.machine_name().to_string(),
                depth,
                max: self.max_depth,
            }),
        }
    }
}

fn layout_block(kind: LayoutKind, depth: usize, columns: &ContainerType) -> BlockType {
    let mut block = BlockType::new(kind.type_id(depth))
        .label(kind.label())
        .group("Basic")
        .icon("grip")
        .template(kind.template())
        .feature(FeatureType::Default);
    if kind != LayoutKind::Sidebar {
        block = block.machine_name(kind.machine_name());
    }

    match kind {
        LayoutKind::TwoColumn => {
            let block = width_style(block, depth)
                .field(width_field("left_column_width", 6))
                .field(fixed_height_field(350))
                .field(gutter_field())
                .field(background_field());
            column_fields(block, kind, columns, &["Left column content", "Right column content"])
        }
        LayoutKind::ThreeColumn => {
            let block = width_style(block, depth)
                .field(width_field("left_column_width", 4))
                .field(width_field("right_column_width", 4))
                .field(fixed_height_field(300))
                .field(gutter_field())
                .field(background_field());
            column_fields(
                block,
                kind,
                columns,
                &["Left column content", "Middle column content", "Right column content"],
            )
        }
        LayoutKind::FourColumn => {
            let block = width_style(block, depth)
                .field(width_field("column_one_width", 3))
                .field(width_field("column_two_width", 3))
                .field(width_field("column_three_width", 3))
                .field(fixed_height_field(250))
                .field(gutter_field())
                .field(background_field());
            column_fields(
                block,
                kind,
                columns,
                &[
                    "Column One Content",
                    "Column Two Content",
                    "Column Three Content",
                    "Column Four Content",
                ],
            )
        }
        LayoutKind::Sidebar => {
            let block = block.field(FieldDefinition::new("text", FieldType::RichText));
            column_fields(block, kind, columns, &["Sidebar"])
                .field(width_field("sidebar_width", 4))
                .field(
                    FieldDefinition::new(
                        "sidebar_alignment",
                        FieldType::choice(&[("left", "Left"), ("right", "Right")]),
                    )
                    .default("left"),
                )
                .field(
                    FieldDefinition::new("fixed_height", FieldType::Integer)
                        .label("Suggested height for child widgets")
                        .help("Set this to 0 to not enforce a height.")
                        .default(250),
                )
        }
    }
}

/// Only the top-level form offers the page-width style.
fn width_style(block: BlockType, depth: usize) -> BlockType {
    if depth > 0 {
        return block;
    }
    block.field(
        FieldDefinition::new(
            "style",
            FieldType::choice(&[
                ("regular-width", "Regular Width"),
                ("full-width", "Full Width"),
                ("regular-width padded", "Regular Width, Padded"),
                ("full-width padded", "Full Width, Padded"),
            ]),
        )
        .default("regular-width"),
    )
}

fn width_field(name: &str, default: i64) -> FieldDefinition {
    FieldDefinition::new(name, FieldType::integer_choice(1..=11))
        .help(COLUMN_WIDTH_HELP)
        .default(default)
}

fn fixed_height_field(default: i64) -> FieldDefinition {
    FieldDefinition::new("fixed_height", FieldType::Integer)
        .label("Suggested height for contained widgets")
        .help(FIXED_HEIGHT_HELP)
        .default(default)
}

fn gutter_field() -> FieldDefinition {
    FieldDefinition::new("gutter_width", FieldType::integer_choice([0, 12, 20, 30, 40]))
        .label("Column Gutter Width (pixels)")
        .help("This determines how wide the spacing between columns will be, in pixels.")
        .default(12)
}

fn background_field() -> FieldDefinition {
    FieldDefinition::new("background", FieldType::Struct(Arc::new(background_options_block())))
}

fn column_fields(
    mut block: BlockType,
    kind: LayoutKind,
    columns: &ContainerType,
    labels: &[&str],
) -> BlockType {
    for (name, label) in kind.column_fields().iter().zip(labels) {
        block = block.field(
            FieldDefinition::new(name, FieldType::Stream(columns.clone()))
                .optional()
                .label(label),
        );
    }
    block
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::content::catalog::BlockCatalog;
    use crate::schema::resolve_name;

    fn factory(max_depth: usize) -> LayoutFactory {
        LayoutFactory::new(
            BlockCatalog::standard().column_blocks(),
            GroupRanks::standard(),
            max_depth,
        )
        .unwrap()
    }

    fn stream_of(block: &BlockType, field: &str) -> ContainerType {
        match &block.get_field(field).unwrap().field_type {
            FieldType::Stream(c) => c.clone(),
            other => panic!("expected stream, got {}", other.kind_name()),
        }
    }

    #[test]
    fn full_and_sub_share_machine_name() {
        let factory = factory(1);
        for kind in LayoutKind::ALL {
            let full = factory.full(kind).unwrap();
            let sub = factory.sub(kind).unwrap();
            assert_eq!(resolve_name(&full).unwrap(), resolve_name(&sub).unwrap());
            assert_eq!(resolve_name(&full).unwrap(), kind.machine_name());
        }
    }

    #[test]
    fn full_columns_permit_sub_layouts_only_once() {
        let factory = factory(1);
        let full = factory.full(LayoutKind::TwoColumn).unwrap();
        let left = stream_of(&full, "left_column");
        let nested = left.child_block("two_column_layout", None).unwrap();
        assert_eq!(nested.type_id, "TwoColumnSubBlock");

        let inner = stream_of(&nested, "right_column");
        assert!(inner.child_block("two_column_layout", None).is_none());
        assert!(inner.child_block("SpacerBlock", None).is_some());
    }

    #[test]
    fn depth_beyond_maximum_is_rejected() {
        let err = factory(1).build(LayoutKind::FourColumn, 2).unwrap_err();
        assert_eq!(
            err,
            SchemaError::LayoutDepthExceeded {
                name: "four_column_layout".to_string(),
                depth: 2,
                max: 1
            }
        );
        assert!(factory(0).sub(LayoutKind::TwoColumn).is_err());
    }

    #[test]
    fn zero_depth_columns_hold_content_only() {
        let full = factory(0).full(LayoutKind::ThreeColumn).unwrap();
        let middle = stream_of(&full, "middle_column");
        assert_eq!(middle.base_names().count(), 11);
    }

    #[test]
    fn deeper_maximum_nests_further() {
        let full = factory(2).full(LayoutKind::Sidebar).unwrap();
        let level1 = stream_of(&full, "sidebar")
            .child_block("SidebarLayoutBlock", None)
            .unwrap();
        let level2 = stream_of(&level1, "sidebar")
            .child_block("SidebarLayoutBlock", None)
            .unwrap();
        assert!(stream_of(&level2, "sidebar").child_block("SidebarLayoutBlock", None).is_none());
    }

    #[test]
    fn only_top_level_form_has_style_field() {
        let factory = factory(1);
        assert!(factory.full(LayoutKind::TwoColumn).unwrap().get_field("style").is_some());
        assert!(factory.sub(LayoutKind::TwoColumn).unwrap().get_field("style").is_none());
    }

    #[test]
    fn layout_defaults() {
        let four = factory(1).full(LayoutKind::FourColumn).unwrap();
        let default_of = |name: &str| four.get_field(name).unwrap().default.clone();
        assert_eq!(default_of("column_one_width"), Some(3.into()));
        assert_eq!(default_of("fixed_height"), Some(250.into()));
        assert_eq!(default_of("gutter_width"), Some(12.into()));
    }

    #[test]
    fn kind_lookup_by_machine_name() {
        assert_eq!(
            LayoutKind::from_machine_name("three_column_layout"),
            Some(LayoutKind::ThreeColumn)
        );
        assert_eq!(LayoutKind::from_machine_name("nope"), None);
    }
}
