//! Schema registry.
//!
//! Builds the standard catalog, the layouts and the page body container once
//! at startup. Every reachable container is checked before the registry is
//! handed out, so a bad group or machine name fails the build rather than
//! the first request that happens to sort it.

use std::collections::HashSet;
use std::sync::Arc;

use jetstream_sdk::types::ChildSummary;
use tracing::info;

use crate::content::{BlockCatalog, DEFAULT_MAX_LAYOUT_DEPTH, LayoutFactory};
use crate::error::SchemaResult;
use crate::features::{FeatureCatalog, FeatureContext};
use crate::schema::{BlockType, ContainerType, FieldType, GroupRanks};

/// Settings for building the standard schema.
#[derive(Debug, Clone)]
pub struct SchemaSettings {
    pub max_layout_depth: usize,
    pub group_ranks: GroupRanks,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            max_layout_depth: DEFAULT_MAX_LAYOUT_DEPTH,
            group_ranks: GroupRanks::standard(),
        }
    }
}

/// The built schema. Read-only after construction; share behind `Arc`.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    body: ContainerType,
    column: ContainerType,
    features: FeatureCatalog,
}

impl SchemaRegistry {
    /// Build and check the standard schema.
    pub fn standard(settings: &SchemaSettings) -> SchemaResult<Self> {
        let catalog = BlockCatalog::standard();
        let layouts = LayoutFactory::new(
            catalog.column_blocks(),
            settings.group_ranks.clone(),
            settings.max_layout_depth,
        )?;

        let mut body_children = catalog.column_blocks();
        body_children.extend(catalog.page_only_blocks());
        body_children.extend(layouts.full_layouts());
        let body = ContainerType::with_ranks("body", body_children, settings.group_ranks.clone())?;
        let column = layouts.column_container(0)?;

        let checked = check_container(&body)?;
        let features = FeatureCatalog::from_blocks(body.base_child_blocks().iter().map(Arc::as_ref));
        info!(
            body_blocks = body.base_names().count(),
            containers = checked,
            max_layout_depth = settings.max_layout_depth,
            "block schema built"
        );
        Ok(Self {
            body,
            column,
            features,
        })
    }

    /// The top-level page body container.
    pub fn body(&self) -> &ContainerType {
        &self.body
    }

    /// The container used by a top-level layout's columns.
    pub fn column(&self) -> &ContainerType {
        &self.column
    }

    pub fn features(&self) -> &FeatureCatalog {
        &self.features
    }

    /// Picker list for the page body.
    pub fn export(&self, ctx: Option<&FeatureContext<'_>>) -> SchemaResult<Vec<ChildSummary>> {
        self.body.export(ctx)
    }

    /// Picker list for a top-level layout column.
    pub fn column_export(&self, ctx: Option<&FeatureContext<'_>>) -> SchemaResult<Vec<ChildSummary>> {
        self.column.export(ctx)
    }
}

/// Sort every container reachable from `root`, which resolves every machine
/// name and group. Returns the number of distinct containers checked.
fn check_container(root: &ContainerType) -> SchemaResult<usize> {
    let mut seen = HashSet::new();
    let mut pending = vec![root.clone()];
    while let Some(container) = pending.pop() {
        let key = (container.name().to_string(), container.base_names().collect::<Vec<_>>().join(","));
        if !seen.insert(key) {
            continue;
        }
        for block in container.sorted_child_blocks(None)? {
            collect_nested(&block, &mut pending);
        }
    }
    Ok(seen.len())
}

fn collect_nested(block: &BlockType, pending: &mut Vec<ContainerType>) {
    for field in &block.fields {
        collect_field(&field.field_type, pending);
    }
}

fn collect_field(field_type: &FieldType, pending: &mut Vec<ContainerType>) {
    match field_type {
        FieldType::Stream(container) => pending.push(container.clone()),
        FieldType::Struct(inner) => collect_nested(inner, pending),
        FieldType::List(inner) => collect_field(inner, pending),
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::features::EnabledFeatures;

    #[test]
    fn standard_schema_builds() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        let export = registry.export(None).unwrap();
        assert_eq!(export.len(), 17);
        assert!(export.iter().any(|c| c.machine_name == "two_column_layout"));
        assert!(export.iter().any(|c| c.machine_name == "HeroImageBlock"));
    }

    #[test]
    fn export_is_in_picker_order() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        let export = registry.export(None).unwrap();
        assert_eq!(export.first().map(|c| c.group.as_str()), Some("Basic"));
        assert_eq!(export.last().map(|c| c.machine_name.as_str()), Some("IFrameEmbedBlock"));
    }

    #[test]
    fn column_export_has_no_hero_blocks() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        let names: Vec<String> = registry
            .column_export(None)
            .unwrap()
            .into_iter()
            .map(|c| c.machine_name)
            .collect();
        assert!(!names.iter().any(|n| n == "HeroImageBlock"));
        assert!(names.iter().any(|n| n == "SidebarLayoutBlock"));
    }

    #[test]
    fn feature_catalog_lists_special_iframe() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        assert_eq!(registry.features().special, vec!["IFrameEmbedBlock"]);
        assert!(registry.features().default.iter().any(|f| f == "SpacerBlock"));
    }

    #[test]
    fn export_filters_by_site_features() {
        let registry = SchemaRegistry::standard(&SchemaSettings::default()).unwrap();
        let enabled = EnabledFeatures::new(["SpacerBlock", "CalloutBlock"]);
        let ctx = FeatureContext::new("main", &enabled);
        let export = registry.export(Some(&ctx)).unwrap();
        let names: Vec<&str> = export.iter().map(|c| c.machine_name.as_str()).collect();
        assert_eq!(names, vec!["SpacerBlock", "CalloutBlock"]);
    }

    #[test]
    fn missing_group_rank_fails_build() {
        let settings = SchemaSettings {
            group_ranks: GroupRanks::from_pairs([("", 0), ("Basic", 10)]),
            ..SchemaSettings::default()
        };
        let err = SchemaRegistry::standard(&settings).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownGroup { .. }));
    }
}
