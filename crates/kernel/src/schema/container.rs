//! Feature-customized stream container.
//!
//! A container declares an ordered base set of permitted child block types.
//! At resolution time the set is narrowed to the children the bound site has
//! enabled. The base set is never modified; every call recomputes from it.

use std::sync::Arc;

use jetstream_sdk::types::ChildSummary;
use tracing::debug;

use crate::error::{SchemaError, SchemaResult};
use crate::features::FeatureContext;

use super::{BlockType, GroupRanks};

#[derive(Debug)]
struct ChildEntry {
    name: String,
    block: Arc<BlockType>,
}

/// A stream of permitted child block types.
///
/// Cloning is cheap; clones share the base child set.
#[derive(Debug, Clone)]
pub struct ContainerType {
    name: String,
    children: Arc<Vec<ChildEntry>>,
    ranks: GroupRanks,
}

impl ContainerType {
    /// Build a container with the standard group ranks.
    ///
    /// Every child must resolve to a machine name, and names must be unique
    /// within the container.
    pub fn new(name: &str, children: Vec<Arc<BlockType>>) -> SchemaResult<Self> {
        Self::with_ranks(name, children, GroupRanks::standard())
    }

    pub fn with_ranks(
        name: &str,
        children: Vec<Arc<BlockType>>,
        ranks: GroupRanks,
    ) -> SchemaResult<Self> {
        let mut entries: Vec<ChildEntry> = Vec::with_capacity(children.len());
        for block in children {
            let child_name = block.name()?.to_string();
            if entries.iter().any(|e| e.name == child_name) {
                return Err(SchemaError::DuplicateMachineName {
                    name: child_name,
                    container: name.to_string(),
                });
            }
            entries.push(ChildEntry {
                name: child_name,
                block,
            });
        }
        Ok(Self {
            name: name.to_string(),
            children: Arc::new(entries),
            ranks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranks(&self) -> &GroupRanks {
        &self.ranks
    }

    /// Every permitted child, in declaration order, ignoring features.
    pub fn base_child_blocks(&self) -> Vec<Arc<BlockType>> {
        self.children.iter().map(|e| Arc::clone(&e.block)).collect()
    }

    /// Machine names of the base set, in declaration order.
    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|e| e.name.as_str())
    }

    /// Children enabled for `ctx`, in declaration order.
    ///
    /// Without a context, or with a context that has no registry bound, the
    /// whole base set is returned.
    pub fn child_blocks(&self, ctx: Option<&FeatureContext<'_>>) -> Vec<Arc<BlockType>> {
        let Some(ctx) = ctx.filter(|c| c.has_registry()) else {
            return self.base_child_blocks();
        };
        let visible: Vec<Arc<BlockType>> = self
            .children
            .iter()
            .filter(|e| ctx.is_enabled(&e.name))
            .map(|e| Arc::clone(&e.block))
            .collect();
        debug!(
            container = %self.name,
            site = %ctx.site,
            visible = visible.len(),
            base = self.children.len(),
            "resolved container children"
        );
        visible
    }

    /// Children enabled for `ctx`, in picker order: group rank, then label.
    ///
    /// Labels compare case-sensitively and the sort is stable, so children
    /// with equal group and label keep declaration order.
    pub fn sorted_child_blocks(
        &self,
        ctx: Option<&FeatureContext<'_>>,
    ) -> SchemaResult<Vec<Arc<BlockType>>> {
        let mut ranked = self
            .child_blocks(ctx)
            .into_iter()
            .map(|block| Ok((self.ranks.rank(&block.group)?, block)))
            .collect::<SchemaResult<Vec<_>>>()?;
        ranked.sort_by(|(ra, a), (rb, b)| ra.cmp(rb).then_with(|| a.label.cmp(&b.label)));
        Ok(ranked.into_iter().map(|(_, block)| block).collect())
    }

    /// A visible child by machine name.
    pub fn child_block(&self, name: &str, ctx: Option<&FeatureContext<'_>>) -> Option<Arc<BlockType>> {
        let entry = self.children.iter().find(|e| e.name == name)?;
        match ctx {
            Some(ctx) if !ctx.is_enabled(&entry.name) => None,
            _ => Some(Arc::clone(&entry.block)),
        }
    }

    /// Picker list for the visible children.
    pub fn export(&self, ctx: Option<&FeatureContext<'_>>) -> SchemaResult<Vec<ChildSummary>> {
        self.sorted_child_blocks(ctx)?
            .iter()
            .map(|block| {
                Ok(ChildSummary {
                    machine_name: block.name()?.to_string(),
                    label: block.label.clone(),
                    group: block.group.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::features::EnabledFeatures;

    fn block(type_id: &str, group: &str, label: &str) -> Arc<BlockType> {
        Arc::new(BlockType::new(type_id).group(group).label(label))
    }

    fn names(blocks: &[Arc<BlockType>]) -> Vec<String> {
        blocks.iter().map(|b| b.name().unwrap().to_string()).collect()
    }

    fn sample() -> ContainerType {
        ContainerType::new(
            "body",
            vec![
                block("A", "Basic", "Zed"),
                block("B", "Basic", "Alpha"),
                block("C", "Multimedia", "Anything"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn sorts_by_group_rank_then_label() {
        let sorted = sample().sorted_child_blocks(None).unwrap();
        assert_eq!(names(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn child_blocks_keeps_declaration_order() {
        assert_eq!(names(&sample().child_blocks(None)), vec!["A", "B", "C"]);
    }

    #[test]
    fn registry_filters_children() {
        let enabled = EnabledFeatures::new(["A", "C"]);
        let ctx = FeatureContext::new("main", &enabled);
        let container = sample();
        assert_eq!(names(&container.child_blocks(Some(&ctx))), vec!["A", "C"]);
        assert!(container.child_block("B", Some(&ctx)).is_none());
        assert!(container.child_block("B", None).is_some());
    }

    #[test]
    fn context_without_registry_sees_base_set() {
        let ctx = FeatureContext::unbound("main");
        let container = sample();
        assert_eq!(
            names(&container.child_blocks(Some(&ctx))),
            names(&container.base_child_blocks())
        );
    }

    #[test]
    fn duplicate_machine_name_rejected() {
        let err = ContainerType::new(
            "column",
            vec![
                Arc::new(BlockType::new("TwoColumnLayoutBlock").machine_name("two_column_layout")),
                Arc::new(BlockType::new("TwoColumnSubBlock").machine_name("two_column_layout")),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateMachineName {
                name: "two_column_layout".to_string(),
                container: "column".to_string(),
            }
        );
    }

    #[test]
    fn unknown_group_is_reported_when_sorting() {
        let container = ContainerType::new("body", vec![block("W", "Widgets", "W")]).unwrap();
        assert_eq!(
            container.sorted_child_blocks(None).unwrap_err(),
            SchemaError::UnknownGroup {
                group: "Widgets".to_string()
            }
        );
        assert_eq!(container.child_blocks(None).len(), 1);
    }

    #[test]
    fn label_sort_is_case_sensitive() {
        let container = ContainerType::new(
            "body",
            vec![block("x", "Basic", "apple"), block("y", "Basic", "Banana")],
        )
        .unwrap();
        assert_eq!(names(&container.sorted_child_blocks(None).unwrap()), vec!["y", "x"]);
    }

    #[test]
    fn export_lists_picker_entries() {
        let export = sample().export(None).unwrap();
        assert_eq!(export[0].machine_name, "B");
        assert_eq!(export[0].label, "Alpha");
        assert_eq!(export[0].group, "Basic");
        assert_eq!(export.len(), 3);
    }
}
