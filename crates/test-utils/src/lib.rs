//! Jetstream test utilities.
//!
//! Helpers for integration testing: block and container fixtures, feature
//! registries with fixed answers, and populated-content builders.

use std::sync::Arc;

use jetstream_kernel::features::{FeatureContext, FeatureRegistry};
use jetstream_kernel::schema::{BlockType, ContainerType};
use jetstream_sdk::content::PopulatedBlock;
use serde_json::Value as JsonValue;

/// Create a block type with a group and label.
pub fn test_block(type_id: &str, group: &str, label: &str) -> Arc<BlockType> {
    Arc::new(BlockType::new(type_id).group(group).label(label))
}

/// Create a container from `(type_id, group, label)` triples.
///
/// # Panics
///
/// Panics if two triples share a type id.
#[allow(clippy::expect_used)]
pub fn test_container(name: &str, children: &[(&str, &str, &str)]) -> ContainerType {
    let blocks = children
        .iter()
        .map(|(type_id, group, label)| test_block(type_id, group, label))
        .collect();
    ContainerType::new(name, blocks).expect("test container has unique machine names")
}

/// Machine names of a block list, in order.
pub fn machine_names(blocks: &[Arc<BlockType>]) -> Vec<String> {
    blocks
        .iter()
        .map(|b| b.name().map(str::to_string).unwrap_or_default())
        .collect()
}

/// A registry that enables nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

impl FeatureRegistry for DenyAll {
    fn is_enabled(&self, _feature: &str, _ctx: &FeatureContext<'_>) -> bool {
        false
    }
}

/// A registry that enables everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl FeatureRegistry for AllowAll {
    fn is_enabled(&self, _feature: &str, _ctx: &FeatureContext<'_>) -> bool {
        true
    }
}

/// A registry that records how often it is consulted.
#[derive(Debug, Default)]
pub struct CountingRegistry {
    enabled: Vec<String>,
    calls: std::sync::atomic::AtomicUsize,
}

impl CountingRegistry {
    pub fn new(enabled: &[&str]) -> Self {
        Self {
            enabled: enabled.iter().map(|s| s.to_string()).collect(),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::Relaxed)
    }
}

impl FeatureRegistry for CountingRegistry {
    fn is_enabled(&self, feature: &str, _ctx: &FeatureContext<'_>) -> bool {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        self.enabled.iter().any(|f| f == feature)
    }
}

/// Create a populated block builder.
pub fn test_populated(block_type: &str) -> TestPopulated {
    TestPopulated {
        block: PopulatedBlock::new(block_type),
    }
}

/// A populated block builder for content fixtures.
#[derive(Debug, Clone)]
pub struct TestPopulated {
    block: PopulatedBlock,
}

impl TestPopulated {
    /// Add a single field.
    pub fn with_field(mut self, name: &str, value: JsonValue) -> Self {
        self.block.value.insert(name.to_string(), value);
        self
    }

    /// Add a nested stream field.
    pub fn with_stream(self, name: &str, blocks: Vec<PopulatedBlock>) -> Self {
        let value = serde_json::to_value(blocks).unwrap_or(JsonValue::Array(Vec::new()));
        self.with_field(name, value)
    }

    /// Assign a fresh id.
    pub fn with_id(mut self) -> Self {
        self.block = self.block.with_new_id();
        self
    }

    pub fn build(self) -> PopulatedBlock {
        self.block
    }
}

/// Assertion helpers.
pub mod assert {
    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string NOT to contain '{}'\nActual: {}",
            needle,
            haystack
        );
    }
}
