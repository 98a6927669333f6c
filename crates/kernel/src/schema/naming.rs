//! Machine-name resolution.
//!
//! The machine name is what serialized content stores as a block's `type`,
//! so it must survive renames of the implementing type. A block type uses its
//! type identifier unless it declares an explicit machine name; logically
//! identical types (such as a layout and its nested form) declare the same
//! explicit name so their content stays interchangeable.

use crate::error::{SchemaError, SchemaResult};

use super::BlockType;

/// Resolve the stable machine name of a block type.
///
/// An explicit, non-empty `machine_name` wins; otherwise the `type_id` is
/// used. A block with neither is a configuration error.
pub fn resolve_name(block: &BlockType) -> SchemaResult<&str> {
    if let Some(name) = block.machine_name.as_deref().filter(|n| !n.trim().is_empty()) {
        return Ok(name);
    }
    if !block.type_id.trim().is_empty() {
        return Ok(&block.type_id);
    }
    Err(SchemaError::MissingMachineName {
        label: block.label.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_type_id() {
        let block = BlockType::new("ImagePanelBlock");
        assert_eq!(resolve_name(&block).unwrap(), "ImagePanelBlock");
    }

    #[test]
    fn explicit_name_overrides_type_id() {
        let block = BlockType::new("TwoColumnSubBlock").machine_name("two_column_layout");
        assert_eq!(resolve_name(&block).unwrap(), "two_column_layout");
    }

    #[test]
    fn blank_override_falls_back_to_type_id() {
        let block = BlockType::new("SpacerBlock").machine_name("  ");
        assert_eq!(resolve_name(&block).unwrap(), "SpacerBlock");
    }

    #[test]
    fn missing_both_is_configuration_error() {
        let block = BlockType::new("").label("Nameless");
        assert_eq!(
            resolve_name(&block),
            Err(SchemaError::MissingMachineName {
                label: "Nameless".to_string()
            })
        );
    }
}
