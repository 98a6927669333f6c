//! Schema configuration errors.
//!
//! These are programmer errors in a block schema definition. They are raised
//! while the schema is built at startup so that a typo never survives until
//! the first render.

use thiserror::Error;

/// Errors raised while building or resolving a block schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Neither an explicit machine name nor a type identifier was declared.
    #[error("block type with label '{label}' declares neither a machine name nor a type identifier")]
    MissingMachineName { label: String },

    /// Two children of one container resolve to the same machine name.
    #[error("machine name '{name}' is declared more than once in container '{container}'")]
    DuplicateMachineName { name: String, container: String },

    /// A child block's group has no entry in the group rank table.
    #[error(
        "the group \"{group}\" is not in the group rank table. Either rename the group to match \
         one of the known groups, or add \"{group}\" to the table"
    )]
    UnknownGroup { group: String },

    /// A layout was asked to nest deeper than the configured maximum.
    #[error("layout '{name}' cannot be nested at depth {depth}; the maximum layout depth is {max}")]
    LayoutDepthExceeded {
        name: String,
        depth: usize,
        max: usize,
    },
}

/// Result type alias using SchemaError.
pub type SchemaResult<T> = Result<T, SchemaError>;
