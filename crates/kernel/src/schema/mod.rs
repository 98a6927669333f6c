//! Block schema model.
//!
//! This module provides:
//! - `FieldType` / `FieldDefinition`: the typed sub-fields of a block
//! - `BlockType`: a named schema node with fields and style variants
//! - `resolve_name`: the stable machine name of a block type
//! - `GroupRanks`: sort order of picker groups
//! - `ContainerType`: a stream of permitted children, filtered per request

mod block;
mod container;
mod field;
mod groups;
mod naming;

pub use block::BlockType;
pub use container::ContainerType;
pub use field::{FieldDefinition, FieldType, ReferenceKind};
pub use groups::GroupRanks;
pub use naming::resolve_name;
