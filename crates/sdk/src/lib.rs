//! Jetstream SDK
//!
//! Types shared between the block schema kernel and its consumers: admin
//! pickers read [`types::ChildSummary`] lists, editing surfaces exchange
//! [`content::PopulatedBlock`] streams and [`types::FieldError`]s, and
//! renderers receive a [`types::StyleSelection`] per block.

pub mod content;
pub mod types;

pub mod prelude {
    pub use crate::content::*;
    pub use crate::types::*;
}
