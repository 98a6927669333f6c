//! Jetstream block composition kernel.
//!
//! Typed, nameable content blocks whose permitted children are resolved per
//! request from the bound site's enabled features. The `jetstream` binary
//! wraps this library for schema export, validation and rendering.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod features;
pub mod registry;
pub mod schema;

pub use error::{SchemaError, SchemaResult};
pub use features::{EnabledFeatures, FeatureCatalog, FeatureContext, FeatureRegistry, FeatureTable};
pub use registry::{SchemaRegistry, SchemaSettings};
pub use schema::{BlockType, ContainerType, FieldDefinition, FieldType, GroupRanks, resolve_name};
