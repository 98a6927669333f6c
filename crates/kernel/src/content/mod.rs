//! Standard blocks and populated-content handling.
//!
//! This module provides:
//! - `catalog`: the standard block catalog and component sub-blocks
//! - `layout`: column and sidebar layouts with depth-capped nesting
//! - `validate`: cleaning of populated streams against their schema
//! - `embed`: iframe markup cleaning
//! - `block_render`: Tera-backed rendering of populated streams
//! - `helpers`: template helper functions

pub mod block_render;
pub mod catalog;
pub mod embed;
pub mod helpers;
pub mod layout;
pub mod validate;

pub use block_render::{BlockRenderer, render_basic};
pub use catalog::BlockCatalog;
pub use embed::{EmbedError, clean_iframe};
pub use layout::{DEFAULT_MAX_LAYOUT_DEPTH, LAYOUT_DEPTH_LIMIT, LayoutFactory, LayoutKind};
pub use validate::{clean_block, validate_stream};
