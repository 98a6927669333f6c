//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::content::{DEFAULT_MAX_LAYOUT_DEPTH, LAYOUT_DEPTH_LIMIT};
use crate::features::FeatureTable;
use crate::registry::SchemaSettings;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// TOML file with per-site enabled features. When None, every block is
    /// enabled for every site.
    pub features_file: Option<PathBuf>,

    /// Path to block templates (default: ./templates).
    pub templates_dir: PathBuf,

    /// How deep layouts may nest inside layout columns (default: 1).
    pub max_layout_depth: usize,

    /// Site key used when a command does not name one.
    pub site: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let features_file = env::var("JETSTREAM_FEATURES_FILE")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let templates_dir = env::var("JETSTREAM_TEMPLATES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./templates"));

        let max_layout_depth = match env::var("JETSTREAM_MAX_LAYOUT_DEPTH") {
            Ok(v) => parse_layout_depth(&v)?,
            Err(_) => DEFAULT_MAX_LAYOUT_DEPTH,
        };

        let site = env::var("JETSTREAM_SITE").ok().filter(|s| !s.is_empty());

        Ok(Self {
            features_file,
            templates_dir,
            max_layout_depth,
            site,
        })
    }

    pub fn schema_settings(&self) -> SchemaSettings {
        SchemaSettings {
            max_layout_depth: self.max_layout_depth,
            ..SchemaSettings::default()
        }
    }

    /// Load the configured feature table, or an empty one.
    pub fn load_features(&self) -> Result<FeatureTable> {
        match &self.features_file {
            Some(path) => {
                let table = FeatureTable::load(path)?;
                info!(path = %path.display(), sites = table.sites().count(), "feature table loaded");
                Ok(table)
            }
            None => Ok(FeatureTable::default()),
        }
    }
}

/// Parse a layout nesting depth, capped at [`LAYOUT_DEPTH_LIMIT`].
fn parse_layout_depth(raw: &str) -> Result<usize> {
    let depth: usize = raw
        .trim()
        .parse()
        .context("JETSTREAM_MAX_LAYOUT_DEPTH must be a non-negative integer")?;
    if depth > LAYOUT_DEPTH_LIMIT {
        bail!("JETSTREAM_MAX_LAYOUT_DEPTH is {depth}, the limit is {LAYOUT_DEPTH_LIMIT}");
    }
    Ok(depth)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            features_file: None,
            templates_dir: PathBuf::from("./templates"),
            max_layout_depth: DEFAULT_MAX_LAYOUT_DEPTH,
            site: None,
        }
    }
}
