//! Per-site feature table loaded from TOML.
//!
//! ```toml
//! [sites.main]
//! features = ["SpacerBlock", "ImagePanelBlock", "two_column_layout"]
//!
//! [sites.intranet]
//! features = ["SpacerBlock", "IFrameEmbedBlock"]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::{EnabledFeatures, FeatureContext, FeatureRegistry};

#[derive(Debug, Deserialize)]
struct FeatureFile {
    #[serde(default)]
    sites: BTreeMap<String, SiteEntry>,
}

#[derive(Debug, Deserialize)]
struct SiteEntry {
    #[serde(default)]
    features: Vec<String>,
}

/// Enabled features keyed by site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    sites: BTreeMap<String, EnabledFeatures>,
}

impl FeatureTable {
    /// Load a feature table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feature table: {}", path.display()))?;
        Self::parse_str(&content)
            .with_context(|| format!("failed to parse feature table TOML at {}", path.display()))
    }

    /// Parse a feature table from TOML text.
    pub fn parse_str(content: &str) -> Result<Self> {
        let file: FeatureFile = toml::from_str(content)?;
        let sites = file
            .sites
            .into_iter()
            .map(|(site, entry)| (site, EnabledFeatures::new(entry.features)))
            .collect();
        Ok(Self { sites })
    }

    pub fn insert(&mut self, site: impl Into<String>, features: EnabledFeatures) {
        self.sites.insert(site.into(), features);
    }

    pub fn site(&self, site: &str) -> Option<&EnabledFeatures> {
        self.sites.get(site)
    }

    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    /// Bind a resolution context for `site`.
    ///
    /// A site missing from the table has no feature configuration and gets a
    /// context without a registry.
    pub fn context_for(&self, site: &str) -> FeatureContext<'_> {
        if self.sites.contains_key(site) {
            FeatureContext::new(site, self)
        } else {
            debug!(site = %site, "no feature configuration for site; all blocks enabled");
            FeatureContext::unbound(site)
        }
    }
}

impl FeatureRegistry for FeatureTable {
    fn is_enabled(&self, feature: &str, ctx: &FeatureContext<'_>) -> bool {
        self.sites
            .get(&ctx.site)
            .is_none_or(|features| features.contains(feature))
    }
}
