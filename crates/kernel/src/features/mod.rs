//! Site feature registry.
//!
//! Containers ask the registry whether each child block type is enabled for
//! the site bound to the current request. The feature key is the child's
//! machine name. When no registry is bound every key counts as enabled, so
//! code running outside a request (migrations, schema exports, tooling)
//! still sees the full schema.

mod table;

use std::collections::BTreeSet;
use std::fmt;

use jetstream_sdk::types::FeatureType;

use crate::schema::BlockType;

pub use table::FeatureTable;

/// Answers whether a feature key is enabled for a context.
pub trait FeatureRegistry: Send + Sync {
    fn is_enabled(&self, feature: &str, ctx: &FeatureContext<'_>) -> bool;
}

/// Per-request resolution state: the site key and, if any, the registry
/// bound to it.
///
/// A context borrows its registry for one resolution call and is never
/// stored by the schema.
#[derive(Clone)]
pub struct FeatureContext<'r> {
    pub site: String,
    registry: Option<&'r dyn FeatureRegistry>,
}

impl<'r> FeatureContext<'r> {
    pub fn new(site: impl Into<String>, registry: &'r dyn FeatureRegistry) -> Self {
        Self {
            site: site.into(),
            registry: Some(registry),
        }
    }

    /// A context for a site with no feature configuration.
    pub fn unbound(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            registry: None,
        }
    }

    pub fn has_registry(&self) -> bool {
        self.registry.is_some()
    }

    /// True when the bound registry enables `feature`, or no registry is bound.
    pub fn is_enabled(&self, feature: &str) -> bool {
        match self.registry {
            Some(registry) => registry.is_enabled(feature, self),
            None => true,
        }
    }
}

impl fmt::Debug for FeatureContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureContext")
            .field("site", &self.site)
            .field("has_registry", &self.has_registry())
            .finish()
    }
}

/// A fixed set of enabled feature keys for one site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnabledFeatures {
    features: BTreeSet<String>,
}

impl EnabledFeatures {
    pub fn new<I, S>(features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }

    pub fn enable(&mut self, feature: impl Into<String>) {
        self.features.insert(feature.into());
    }

    pub fn disable(&mut self, feature: &str) -> bool {
        self.features.remove(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.features.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FeatureRegistry for EnabledFeatures {
    fn is_enabled(&self, feature: &str, _ctx: &FeatureContext<'_>) -> bool {
        self.contains(feature)
    }
}

/// Feature keys of the block types offered to sites, split by feature type.
///
/// `default` features are what a newly created site starts with; `special`
/// features are switched on per site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCatalog {
    pub default: Vec<String>,
    pub special: Vec<String>,
}

impl FeatureCatalog {
    /// Collect the feature keys of every block that declares a feature type.
    /// Blocks whose machine name cannot be resolved are skipped; the schema
    /// registry reports those when it is built.
    pub fn from_blocks<'a>(blocks: impl IntoIterator<Item = &'a BlockType>) -> Self {
        let mut catalog = Self::default();
        for block in blocks {
            let (Some(feature), Ok(name)) = (block.feature, block.name()) else {
                continue;
            };
            let bucket = match feature {
                FeatureType::Default => &mut catalog.default,
                FeatureType::Special => &mut catalog.special,
            };
            if !bucket.iter().any(|n| n == name) {
                bucket.push(name.to_string());
            }
        }
        catalog.default.sort();
        catalog.special.sort();
        catalog
    }

    /// The feature set a new site receives.
    pub fn new_site_features(&self) -> EnabledFeatures {
        EnabledFeatures::new(self.default.iter().cloned())
    }

    pub fn feature_type(&self, feature: &str) -> Option<FeatureType> {
        if self.default.iter().any(|f| f == feature) {
            Some(FeatureType::Default)
        } else if self.special.iter().any(|f| f == feature) {
            Some(FeatureType::Special)
        } else {
            None
        }
    }
}
