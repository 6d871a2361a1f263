//! Where catalogs come from and what is filtered out of them.

use serde::{Deserialize, Serialize};

use crate::exclusion::ExclusionList;

/// Default remote source for Splatoon 3 catalogs.
pub const DEFAULT_BASE_URL: &str = "https://stat.ink/api/v3";

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL; catalogs are fetched from `<base_url>/<kind>`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Keys dropped from the rule and stage catalogs.
    pub exclusions: ExclusionList,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            exclusions: ExclusionList::default(),
        }
    }
}

impl CatalogConfig {
    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout (at least one second).
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }
}
