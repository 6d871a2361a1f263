//! Configuration for a draw session.

use std::path::Path;

use serde::{Deserialize, Serialize};
use spla_catalog::CatalogConfig;
use spla_core::RosterConfig;

use crate::error::{SessionError, SessionResult};

/// Configuration for a draw session, loadable from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for reproducible draws; random when unset.
    pub seed: Option<u64>,
    /// Roster defaults and locale.
    pub roster: RosterConfig,
    /// Catalog source and exclusions.
    pub catalog: CatalogConfig,
}

impl SessionConfig {
    /// Read a config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> SessionResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SessionError::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config: Self = serde_json::from_str(&text)
            .map_err(|e| SessionError::Config(format!("invalid config {}: {e}", path.display())))?;
        config.roster = config.roster.normalized();
        Ok(config)
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the display locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.roster = self.roster.with_locale(locale);
        self
    }

    /// Set the remote catalog base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.catalog = self.catalog.with_base_url(base_url);
        self
    }

    /// The display locale.
    pub fn locale(&self) -> &str {
        &self.roster.locale
    }
}
