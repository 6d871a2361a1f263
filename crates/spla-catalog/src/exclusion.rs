//! Keys that are never offered, whatever the user selects.
//!
//! Only rules and stages can be excluded; the weapon catalog always passes
//! through untouched.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use spla_core::{Catalog, CatalogKind};

/// Excluded rule and stage keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExclusionList {
    /// Rule keys to drop.
    pub rule: BTreeSet<String>,
    /// Stage keys to drop.
    pub stage: BTreeSet<String>,
}

impl Default for ExclusionList {
    /// Tricolor Turf War only runs during Splatfests.
    fn default() -> Self {
        Self {
            rule: BTreeSet::from(["tricolor".to_string()]),
            stage: BTreeSet::new(),
        }
    }
}

impl ExclusionList {
    /// An exclusion list that drops nothing.
    pub fn none() -> Self {
        Self {
            rule: BTreeSet::new(),
            stage: BTreeSet::new(),
        }
    }

    /// Excluded keys for `kind`; always empty for weapons.
    pub fn for_kind(&self, kind: CatalogKind) -> Option<&BTreeSet<String>> {
        match kind {
            CatalogKind::Rule => Some(&self.rule),
            CatalogKind::Stage => Some(&self.stage),
            CatalogKind::Weapon => None,
        }
    }

    /// Drop excluded keys from `catalog`.
    pub fn apply(&self, catalog: Catalog) -> Catalog {
        match self.for_kind(catalog.kind()) {
            Some(excluded) if !excluded.is_empty() => catalog.without(excluded),
            _ => catalog,
        }
    }
}
