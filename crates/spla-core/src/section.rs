//! Which result sections and the filter panel are expanded.
//!
//! Purely cosmetic, but it shares the store with everything else and is
//! restored across sessions the same way.

use std::collections::BTreeMap;

use crate::store::{self, KeyValueStore, keys};

/// Expanded/collapsed flags for named sections plus the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStates {
    sections: BTreeMap<String, bool>,
    filter_open: bool,
}

impl Default for SectionStates {
    fn default() -> Self {
        Self {
            sections: BTreeMap::new(),
            filter_open: true,
        }
    }
}

impl SectionStates {
    /// Restore from the store; anything missing or malformed is expanded.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            sections: store::read_json(store, keys::SECTION_STATES).unwrap_or_default(),
            filter_open: store::read_json(store, keys::FILTER_SECTION_STATE).unwrap_or(true),
        }
    }

    /// Whether section `name` is expanded. Unknown sections are.
    pub fn is_open(&self, name: &str) -> bool {
        self.sections.get(name).copied().unwrap_or(true)
    }

    /// Whether the filter panel is expanded.
    pub fn is_filter_open(&self) -> bool {
        self.filter_open
    }

    /// Expand or collapse section `name` and persist.
    pub fn set_open(&mut self, name: &str, open: bool, store: &dyn KeyValueStore) {
        self.sections.insert(name.to_string(), open);
        store::write_json_best_effort(store, keys::SECTION_STATES, &self.sections);
    }

    /// Expand or collapse the filter panel and persist.
    pub fn set_filter_open(&mut self, open: bool, store: &dyn KeyValueStore) {
        self.filter_open = open;
        store::write_json_best_effort(store, keys::FILTER_SECTION_STATE, &open);
    }
}
