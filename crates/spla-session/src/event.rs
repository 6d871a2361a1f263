//! Notifications sent to session observers after state changes.

use spla_core::CatalogKind;

/// Something observers may want to re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Draw results were written or cleared.
    ResultsChanged,
    /// The team assignment was re-run or cleared.
    TeamsChanged,
    /// The pending filter for a kind was edited.
    FilterEdited {
        /// The catalog whose filter changed.
        kind: CatalogKind,
        /// Whether it now differs from the applied filter.
        dirty: bool,
    },
    /// The filter for a kind was applied (and persisted) or discarded.
    FilterSettled(CatalogKind),
    /// The pending roster was edited.
    RosterEdited {
        /// Whether it now differs from the confirmed roster.
        dirty: bool,
    },
    /// The roster was confirmed (and persisted) or discarded.
    RosterSettled,
    /// Catalogs were replaced.
    CatalogsReloaded,
    /// Loading or refreshing catalogs failed.
    CatalogFailed(String),
    /// A section was expanded or collapsed.
    SectionToggled {
        /// Section name, `filter` for the filter panel.
        name: String,
        /// Whether it is now expanded.
        open: bool,
    },
}
