//! Core types for spla: catalogs, draft/commit state machines, and the
//! random draw engine.
//!
//! Everything here runs synchronously on the caller's thread. Catalog
//! fetching lives in `spla-catalog`; the controller that wires these pieces
//! together lives in `spla-session`.

/// Catalog kinds, items, and localized names.
pub mod catalog;
/// Defaults for the member roster and display locale.
pub mod config;
/// Random selection: uniform draws, shuffling, and team division.
pub mod draw;
/// Error types used throughout the crate.
pub mod error;
/// Member roster state machine.
pub mod roster;
/// Persisted collapse/expand state of UI sections.
pub mod section;
/// Per-catalog filter selection state machine.
pub mod selection;
/// Generic draft/commit wrapper.
pub mod stageable;
/// Key-value persistence and best-effort JSON helpers.
pub mod store;

/// Re-export catalog types.
pub use catalog::{Catalog, CatalogItem, CatalogKind, Catalogs, LocalizedName};
/// Re-export configuration.
pub use config::RosterConfig;
/// Re-export draw engine types.
pub use draw::{DrawResult, SlotId, Team, TeamAssignment};
/// Re-export error types.
pub use error::{CoreError, CoreResult, StoreError, StoreResult};
/// Re-export roster types.
pub use roster::{Member, RosterFields, RosterState};
/// Re-export section state.
pub use section::SectionStates;
/// Re-export selection types.
pub use selection::{SelectionState, Selections};
/// Re-export the draft/commit wrapper.
pub use stageable::Stageable;
/// Re-export store types.
pub use store::{FileStore, KeyValueStore, MemoryStore};
