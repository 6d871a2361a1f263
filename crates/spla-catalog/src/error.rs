//! Error types for catalog loading.

use spla_core::{CatalogKind, CoreError};
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A remote catalog resource could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered with a non-success status.
    #[error("{kind} catalog request to {url} failed with status {status}")]
    Status {
        /// The catalog being fetched.
        kind: CatalogKind,
        /// The requested resource.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The source could not be reached or read.
    #[error("{kind} catalog could not be fetched from {resource}: {message}")]
    Unreachable {
        /// The catalog being fetched.
        kind: CatalogKind,
        /// The requested resource (URL or file path).
        resource: String,
        /// What went wrong.
        message: String,
    },

    /// The response was not a list of `{key, name}` records.
    #[error("{kind} catalog from {resource} is malformed: {message}")]
    Malformed {
        /// The catalog being fetched.
        kind: CatalogKind,
        /// The requested resource (URL or file path).
        resource: String,
        /// The decoding error.
        message: String,
    },
}

impl FetchError {
    /// The catalog whose fetch failed.
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::Status { kind, .. } | Self::Unreachable { kind, .. } | Self::Malformed { kind, .. } => {
                *kind
            }
        }
    }
}

/// Errors that can occur while loading or refreshing catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One of the remote fetches failed; nothing was cached.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetched data violated a catalog invariant (e.g. duplicate keys).
    #[error("invalid catalog: {0}")]
    Invalid(#[from] CoreError),

    /// Another refresh is still running.
    #[error("a catalog refresh is already in progress")]
    RefreshInProgress,

    /// The HTTP client could not be set up.
    #[error("HTTP client error: {0}")]
    Client(String),
}
