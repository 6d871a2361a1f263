//! Error types for the draw session.

use spla_catalog::CatalogError;
use spla_core::CoreError;
use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur while handling an intent.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A state machine or draw refused the request.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Catalogs could not be loaded or refreshed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// The configuration file could not be used.
    #[error("config error: {0}")]
    Config(String),

    /// A command was recognized but its arguments were not.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// The command word was not recognized.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
