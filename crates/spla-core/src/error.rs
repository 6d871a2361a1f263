use crate::catalog::CatalogKind;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the catalog model, state machines, and draw engine.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A catalog contained the same key twice.
    #[error("duplicate key \"{key}\" in {kind} catalog")]
    DuplicateKey {
        /// The catalog the duplicate was found in.
        kind: CatalogKind,
        /// The repeated key.
        key: String,
    },

    /// A draw was requested but no item is eligible.
    #[error("no eligible {0} to draw from")]
    EmptyPool(CatalogKind),

    /// A member count outside `1..=max` was requested.
    #[error("member count must be between 1 and {max}, got {count}")]
    InvalidMemberCount {
        /// The rejected count.
        count: u32,
        /// The configured maximum.
        max: u32,
    },

    /// A member index outside the current roster was referenced.
    #[error("member {index} is not in the roster (1..={count})")]
    MemberOutOfRange {
        /// The rejected index.
        index: u32,
        /// The current member count.
        count: u32,
    },

    /// An unrecognized catalog kind name.
    #[error("unknown catalog kind: {0}")]
    UnknownKind(String),

    /// An unrecognized result slot identifier.
    #[error("unknown result slot: {0}")]
    UnknownSlot(String),
}

/// Failures of the key-value store.
///
/// These are persistence errors: callers log them and carry on with
/// in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded or the backing file could not be decoded.
    #[error("store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The store refused the operation (quota, permissions, unavailable).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
