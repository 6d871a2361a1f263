//! Catalog loading for spla.
//!
//! Resolves the rule, stage, and weapon catalogs from the key-value store or,
//! failing that, from a remote source. Remote results are filtered through a
//! static exclusion list and written back to the store.

pub mod cache;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod fetcher;

pub use cache::CatalogCache;
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult, FetchError};
pub use exclusion::ExclusionList;
pub use fetcher::{DirFetcher, Fetcher, HttpFetcher};
