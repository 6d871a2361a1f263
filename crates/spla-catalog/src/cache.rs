//! Load-or-fetch catalog cache.
//!
//! [`CatalogCache::load`] prefers the three blobs in the store and only goes
//! to the fetcher when one of them is missing or unusable.
//! [`CatalogCache::refresh`] always fetches: the three requests run
//! concurrently and either all succeed or nothing is cached.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use spla_core::store::{self, KeyValueStore, keys};
use spla_core::{Catalog, CatalogItem, CatalogKind, Catalogs};

use crate::error::{CatalogError, CatalogResult};
use crate::exclusion::ExclusionList;
use crate::fetcher::Fetcher;

/// Resolves catalogs from the store or a [`Fetcher`].
pub struct CatalogCache {
    store: Arc<dyn KeyValueStore>,
    fetcher: Arc<dyn Fetcher>,
    exclusions: ExclusionList,
    refreshing: AtomicBool,
}

/// Holds the in-flight flag for the duration of a refresh.
struct RefreshGuard<'a>(&'a AtomicBool);

impl<'a> RefreshGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> CatalogResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CatalogError::RefreshInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl CatalogCache {
    /// Create a cache over `store`, fetching misses from `fetcher`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn Fetcher>,
        exclusions: ExclusionList,
    ) -> Self {
        Self {
            store,
            fetcher,
            exclusions,
            refreshing: AtomicBool::new(false),
        }
    }

    /// The exclusion list applied to rules and stages.
    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// Whether a refresh is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    /// The cached catalogs, if all three blobs are present and usable.
    pub fn cached(&self) -> Option<Catalogs> {
        let rule = self.cached_catalog(CatalogKind::Rule)?;
        let stage = self.cached_catalog(CatalogKind::Stage)?;
        let weapon = self.cached_catalog(CatalogKind::Weapon)?;
        Some(Catalogs::new(rule, stage, weapon))
    }

    fn cached_catalog(&self, kind: CatalogKind) -> Option<Catalog> {
        let items: Vec<CatalogItem> = store::read_json(self.store.as_ref(), kind.cache_key())?;
        if items.is_empty() {
            tracing::debug!(%kind, "cached catalog is empty");
            return None;
        }
        match Catalog::new(kind, items) {
            Ok(catalog) => Some(self.exclusions.apply(catalog)),
            Err(e) => {
                tracing::warn!(%kind, error = %e, "ignoring invalid cached catalog");
                None
            }
        }
    }

    /// Return cached catalogs, fetching them if the cache is incomplete.
    pub async fn load(&self) -> CatalogResult<Catalogs> {
        if let Some(catalogs) = self.cached() {
            tracing::debug!("catalogs loaded from store");
            return Ok(catalogs);
        }
        tracing::info!("catalog cache incomplete, fetching");
        self.refresh().await
    }

    /// Fetch fresh catalogs, filter them, and cache them.
    pub async fn refresh(&self) -> CatalogResult<Catalogs> {
        let _guard = RefreshGuard::acquire(&self.refreshing)?;
        self.fetch_and_store().await
    }

    /// Drop the cached catalogs and the saved filter selection, then fetch.
    ///
    /// Used for the manual refresh action so no stale selected keys outlive
    /// a catalog change.
    pub async fn clear_and_refresh(&self) -> CatalogResult<Catalogs> {
        let _guard = RefreshGuard::acquire(&self.refreshing)?;
        self.clear();
        self.fetch_and_store().await
    }

    /// Remove the three catalog blobs and the saved selection.
    pub fn clear(&self) {
        for kind in CatalogKind::ALL {
            store::remove_best_effort(self.store.as_ref(), kind.cache_key());
        }
        store::remove_best_effort(self.store.as_ref(), keys::SELECTED_ITEMS);
        tracing::debug!("catalog cache cleared");
    }

    async fn fetch_and_store(&self) -> CatalogResult<Catalogs> {
        let (rule, stage, weapon) = tokio::try_join!(
            self.fetcher.fetch(CatalogKind::Rule),
            self.fetcher.fetch(CatalogKind::Stage),
            self.fetcher.fetch(CatalogKind::Weapon),
        )?;

        let rule = self.exclusions.apply(Catalog::new(CatalogKind::Rule, rule)?);
        let stage = self.exclusions.apply(Catalog::new(CatalogKind::Stage, stage)?);
        let weapon = Catalog::new(CatalogKind::Weapon, weapon)?;

        for catalog in [&rule, &stage, &weapon] {
            store::write_json_best_effort(
                self.store.as_ref(),
                catalog.kind().cache_key(),
                catalog.items(),
            );
        }
        tracing::info!(
            rules = rule.len(),
            stages = stage.len(),
            weapons = weapon.len(),
            "catalogs refreshed"
        );

        Ok(Catalogs::new(rule, stage, weapon))
    }
}
