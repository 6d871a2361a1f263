//! Filter selection: which catalog items a draw may pick.
//!
//! Each catalog kind has its own [`SelectionState`]. Toggling checkboxes
//! edits the pending set; applying commits it and persists all three
//! committed sets as one blob under [`keys::SELECTED_ITEMS`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::catalog::{Catalog, CatalogItem, CatalogKind, Catalogs};
use crate::stageable::Stageable;
use crate::store::{self, KeyValueStore, keys};

/// Committed and pending selected keys for one catalog.
#[derive(Debug, Clone)]
pub struct SelectionState {
    catalog: Arc<Catalog>,
    keys: Stageable<BTreeSet<String>>,
}

impl SelectionState {
    /// Start from a stored selection, or select everything if none is stored.
    ///
    /// Stored keys the catalog no longer has are dropped.
    pub fn initialize(catalog: Arc<Catalog>, stored: Option<&[String]>) -> Self {
        let committed = match stored {
            Some(stored) => stored
                .iter()
                .filter(|key| catalog.contains(key))
                .cloned()
                .collect(),
            None => catalog.key_set(),
        };
        Self {
            catalog,
            keys: Stageable::new(committed),
        }
    }

    /// The catalog kind this selection filters.
    pub fn kind(&self) -> CatalogKind {
        self.catalog.kind()
    }

    /// The catalog being filtered.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The applied selection.
    pub fn committed(&self) -> &BTreeSet<String> {
        self.keys.committed()
    }

    /// The selection being edited.
    pub fn pending(&self) -> &BTreeSet<String> {
        self.keys.pending()
    }

    /// Whether `key` is checked in the pending selection.
    pub fn is_pending_selected(&self, key: &str) -> bool {
        self.keys.pending().contains(key)
    }

    /// Include or exclude `key` in the pending selection.
    ///
    /// Unknown keys are ignored. Returns whether the pending set changed.
    pub fn set_pending(&mut self, key: &str, included: bool) -> bool {
        if !self.catalog.contains(key) {
            tracing::debug!(kind = %self.kind(), key, "ignoring toggle of unknown key");
            return false;
        }
        let pending = self.keys.pending_mut();
        if included {
            pending.insert(key.to_string())
        } else {
            pending.remove(key)
        }
    }

    /// Check or uncheck every item in the pending selection.
    pub fn select_all(&mut self, included: bool) {
        *self.keys.pending_mut() = if included {
            self.catalog.key_set()
        } else {
            BTreeSet::new()
        };
    }

    /// Whether the pending selection differs from the applied one.
    pub fn is_dirty(&self) -> bool {
        self.keys.is_dirty()
    }

    /// Apply the pending selection. Persistence is done by [`Selections`].
    pub fn commit(&mut self) {
        self.keys.commit();
    }

    /// Throw away pending edits.
    pub fn discard(&mut self) {
        self.keys.discard();
    }

    /// Items a draw may pick, in catalog order.
    ///
    /// An empty applied selection means "no filter": the whole catalog is
    /// eligible.
    pub fn available_items(&self) -> Vec<&CatalogItem> {
        let committed = self.keys.committed();
        if committed.is_empty() {
            return self.catalog.items().iter().collect();
        }
        self.catalog
            .items()
            .iter()
            .filter(|item| committed.contains(&item.key))
            .collect()
    }

    /// Number of items a draw may pick.
    pub fn available_count(&self) -> usize {
        self.available_items().len()
    }
}

/// The rule, stage, and weapon selections together.
#[derive(Debug, Clone)]
pub struct Selections {
    rule: SelectionState,
    stage: SelectionState,
    weapon: SelectionState,
}

impl Selections {
    /// Build selections over `catalogs` from a stored kind → keys map.
    ///
    /// Kinds missing from the map start fully selected.
    pub fn initialize(catalogs: &Catalogs, stored: Option<&BTreeMap<String, Vec<String>>>) -> Self {
        let state = |kind: CatalogKind| {
            let keys = stored.and_then(|map| map.get(kind.as_str()));
            SelectionState::initialize(Arc::clone(catalogs.get(kind)), keys.map(Vec::as_slice))
        };
        Self {
            rule: state(CatalogKind::Rule),
            stage: state(CatalogKind::Stage),
            weapon: state(CatalogKind::Weapon),
        }
    }

    /// Build selections from whatever the store holds. A missing or
    /// malformed blob selects everything.
    pub fn load(catalogs: &Catalogs, store: &dyn KeyValueStore) -> Self {
        let stored: Option<BTreeMap<String, Vec<String>>> =
            store::read_json(store, keys::SELECTED_ITEMS);
        Self::initialize(catalogs, stored.as_ref())
    }

    /// The selection for `kind`.
    pub fn get(&self, kind: CatalogKind) -> &SelectionState {
        match kind {
            CatalogKind::Rule => &self.rule,
            CatalogKind::Stage => &self.stage,
            CatalogKind::Weapon => &self.weapon,
        }
    }

    /// Mutable access to the selection for `kind`.
    pub fn get_mut(&mut self, kind: CatalogKind) -> &mut SelectionState {
        match kind {
            CatalogKind::Rule => &mut self.rule,
            CatalogKind::Stage => &mut self.stage,
            CatalogKind::Weapon => &mut self.weapon,
        }
    }

    /// Whether `kind` has unapplied edits.
    pub fn is_dirty(&self, kind: CatalogKind) -> bool {
        self.get(kind).is_dirty()
    }

    /// Whether any kind has unapplied edits.
    pub fn any_dirty(&self) -> bool {
        CatalogKind::ALL.iter().any(|kind| self.is_dirty(*kind))
    }

    /// Apply pending edits for `kind` and persist. Returns whether the
    /// store write landed.
    pub fn commit(&mut self, kind: CatalogKind, store: &dyn KeyValueStore) -> bool {
        self.get_mut(kind).commit();
        tracing::debug!(%kind, count = self.get(kind).committed().len(), "selection applied");
        self.persist(store)
    }

    /// Apply pending edits for every kind and persist once.
    pub fn commit_all(&mut self, store: &dyn KeyValueStore) -> bool {
        for kind in CatalogKind::ALL {
            self.get_mut(kind).commit();
        }
        tracing::debug!("all selections applied");
        self.persist(store)
    }

    /// Throw away pending edits for `kind`.
    pub fn discard(&mut self, kind: CatalogKind) {
        self.get_mut(kind).discard();
    }

    /// Throw away pending edits for every kind.
    pub fn discard_all(&mut self) {
        for kind in CatalogKind::ALL {
            self.discard(kind);
        }
    }

    /// The committed sets in their stored shape.
    pub fn committed_map(&self) -> BTreeMap<String, Vec<String>> {
        CatalogKind::ALL
            .iter()
            .map(|kind| {
                let keys = self.get(*kind).committed().iter().cloned().collect();
                (kind.as_str().to_string(), keys)
            })
            .collect()
    }

    fn persist(&self, store: &dyn KeyValueStore) -> bool {
        store::write_json_best_effort(store, keys::SELECTED_ITEMS, &self.committed_map())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::testing::DeniedStore;
    use proptest::prelude::*;

    fn catalog(kind: CatalogKind, keys: &[&str]) -> Arc<Catalog> {
        Arc::new(
            Catalog::new(
                kind,
                keys.iter().map(|k| CatalogItem::new(*k, k.to_uppercase())).collect(),
            )
            .unwrap(),
        )
    }

    fn rules() -> Arc<Catalog> {
        catalog(CatalogKind::Rule, &["a", "b", "c"])
    }

    fn catalogs() -> Catalogs {
        Catalogs::new(
            Catalog::new(
                CatalogKind::Rule,
                vec![CatalogItem::new("a", "A"), CatalogItem::new("b", "B")],
            )
            .unwrap(),
            Catalog::new(CatalogKind::Stage, vec![CatalogItem::new("x", "X")]).unwrap(),
            Catalog::new(
                CatalogKind::Weapon,
                vec![CatalogItem::new("w1", "W1"), CatalogItem::new("w2", "W2")],
            )
            .unwrap(),
        )
    }

    fn keys_of(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.key.clone()).collect()
    }

    #[test]
    fn no_stored_selection_selects_all() {
        let s = SelectionState::initialize(rules(), None);
        assert_eq!(s.committed().len(), 3);
        assert!(!s.is_dirty());
    }

    #[test]
    fn stored_selection_drops_stale_keys() {
        let stored = vec!["a".to_string(), "gone".to_string()];
        let s = SelectionState::initialize(rules(), Some(&stored));
        assert_eq!(s.committed(), &BTreeSet::from(["a".to_string()]));
        assert_eq!(s.pending(), s.committed());
    }

    #[test]
    fn toggling_marks_dirty() {
        let mut s = SelectionState::initialize(rules(), None);
        assert!(s.set_pending("b", false));
        assert!(s.is_dirty());
        assert!(!s.is_pending_selected("b"));
        assert!(!s.set_pending("b", false));

        assert!(s.set_pending("b", true));
        assert!(!s.is_dirty());
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut s = SelectionState::initialize(rules(), None);
        assert!(!s.set_pending("zzz", true));
        assert!(!s.is_pending_selected("zzz"));
        assert!(!s.is_dirty());
    }

    #[test]
    fn select_all_and_none() {
        let mut s = SelectionState::initialize(rules(), None);
        s.select_all(false);
        assert!(s.pending().is_empty());
        assert!(s.is_dirty());
        s.select_all(true);
        assert_eq!(s.pending().len(), 3);
        assert!(!s.is_dirty());
    }

    #[test]
    fn commit_and_discard_clear_dirty() {
        let mut s = SelectionState::initialize(rules(), None);
        s.set_pending("a", false);
        s.commit();
        assert!(!s.is_dirty());
        assert!(!s.committed().contains("a"));

        s.set_pending("c", false);
        s.discard();
        assert!(!s.is_dirty());
        assert!(s.committed().contains("c"));
    }

    #[test]
    fn available_items_follow_committed_only() {
        let mut s = SelectionState::initialize(rules(), None);
        s.set_pending("b", false);
        assert_eq!(s.available_count(), 3);
        s.commit();
        assert_eq!(keys_of(&s.available_items()), vec!["a", "c"]);
    }

    #[test]
    fn empty_selection_means_all() {
        let mut s = SelectionState::initialize(catalog(CatalogKind::Rule, &["a", "b"]), None);
        s.select_all(false);
        s.commit();
        assert!(s.committed().is_empty());
        assert_eq!(keys_of(&s.available_items()), vec!["a", "b"]);
    }

    #[test]
    fn selections_persist_on_commit() {
        let store = MemoryStore::new();
        let mut sel = Selections::initialize(&catalogs(), None);
        sel.get_mut(CatalogKind::Rule).set_pending("b", false);
        assert!(sel.is_dirty(CatalogKind::Rule));
        assert!(!sel.is_dirty(CatalogKind::Stage));
        assert!(sel.any_dirty());

        assert!(sel.commit(CatalogKind::Rule, &store));
        assert!(!sel.any_dirty());

        let stored: BTreeMap<String, Vec<String>> =
            store::read_json(&store, keys::SELECTED_ITEMS).unwrap();
        assert_eq!(stored["rule"], vec!["a"]);
        assert_eq!(stored["stage"], vec!["x"]);
        assert_eq!(stored["weapon"], vec!["w1", "w2"]);
    }

    #[test]
    fn selections_load_round_trip() {
        let store = MemoryStore::new();
        let mut sel = Selections::initialize(&catalogs(), None);
        sel.get_mut(CatalogKind::Weapon).set_pending("w1", false);
        sel.commit_all(&store);

        let loaded = Selections::load(&catalogs(), &store);
        assert_eq!(
            loaded.get(CatalogKind::Weapon).committed(),
            &BTreeSet::from(["w2".to_string()])
        );
        assert_eq!(loaded.get(CatalogKind::Rule).committed().len(), 2);
    }

    #[test]
    fn malformed_blob_selects_all() {
        let store = MemoryStore::new();
        store.set(keys::SELECTED_ITEMS, "{\"rule\": 5").unwrap();
        let sel = Selections::load(&catalogs(), &store);
        assert_eq!(sel.get(CatalogKind::Rule).committed().len(), 2);
    }

    #[test]
    fn commit_survives_store_failure() {
        let mut sel = Selections::initialize(&catalogs(), None);
        sel.get_mut(CatalogKind::Stage).select_all(false);
        assert!(!sel.commit(CatalogKind::Stage, &DeniedStore));
        assert!(!sel.is_dirty(CatalogKind::Stage));
        assert!(sel.get(CatalogKind::Stage).committed().is_empty());
    }

    #[test]
    fn discard_all_resets_every_kind() {
        let mut sel = Selections::initialize(&catalogs(), None);
        sel.get_mut(CatalogKind::Rule).select_all(false);
        sel.get_mut(CatalogKind::Weapon).set_pending("w2", false);
        sel.discard_all();
        assert!(!sel.any_dirty());
    }

    #[test]
    fn weapon_draw_picks_from_selected_weapons() {
        use crate::draw::{SlotId, run_draw};
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let sel = Selections::initialize(&catalogs(), None);
        let available = sel.get(CatalogKind::Weapon).available_items();
        let mut rng = StdRng::seed_from_u64(5);
        let drawn = run_draw(CatalogKind::Weapon, &available, 2, &mut rng).unwrap();

        assert_eq!(
            drawn.iter().map(|(slot, _)| *slot).collect::<Vec<_>>(),
            vec![SlotId::Weapon(1), SlotId::Weapon(2)]
        );
        for (_, item) in &drawn {
            assert!(["w1", "w2"].contains(&item.key.as_str()), "drew {}", item.key);
        }
    }

    proptest! {
        #[test]
        fn commit_or_discard_is_never_dirty(
            toggles in proptest::collection::vec((0usize..4, any::<bool>()), 0..20),
            commit in any::<bool>(),
        ) {
            let keys = ["a", "b", "c", "missing"];
            let mut s = SelectionState::initialize(rules(), None);
            for (i, included) in toggles {
                s.set_pending(keys[i], included);
            }
            if commit { s.commit() } else { s.discard() }
            prop_assert!(!s.is_dirty());
            prop_assert!(s.committed().iter().all(|k| s.catalog().contains(k)));
        }
    }
}
