//! The draw session controller.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use spla_catalog::{CatalogCache, Fetcher};
use spla_core::{
    CatalogItem, CatalogKind, Catalogs, CoreError, DrawResult, KeyValueStore, Member, RosterState,
    SectionStates, Selections, SlotId, TeamAssignment, draw,
};

use crate::command::Intent;
use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::event::SessionEvent;

/// Where the in-memory catalogs came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogStatus {
    /// The last load or refresh succeeded.
    Ready,
    /// The last load or refresh failed; catalogs are whatever was there before.
    Failed(String),
}

type Observer = Box<dyn FnMut(&SessionEvent) + Send>;

/// Application state plus one handler per [`Intent`].
///
/// Every handler either fully applies or returns an error and leaves the
/// session untouched. Persistence failures are logged, never surfaced.
pub struct DrawSession {
    config: SessionConfig,
    store: Arc<dyn KeyValueStore>,
    cache: CatalogCache,
    catalogs: Catalogs,
    selections: Selections,
    roster: RosterState,
    sections: SectionStates,
    results: DrawResult,
    status: CatalogStatus,
    rng: StdRng,
    observers: Vec<Observer>,
}

impl DrawSession {
    /// Load catalogs (from cache or remote) and restore persisted state.
    ///
    /// If team division was confirmed on, the roster is split right away.
    ///
    /// A failed catalog load does not fail the session: it starts with
    /// empty catalogs and [`CatalogStatus::Failed`], and every draw refuses
    /// until a refresh succeeds.
    pub async fn open(
        config: SessionConfig,
        store: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn Fetcher>,
    ) -> Self {
        let cache = CatalogCache::new(
            Arc::clone(&store),
            fetcher,
            config.catalog.exclusions.clone(),
        );
        let (catalogs, status) = match cache.load().await {
            Ok(catalogs) => (catalogs, CatalogStatus::Ready),
            Err(e) => {
                tracing::warn!(error = %e, "catalogs unavailable");
                (Catalogs::empty(), CatalogStatus::Failed(e.to_string()))
            }
        };
        let selections = Selections::load(&catalogs, store.as_ref());
        let sections = SectionStates::load(store.as_ref());
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        // teams are not persisted; a confirmed toggle gets a fresh split
        let mut roster = RosterState::load(config.roster.clone(), store.as_ref());
        roster.divide_teams(&mut rng);
        tracing::info!(
            rules = catalogs.get(CatalogKind::Rule).len(),
            stages = catalogs.get(CatalogKind::Stage).len(),
            weapons = catalogs.get(CatalogKind::Weapon).len(),
            members = roster.member_count(),
            "session opened"
        );

        Self {
            config,
            store,
            cache,
            catalogs,
            selections,
            roster,
            sections,
            results: DrawResult::new(),
            status,
            rng,
            observers: Vec::new(),
        }
    }

    /// Register a callback run after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: SessionEvent) {
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    // -- Read side --

    /// The configuration the session was opened with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The display locale.
    pub fn locale(&self) -> &str {
        self.config.locale()
    }

    /// The loaded catalogs.
    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    /// Whether the last catalog load succeeded.
    pub fn status(&self) -> &CatalogStatus {
        &self.status
    }

    /// Filter selections for every kind.
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Whether the pending filter for `kind` differs from the applied one.
    pub fn is_filter_dirty(&self, kind: CatalogKind) -> bool {
        self.selections.is_dirty(kind)
    }

    /// How many items a draw of `kind` may pick from.
    pub fn available_count(&self, kind: CatalogKind) -> usize {
        self.selections.get(kind).available_count()
    }

    /// The roster state.
    pub fn roster(&self) -> &RosterState {
        &self.roster
    }

    /// Whether the pending roster differs from the confirmed one.
    pub fn is_roster_dirty(&self) -> bool {
        self.roster.is_dirty()
    }

    /// Confirmed members in index order.
    pub fn members(&self) -> Vec<Member> {
        self.roster.members()
    }

    /// The current draw results.
    pub fn results(&self) -> &DrawResult {
        &self.results
    }

    /// The result for one slot.
    pub fn result(&self, slot: SlotId) -> Option<&CatalogItem> {
        self.results.get(slot)
    }

    /// The current team assignment. Empty unless division is on.
    pub fn teams(&self) -> &TeamAssignment {
        self.roster.teams()
    }

    /// Expanded/collapsed section flags.
    pub fn sections(&self) -> &SectionStates {
        &self.sections
    }

    // -- Intents --

    /// Handle one intent.
    pub async fn dispatch(&mut self, intent: Intent) -> SessionResult<()> {
        tracing::debug!(?intent, "dispatch");
        match intent {
            Intent::Draw(kind) => self.draw(kind),
            Intent::DrawAll => self.draw_all(),
            Intent::ToggleFilterItem {
                kind,
                key,
                included,
            } => {
                self.toggle_filter_item(kind, &key, included);
                Ok(())
            }
            Intent::SelectAll { kind, included } => {
                self.select_all(kind, included);
                Ok(())
            }
            Intent::ApplyFilter(kind) => {
                self.apply_filter(kind);
                Ok(())
            }
            Intent::DiscardFilter(kind) => {
                self.discard_filter(kind);
                Ok(())
            }
            Intent::SetMemberCount(count) => self.set_member_count(count),
            Intent::SetMemberName { index, name } => self.set_member_name(index, &name),
            Intent::ToggleTeamDivision(enabled) => {
                self.set_team_division(enabled);
                Ok(())
            }
            Intent::ConfirmRoster => {
                self.confirm_roster();
                Ok(())
            }
            Intent::DiscardRoster => {
                self.discard_roster();
                Ok(())
            }
            Intent::DivideTeams => {
                self.divide_teams();
                Ok(())
            }
            Intent::RefreshCatalog => self.refresh_catalogs().await,
            Intent::ToggleSection { name, open } => {
                self.toggle_section(&name, open);
                Ok(())
            }
        }
    }

    /// Draw `kind` from its committed filter, replacing that kind's results.
    ///
    /// An empty pool refuses the draw and keeps the previous results.
    pub fn draw(&mut self, kind: CatalogKind) -> SessionResult<()> {
        let drawn = draw::run_draw(
            kind,
            &self.selections.get(kind).available_items(),
            self.roster.member_count(),
            &mut self.rng,
        )?;
        self.results.clear_kind(kind);
        self.results.extend(drawn);
        tracing::info!(%kind, slots = self.results.len(), "drew");
        self.emit(SessionEvent::ResultsChanged);
        Ok(())
    }

    /// Draw every kind. If any pool is empty nothing is drawn.
    pub fn draw_all(&mut self) -> SessionResult<()> {
        if let Some(kind) = CatalogKind::ALL
            .into_iter()
            .find(|kind| self.available_count(*kind) == 0)
        {
            return Err(CoreError::EmptyPool(kind).into());
        }

        let mut drawn = Vec::new();
        for kind in CatalogKind::ALL {
            drawn.extend(draw::run_draw(
                kind,
                &self.selections.get(kind).available_items(),
                self.roster.member_count(),
                &mut self.rng,
            )?);
        }
        self.results.clear();
        self.results.extend(drawn);
        tracing::info!(slots = self.results.len(), "drew all");
        self.emit(SessionEvent::ResultsChanged);
        Ok(())
    }

    /// Include or exclude one item in the pending filter. Unknown keys are
    /// ignored.
    pub fn toggle_filter_item(&mut self, kind: CatalogKind, key: &str, included: bool) {
        if !self.selections.get_mut(kind).set_pending(key, included) {
            tracing::debug!(%kind, key, "filter unchanged");
            return;
        }
        let dirty = self.is_filter_dirty(kind);
        self.emit(SessionEvent::FilterEdited { kind, dirty });
    }

    /// Include or exclude every item in the pending filter.
    pub fn select_all(&mut self, kind: CatalogKind, included: bool) {
        self.selections.get_mut(kind).select_all(included);
        let dirty = self.is_filter_dirty(kind);
        self.emit(SessionEvent::FilterEdited { kind, dirty });
    }

    /// Commit pending filters, persist them, and clear the draw results.
    pub fn apply_filter(&mut self, kind: Option<CatalogKind>) {
        match kind {
            Some(kind) => {
                self.selections.commit(kind, self.store.as_ref());
            }
            None => {
                self.selections.commit_all(self.store.as_ref());
            }
        }
        self.results.clear();
        for kind in targets(kind) {
            self.emit(SessionEvent::FilterSettled(kind));
        }
        self.emit(SessionEvent::ResultsChanged);
    }

    /// Throw away pending filter edits.
    pub fn discard_filter(&mut self, kind: Option<CatalogKind>) {
        match kind {
            Some(kind) => self.selections.discard(kind),
            None => self.selections.discard_all(),
        }
        for kind in targets(kind) {
            self.emit(SessionEvent::FilterSettled(kind));
        }
    }

    /// Change the pending member count. Clears the draw results, since
    /// weapon slots no longer line up with members.
    pub fn set_member_count(&mut self, count: u32) -> SessionResult<()> {
        self.roster.set_pending_count(count)?;
        self.results.clear();
        let dirty = self.is_roster_dirty();
        self.emit(SessionEvent::RosterEdited { dirty });
        self.emit(SessionEvent::ResultsChanged);
        Ok(())
    }

    /// Rename pending member `index`.
    pub fn set_member_name(&mut self, index: u32, name: &str) -> SessionResult<()> {
        self.roster.set_pending_name(index, name)?;
        let dirty = self.is_roster_dirty();
        self.emit(SessionEvent::RosterEdited { dirty });
        Ok(())
    }

    /// Turn pending team division on or off.
    pub fn set_team_division(&mut self, enabled: bool) {
        self.roster.set_pending_team_division(enabled);
        let dirty = self.is_roster_dirty();
        self.emit(SessionEvent::RosterEdited { dirty });
    }

    /// Confirm the pending roster: persist it, re-split teams when division
    /// is on, and clear the draw results.
    pub fn confirm_roster(&mut self) {
        self.roster.commit(self.store.as_ref(), &mut self.rng);
        self.results.clear();
        self.emit(SessionEvent::RosterSettled);
        self.emit(SessionEvent::TeamsChanged);
        self.emit(SessionEvent::ResultsChanged);
    }

    /// Throw away pending roster edits.
    pub fn discard_roster(&mut self) {
        self.roster.discard();
        self.emit(SessionEvent::RosterSettled);
    }

    /// Re-split the confirmed roster. Returns false when division is off.
    pub fn divide_teams(&mut self) -> bool {
        let divided = self.roster.divide_teams(&mut self.rng);
        if divided {
            self.emit(SessionEvent::TeamsChanged);
        }
        divided
    }

    /// Drop every cached catalog and the persisted filter, then fetch again.
    ///
    /// On success every filter resets to "everything selected" and results
    /// clear. On failure the in-memory catalogs, filters, and results stay
    /// as they were and the error is returned.
    pub async fn refresh_catalogs(&mut self) -> SessionResult<()> {
        match self.cache.clear_and_refresh().await {
            Ok(catalogs) => {
                self.selections = Selections::initialize(&catalogs, None);
                self.catalogs = catalogs;
                self.results.clear();
                self.status = CatalogStatus::Ready;
                tracing::info!("catalogs refreshed");
                self.emit(SessionEvent::CatalogsReloaded);
                self.emit(SessionEvent::ResultsChanged);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh failed");
                self.status = CatalogStatus::Failed(e.to_string());
                self.emit(SessionEvent::CatalogFailed(e.to_string()));
                Err(e.into())
            }
        }
    }

    /// Expand or collapse a section. `filter` names the filter panel.
    pub fn toggle_section(&mut self, name: &str, open: bool) {
        if name == "filter" {
            self.sections.set_filter_open(open, self.store.as_ref());
        } else {
            self.sections.set_open(name, open, self.store.as_ref());
        }
        self.emit(SessionEvent::SectionToggled {
            name: name.to_string(),
            open,
        });
    }
}

fn targets(kind: Option<CatalogKind>) -> Vec<CatalogKind> {
    match kind {
        Some(kind) => vec![kind],
        None => CatalogKind::ALL.to_vec(),
    }
}
