//! The member roster: how many players, their names, and whether to split
//! them into teams.
//!
//! Edits go to a pending copy. Confirming commits the copy, persists each
//! field under its own store key, and re-runs (or clears) the team division.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::RosterConfig;
use crate::draw::TeamAssignment;
use crate::error::{CoreError, CoreResult};
use crate::stageable::Stageable;
use crate::store::{self, KeyValueStore, keys};

/// The editable roster fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterFields {
    /// Number of members, at least 1.
    pub member_count: u32,
    /// Name per 1-based member index.
    pub names: BTreeMap<u32, String>,
    /// Whether members are split into Alpha and Bravo.
    pub team_division: bool,
}

/// A committed member, for rendering and team lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// 1-based position in the roster.
    pub index: u32,
    /// Display name.
    pub name: String,
}

/// Committed and pending roster plus the current team assignment.
#[derive(Debug, Clone)]
pub struct RosterState {
    config: RosterConfig,
    fields: Stageable<RosterFields>,
    teams: TeamAssignment,
}

impl RosterState {
    /// Seed the roster from stored values, filling gaps from `config`.
    ///
    /// An out-of-range stored count falls back to the default; members
    /// without a stored name get a placeholder.
    pub fn initialize(
        config: RosterConfig,
        stored_count: Option<u32>,
        stored_names: &BTreeMap<u32, String>,
        stored_team_division: Option<bool>,
    ) -> Self {
        let config = config.normalized();
        let member_count = stored_count
            .filter(|n| (1..=config.max_members).contains(n))
            .unwrap_or(config.default_member_count);
        let names = (1..=member_count)
            .map(|i| {
                let name = stored_names
                    .get(&i)
                    .filter(|n| !n.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| config.member_placeholder(i));
                (i, name)
            })
            .collect();
        let fields = RosterFields {
            member_count,
            names,
            team_division: stored_team_division.unwrap_or(false),
        };
        Self {
            config,
            fields: Stageable::new(fields),
            teams: TeamAssignment::new(),
        }
    }

    /// Seed the roster from the store. Unreadable entries count as absent.
    pub fn load(config: RosterConfig, store: &dyn KeyValueStore) -> Self {
        let stored_count = store::read_string(store, keys::MEMBER_COUNT)
            .and_then(|raw| raw.trim().parse::<u32>().ok());
        let names = (1..=config.max_members)
            .filter_map(|i| store::read_string(store, &keys::member_name(i)).map(|n| (i, n)))
            .collect();
        let team_division = store::read_string(store, keys::TEAM_DIVISION)
            .and_then(|raw| raw.trim().parse::<bool>().ok());
        Self::initialize(config, stored_count, &names, team_division)
    }

    /// Roster defaults in effect.
    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// The confirmed roster.
    pub fn committed(&self) -> &RosterFields {
        self.fields.committed()
    }

    /// The roster being edited.
    pub fn pending(&self) -> &RosterFields {
        self.fields.pending()
    }

    /// Confirmed member count; draws use this, not the pending one.
    pub fn member_count(&self) -> u32 {
        self.committed().member_count
    }

    /// Confirmed members in index order.
    pub fn members(&self) -> Vec<Member> {
        let committed = self.committed();
        (1..=committed.member_count)
            .map(|index| Member {
                index,
                name: committed
                    .names
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| self.config.member_placeholder(index)),
            })
            .collect()
    }

    /// Current team assignment; empty when division is off.
    pub fn teams(&self) -> &TeamAssignment {
        &self.teams
    }

    /// Change the pending member count.
    ///
    /// New members get placeholder names (or their confirmed name, if they
    /// had one); names above the new count are dropped.
    pub fn set_pending_count(&mut self, count: u32) -> CoreResult<()> {
        if !(1..=self.config.max_members).contains(&count) {
            return Err(CoreError::InvalidMemberCount {
                count,
                max: self.config.max_members,
            });
        }
        let committed_names = self.fields.committed().names.clone();
        let placeholder = |i: u32| self.config.member_placeholder(i);
        let mut names = std::mem::take(&mut self.fields.pending_mut().names);
        names.retain(|i, _| *i <= count);
        for i in 1..=count {
            names
                .entry(i)
                .or_insert_with(|| committed_names.get(&i).cloned().unwrap_or_else(|| placeholder(i)));
        }
        let pending = self.fields.pending_mut();
        pending.names = names;
        pending.member_count = count;
        tracing::debug!(count, dirty = self.is_dirty(), "pending member count changed");
        Ok(())
    }

    /// Change the pending name of member `index`. A blank name reverts to
    /// the placeholder.
    pub fn set_pending_name(&mut self, index: u32, name: &str) -> CoreResult<()> {
        let count = self.pending().member_count;
        if !(1..=count).contains(&index) {
            return Err(CoreError::MemberOutOfRange { index, count });
        }
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            self.config.member_placeholder(index)
        } else {
            trimmed.to_string()
        };
        self.fields.pending_mut().names.insert(index, name);
        Ok(())
    }

    /// Turn pending team division on or off.
    pub fn set_pending_team_division(&mut self, enabled: bool) {
        self.fields.pending_mut().team_division = enabled;
    }

    /// Whether any pending field differs from the confirmed roster.
    pub fn is_dirty(&self) -> bool {
        self.fields.is_dirty()
    }

    /// Confirm the pending roster, persist it, and refresh the teams.
    pub fn commit(&mut self, store: &dyn KeyValueStore, rng: &mut StdRng) {
        self.fields.commit();
        self.persist(store);
        if self.committed().team_division {
            self.divide_teams(rng);
        } else {
            self.teams.clear();
        }
        tracing::debug!(
            members = self.member_count(),
            teams = self.committed().team_division,
            "roster confirmed"
        );
    }

    /// Throw away pending edits.
    pub fn discard(&mut self) {
        self.fields.discard();
    }

    /// Re-run the team division over the confirmed members. Does nothing
    /// (and returns false) when division is off.
    pub fn divide_teams(&mut self, rng: &mut StdRng) -> bool {
        if !self.committed().team_division {
            return false;
        }
        let indices: Vec<u32> = (1..=self.member_count()).collect();
        self.teams = TeamAssignment::divide(&indices, rng);
        true
    }

    fn persist(&self, store: &dyn KeyValueStore) {
        let committed = self.committed();
        store::write_string_best_effort(
            store,
            keys::MEMBER_COUNT,
            &committed.member_count.to_string(),
        );
        for (index, name) in &committed.names {
            store::write_string_best_effort(store, &keys::member_name(*index), name);
        }
        for stale in (committed.member_count + 1)..=self.config.max_members {
            store::remove_best_effort(store, &keys::member_name(stale));
        }
        store::write_string_best_effort(
            store,
            keys::TEAM_DIVISION,
            if committed.team_division { "true" } else { "false" },
        );
    }
}
