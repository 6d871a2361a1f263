//! Splitting a roster into two teams.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::shuffle::shuffle;

/// One of the two sides in a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    /// First team; gets the extra member when the count is odd.
    Alpha,
    /// Second team.
    Bravo,
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "Alpha"),
            Self::Bravo => write!(f, "Bravo"),
        }
    }
}

/// Shuffle `members` and split after the first `ceil(n/2)`.
///
/// Returns `(alpha, bravo)`. A single member goes to Alpha.
pub fn divide_teams<T: Clone>(members: &[T], rng: &mut StdRng) -> (Vec<T>, Vec<T>) {
    let mut shuffled = shuffle(members, rng);
    let bravo = shuffled.split_off(members.len().div_ceil(2));
    (shuffled, bravo)
}

/// Team of each member, keyed by 1-based member index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamAssignment {
    teams: BTreeMap<u32, Team>,
}

impl TeamAssignment {
    /// No assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Divide the given member indices into two teams.
    ///
    /// Works on indices, so two members with the same name are still
    /// placed independently.
    pub fn divide(indices: &[u32], rng: &mut StdRng) -> Self {
        let (alpha, bravo) = divide_teams(indices, rng);
        let teams = alpha
            .into_iter()
            .map(|i| (i, Team::Alpha))
            .chain(bravo.into_iter().map(|i| (i, Team::Bravo)))
            .collect();
        Self { teams }
    }

    /// The team of member `index`, if assigned.
    pub fn team_of(&self, index: u32) -> Option<Team> {
        self.teams.get(&index).copied()
    }

    /// Member indices on `team`, ascending.
    pub fn members_of(&self, team: Team) -> Vec<u32> {
        self.teams
            .iter()
            .filter(|(_, t)| **t == team)
            .map(|(i, _)| *i)
            .collect()
    }

    /// Iterate `(index, team)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Team)> + '_ {
        self.teams.iter().map(|(i, t)| (*i, *t))
    }

    /// Number of assigned members.
    pub fn len(&self) -> usize {
        self.teams.len()
    }

    /// Whether no one is assigned.
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Drop every assignment.
    pub fn clear(&mut self) {
        self.teams.clear();
    }
}
