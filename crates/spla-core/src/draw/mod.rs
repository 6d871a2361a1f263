//! Random selection over catalog items.
//!
//! Rules and stages are drawn once for the whole group; weapons are drawn
//! independently for every member, with replacement, so two members can get
//! the same weapon. All functions are stateless and take the RNG explicitly.

pub mod shuffle;
pub mod team;

pub use shuffle::shuffle;
pub use team::{Team, TeamAssignment, divide_teams};

use std::collections::BTreeMap;
use std::str::FromStr;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogItem, CatalogKind};
use crate::error::{CoreError, CoreResult};

/// Pick one element uniformly, or `None` for an empty pool.
pub fn draw_one<'a, T>(pool: &'a [T], rng: &mut StdRng) -> Option<&'a T> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.random_range(0..pool.len()))
}

/// Where a drawn item is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SlotId {
    /// The rule shared by everyone.
    CommonRule,
    /// The stage shared by everyone.
    CommonStage,
    /// The weapon of member `n` (1-based).
    Weapon(u32),
}

impl SlotId {
    /// The shared slot for `kind`, or `None` for per-member kinds.
    pub fn shared(kind: CatalogKind) -> Option<Self> {
        match kind {
            CatalogKind::Rule => Some(Self::CommonRule),
            CatalogKind::Stage => Some(Self::CommonStage),
            CatalogKind::Weapon => None,
        }
    }

    /// The catalog this slot is filled from.
    pub fn kind(self) -> CatalogKind {
        match self {
            Self::CommonRule => CatalogKind::Rule,
            Self::CommonStage => CatalogKind::Stage,
            Self::Weapon(_) => CatalogKind::Weapon,
        }
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommonRule => write!(f, "common-rule"),
            Self::CommonStage => write!(f, "common-stage"),
            Self::Weapon(n) => write!(f, "{n}-weapon"),
        }
    }
}

impl FromStr for SlotId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common-rule" => Ok(Self::CommonRule),
            "common-stage" => Ok(Self::CommonStage),
            other => other
                .strip_suffix("-weapon")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n >= 1)
                .map(Self::Weapon)
                .ok_or_else(|| CoreError::UnknownSlot(other.to_string())),
        }
    }
}

impl From<SlotId> for String {
    fn from(slot: SlotId) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for SlotId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Draw results for one catalog kind.
///
/// Rule and stage yield a single shared slot. Weapon yields one slot per
/// member in `1..=member_count`, each an independent draw from the same
/// pool. An empty pool refuses the draw with [`CoreError::EmptyPool`].
pub fn run_draw(
    kind: CatalogKind,
    available: &[&CatalogItem],
    member_count: u32,
    rng: &mut StdRng,
) -> CoreResult<Vec<(SlotId, CatalogItem)>> {
    if available.is_empty() {
        return Err(CoreError::EmptyPool(kind));
    }

    let pick = |rng: &mut StdRng| {
        draw_one(available, rng)
            .map(|item| (*item).clone())
            .ok_or(CoreError::EmptyPool(kind))
    };

    match SlotId::shared(kind) {
        Some(slot) => Ok(vec![(slot, pick(rng)?)]),
        None => (1..=member_count)
            .map(|member| Ok((SlotId::Weapon(member), pick(rng)?)))
            .collect(),
    }
}

/// The current draw results, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    slots: BTreeMap<SlotId, CatalogItem>,
}

impl DrawResult {
    /// No results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store drawn items, overwriting their slots.
    pub fn extend(&mut self, drawn: impl IntoIterator<Item = (SlotId, CatalogItem)>) {
        self.slots.extend(drawn);
    }

    /// The item in `slot`, if drawn.
    pub fn get(&self, slot: SlotId) -> Option<&CatalogItem> {
        self.slots.get(&slot)
    }

    /// Drop every result of `kind`.
    pub fn clear_kind(&mut self, kind: CatalogKind) {
        self.slots.retain(|slot, _| slot.kind() != kind);
    }

    /// Drop all results.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Iterate slots in display order: rule, stage, then weapons by member.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &CatalogItem)> + '_ {
        self.slots.iter().map(|(slot, item)| (*slot, item))
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn items(keys: &[&str]) -> Vec<CatalogItem> {
        keys.iter().map(|k| CatalogItem::new(*k, k.to_uppercase())).collect()
    }

    #[test]
    fn draw_one_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(draw_one::<u32>(&[], &mut rng).is_none());
    }

    #[test]
    fn draw_one_covers_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = ["a", "b", "c"];
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            seen.insert(*draw_one(&pool, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn slot_id_round_trip_strings() {
        for (slot, text) in [
            (SlotId::CommonRule, "common-rule"),
            (SlotId::CommonStage, "common-stage"),
            (SlotId::Weapon(3), "3-weapon"),
        ] {
            assert_eq!(slot.to_string(), text);
            assert_eq!(text.parse::<SlotId>().unwrap(), slot);
        }
        assert!("0-weapon".parse::<SlotId>().is_err());
        assert!("x-weapon".parse::<SlotId>().is_err());
        assert!("common-gear".parse::<SlotId>().is_err());
    }

    #[test]
    fn slot_order_is_display_order() {
        let mut slots = vec![SlotId::Weapon(2), SlotId::CommonStage, SlotId::Weapon(1), SlotId::CommonRule];
        slots.sort();
        assert_eq!(
            slots,
            vec![SlotId::CommonRule, SlotId::CommonStage, SlotId::Weapon(1), SlotId::Weapon(2)]
        );
    }

    #[test]
    fn rule_draw_is_shared() {
        let pool = items(&["a", "b"]);
        let refs: Vec<&CatalogItem> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let drawn = run_draw(CatalogKind::Rule, &refs, 4, &mut rng).unwrap();
            assert_eq!(drawn.len(), 1);
            assert_eq!(drawn[0].0, SlotId::CommonRule);
            assert!(["a", "b"].contains(&drawn[0].1.key.as_str()));
        }
    }

    #[test]
    fn stage_draw_uses_stage_slot() {
        let pool = items(&["x"]);
        let refs: Vec<&CatalogItem> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(1);
        let drawn = run_draw(CatalogKind::Stage, &refs, 2, &mut rng).unwrap();
        assert_eq!(drawn, vec![(SlotId::CommonStage, pool[0].clone())]);
    }

    #[test]
    fn weapon_draw_one_per_member() {
        let pool = items(&["w1", "w2", "w3"]);
        let refs: Vec<&CatalogItem> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(8);
        let drawn = run_draw(CatalogKind::Weapon, &refs, 4, &mut rng).unwrap();
        assert_eq!(drawn.len(), 4);
        let slots: Vec<SlotId> = drawn.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            slots,
            vec![SlotId::Weapon(1), SlotId::Weapon(2), SlotId::Weapon(3), SlotId::Weapon(4)]
        );
        assert!(drawn.iter().all(|(_, item)| pool.contains(item)));
    }

    #[test]
    fn weapon_draws_are_independent() {
        // With replacement: across many runs every member sees every weapon,
        // and duplicates within one draw happen.
        let pool = items(&["w1", "w2", "w3"]);
        let refs: Vec<&CatalogItem> = pool.iter().collect();
        let mut rng = StdRng::seed_from_u64(77);
        let mut per_member = vec![std::collections::HashMap::<String, u32>::new(); 4];
        let mut saw_duplicate = false;
        for _ in 0..3_000 {
            let drawn = run_draw(CatalogKind::Weapon, &refs, 4, &mut rng).unwrap();
            let keys: Vec<&str> = drawn.iter().map(|(_, i)| i.key.as_str()).collect();
            let unique: std::collections::HashSet<&&str> = keys.iter().collect();
            saw_duplicate |= unique.len() < keys.len();
            for (m, key) in keys.iter().enumerate() {
                *per_member[m].entry(key.to_string()).or_default() += 1;
            }
        }
        assert!(saw_duplicate);
        for counts in per_member {
            assert_eq!(counts.len(), 3);
            for count in counts.values() {
                assert!((800..=1_200).contains(count), "skewed: {count}");
            }
        }
    }

    #[test]
    fn empty_pool_is_refused() {
        let mut rng = StdRng::seed_from_u64(0);
        for kind in CatalogKind::ALL {
            let err = run_draw(kind, &[], 2, &mut rng).unwrap_err();
            assert!(matches!(err, CoreError::EmptyPool(k) if k == kind));
        }
    }

    #[test]
    fn draw_result_overwrites_and_clears() {
        let mut result = DrawResult::new();
        result.extend([(SlotId::CommonRule, CatalogItem::new("a", "A"))]);
        result.extend([(SlotId::CommonRule, CatalogItem::new("b", "B"))]);
        result.extend([
            (SlotId::Weapon(1), CatalogItem::new("w", "W")),
            (SlotId::Weapon(2), CatalogItem::new("w", "W")),
        ]);
        assert_eq!(result.len(), 3);
        assert_eq!(result.get(SlotId::CommonRule).unwrap().key, "b");

        result.clear_kind(CatalogKind::Weapon);
        assert_eq!(result.len(), 1);
        result.clear();
        assert!(result.is_empty());
    }

    #[test]
    fn draw_result_serializes_slot_names() {
        let mut result = DrawResult::new();
        result.extend([(SlotId::Weapon(2), CatalogItem::new("w", "W"))]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"2-weapon\""));
        let back: DrawResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
