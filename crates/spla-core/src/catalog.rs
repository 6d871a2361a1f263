use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Locale tried when the requested one has no entry.
pub const FALLBACK_LOCALES: &[&str] = &["ja_JP", "en_US"];

/// The three catalogs a draw can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Game modes (Turf War, Splat Zones, ...).
    Rule,
    /// Battle stages.
    Stage,
    /// Main weapons.
    Weapon,
}

impl CatalogKind {
    /// All kinds, in draw order.
    pub const ALL: [CatalogKind; 3] = [Self::Rule, Self::Stage, Self::Weapon];

    /// Store key under which this catalog is cached.
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::Rule => "spla-rules",
            Self::Stage => "spla-stages",
            Self::Weapon => "spla-weapons",
        }
    }

    /// Lowercase identifier used in resource paths and commands.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "rule",
            Self::Stage => "stage",
            Self::Weapon => "weapon",
        }
    }

    /// Whether one result is shared by the whole group (rule, stage) rather
    /// than drawn per member (weapon).
    pub fn is_shared(self) -> bool {
        !matches!(self, Self::Weapon)
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rule" | "rules" => Ok(Self::Rule),
            "stage" | "stages" => Ok(Self::Stage),
            "weapon" | "weapons" => Ok(Self::Weapon),
            other => Err(CoreError::UnknownKind(other.to_string())),
        }
    }
}

/// A display name, either a single string or one entry per locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedName {
    /// The same name in every locale.
    Plain(String),
    /// Locale code (`ja_JP`, `en_US`, ...) to name.
    Localized(BTreeMap<String, String>),
}

impl LocalizedName {
    /// The name for `locale`, falling back to Japanese, English, then any
    /// entry at all.
    pub fn get(&self, locale: &str) -> Option<&str> {
        match self {
            Self::Plain(name) => Some(name.as_str()),
            Self::Localized(map) => std::iter::once(locale)
                .chain(FALLBACK_LOCALES.iter().copied())
                .find_map(|loc| map.get(loc))
                .or_else(|| map.values().next())
                .map(String::as_str),
        }
    }
}

impl From<&str> for LocalizedName {
    fn from(name: &str) -> Self {
        Self::Plain(name.to_string())
    }
}

/// One selectable entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier within its catalog.
    pub key: String,
    /// Display name.
    pub name: LocalizedName,
}

impl CatalogItem {
    /// Create an item with a plain (unlocalized) name.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: LocalizedName::Plain(name.into()),
        }
    }

    /// The name to show for `locale`, or the key if no name is known.
    pub fn display_name(&self, locale: &str) -> &str {
        self.name.get(locale).unwrap_or(&self.key)
    }
}

/// An ordered list of items for one catalog kind. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate keys.
    pub fn new(kind: CatalogKind, items: Vec<CatalogItem>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.key.as_str()) {
                return Err(CoreError::DuplicateKey {
                    kind,
                    key: item.key.clone(),
                });
            }
        }
        Ok(Self { kind, items })
    }

    /// An empty catalog, used before anything has been loaded.
    pub fn empty(kind: CatalogKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    /// The kind of this catalog.
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by key.
    pub fn get(&self, key: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.key == key)
    }

    /// Whether an item with `key` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All keys as a set.
    pub fn key_set(&self) -> BTreeSet<String> {
        self.items.iter().map(|item| item.key.clone()).collect()
    }

    /// A copy of this catalog without the given keys, order preserved.
    pub fn without(&self, excluded: &BTreeSet<String>) -> Self {
        Self {
            kind: self.kind,
            items: self
                .items
                .iter()
                .filter(|item| !excluded.contains(&item.key))
                .cloned()
                .collect(),
        }
    }
}

/// The rule, stage, and weapon catalogs together.
#[derive(Debug, Clone)]
pub struct Catalogs {
    rule: Arc<Catalog>,
    stage: Arc<Catalog>,
    weapon: Arc<Catalog>,
}

impl Catalogs {
    /// Bundle three catalogs. Each must carry its matching kind.
    pub fn new(rule: Catalog, stage: Catalog, weapon: Catalog) -> Self {
        debug_assert_eq!(rule.kind(), CatalogKind::Rule);
        debug_assert_eq!(stage.kind(), CatalogKind::Stage);
        debug_assert_eq!(weapon.kind(), CatalogKind::Weapon);
        Self {
            rule: Arc::new(rule),
            stage: Arc::new(stage),
            weapon: Arc::new(weapon),
        }
    }

    /// Three empty catalogs.
    pub fn empty() -> Self {
        Self::new(
            Catalog::empty(CatalogKind::Rule),
            Catalog::empty(CatalogKind::Stage),
            Catalog::empty(CatalogKind::Weapon),
        )
    }

    /// The catalog of the given kind.
    pub fn get(&self, kind: CatalogKind) -> &Arc<Catalog> {
        match kind {
            CatalogKind::Rule => &self.rule,
            CatalogKind::Stage => &self.stage,
            CatalogKind::Weapon => &self.weapon,
        }
    }

    /// Whether every catalog is empty.
    pub fn is_empty(&self) -> bool {
        CatalogKind::ALL.iter().all(|kind| self.get(*kind).is_empty())
    }
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn localized(pairs: &[(&str, &str)]) -> LocalizedName {
        LocalizedName::Localized(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn kind_parse_and_display() {
        assert_eq!("rule".parse::<CatalogKind>().unwrap(), CatalogKind::Rule);
        assert_eq!("Stages".parse::<CatalogKind>().unwrap(), CatalogKind::Stage);
        assert_eq!(" weapon ".parse::<CatalogKind>().unwrap(), CatalogKind::Weapon);
        assert!("gear".parse::<CatalogKind>().is_err());
        assert_eq!(CatalogKind::Weapon.to_string(), "weapon");
    }

    #[test]
    fn kind_cache_keys() {
        assert_eq!(CatalogKind::Rule.cache_key(), "spla-rules");
        assert_eq!(CatalogKind::Stage.cache_key(), "spla-stages");
        assert_eq!(CatalogKind::Weapon.cache_key(), "spla-weapons");
    }

    #[test]
    fn kind_shared() {
        assert!(CatalogKind::Rule.is_shared());
        assert!(CatalogKind::Stage.is_shared());
        assert!(!CatalogKind::Weapon.is_shared());
    }

    #[test]
    fn localized_name_fallbacks() {
        let name = localized(&[("ja_JP", "ナワバリバトル"), ("en_US", "Turf War")]);
        assert_eq!(name.get("en_US"), Some("Turf War"));
        assert_eq!(name.get("ja_JP"), Some("ナワバリバトル"));
        assert_eq!(name.get("fr_FR"), Some("ナワバリバトル"));

        let only_french = localized(&[("fr_FR", "Guerre de territoire")]);
        assert_eq!(only_french.get("en_US"), Some("Guerre de territoire"));

        let empty = localized(&[]);
        assert_eq!(empty.get("en_US"), None);
    }

    #[test]
    fn display_name_falls_back_to_key() {
        let item = CatalogItem {
            key: "area".to_string(),
            name: localized(&[]),
        };
        assert_eq!(item.display_name("ja_JP"), "area");
    }

    #[test]
    fn name_deserializes_plain_or_map() {
        let plain: CatalogItem = serde_json::from_str(r#"{"key":"a","name":"A"}"#).unwrap();
        assert_eq!(plain.name, LocalizedName::Plain("A".to_string()));

        let map: CatalogItem =
            serde_json::from_str(r#"{"key":"a","name":{"en_US":"A","ja_JP":"エー"}}"#).unwrap();
        assert_eq!(map.display_name("en_US"), "A");
    }

    #[test]
    fn catalog_rejects_duplicates() {
        let result = Catalog::new(
            CatalogKind::Stage,
            vec![CatalogItem::new("x", "X"), CatalogItem::new("x", "X again")],
        );
        assert!(matches!(
            result,
            Err(CoreError::DuplicateKey { kind: CatalogKind::Stage, ref key }) if key == "x"
        ));
    }

    #[test]
    fn catalog_lookup() {
        let catalog = Catalog::new(
            CatalogKind::Rule,
            vec![CatalogItem::new("a", "A"), CatalogItem::new("b", "B")],
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("b"));
        assert!(!catalog.contains("c"));
        assert_eq!(catalog.get("a").unwrap().display_name("en_US"), "A");
        assert_eq!(catalog.key_set().len(), 2);
    }

    #[test]
    fn catalog_without_preserves_order() {
        let catalog = Catalog::new(
            CatalogKind::Rule,
            vec![
                CatalogItem::new("a", "A"),
                CatalogItem::new("b", "B"),
                CatalogItem::new("c", "C"),
            ],
        )
        .unwrap();
        let excluded = BTreeSet::from(["b".to_string()]);
        let filtered = catalog.without(&excluded);
        let keys: Vec<&str> = filtered.items().iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(filtered.kind(), CatalogKind::Rule);
    }

    #[test]
    fn catalogs_by_kind() {
        let catalogs = Catalogs::empty();
        assert!(catalogs.is_empty());
        assert_eq!(catalogs.get(CatalogKind::Weapon).kind(), CatalogKind::Weapon);
    }
}
