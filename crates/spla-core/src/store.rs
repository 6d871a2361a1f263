//! Key-value persistence.
//!
//! The store is a plain string-to-string map. Nothing in the core treats a
//! store failure as fatal: the `*_best_effort` helpers log and move on, and
//! reads of missing or malformed values come back as `None`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};

/// Well-known store keys.
pub mod keys {
    /// Selected keys per catalog kind.
    pub const SELECTED_ITEMS: &str = "spla-selected-items";
    /// Collapse state of result sections.
    pub const SECTION_STATES: &str = "spla-section-states";
    /// Collapse state of the filter panel.
    pub const FILTER_SECTION_STATE: &str = "spla-filter-section-state";
    /// Number of members.
    pub const MEMBER_COUNT: &str = "memberCount";
    /// Whether team division is on.
    pub const TEAM_DIVISION: &str = "teamDivisionToggle";

    /// Key holding the name of member `index` (1-based).
    pub fn member_name(index: u32) -> String {
        format!("memberName{index}")
    }
}

/// Durable string-keyed storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> StoreResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.entries).map(|e| e.len()).unwrap_or(0)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}

/// A store backed by a single JSON object on disk.
///
/// The whole file is read on open and rewritten on every change. A missing
/// file is an empty store; an unreadable one is logged and treated as empty.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or start) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "store file is malformed, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "store file is unreadable, starting empty");
                BTreeMap::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = lock(&self.entries)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = lock(&self.entries)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// Read a raw string, treating any failure as absent.
pub fn read_string(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "store read failed");
            None
        }
    }
}

/// Read and decode a JSON value, treating missing, empty, or malformed
/// entries as absent.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = read_string(store, key)?;
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring malformed stored value");
            None
        }
    }
}

/// Write a raw string. Failures are logged; returns whether the write landed.
pub fn write_string_best_effort(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(key, error = %e, "store write failed");
            false
        }
    }
}

/// Encode and write a JSON value. Failures are logged; returns whether the
/// write landed.
pub fn write_json_best_effort<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> bool {
    match serde_json::to_string(value) {
        Ok(raw) => write_string_best_effort(store, key, &raw),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not encode value for store");
            false
        }
    }
}

/// Delete a key. Failures are logged.
pub fn remove_best_effort(store: &dyn KeyValueStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!(key, error = %e, "store remove failed");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::DeniedStore;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_crud() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        store.remove("missing").unwrap();
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = FileStore::open(&path);
        store.set(keys::MEMBER_COUNT, "3").unwrap();
        store.set(&keys::member_name(1), "Alice").unwrap();
        store.remove(&keys::member_name(1)).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(keys::MEMBER_COUNT).unwrap().as_deref(), Some("3"));
        assert_eq!(reopened.get(&keys::member_name(1)).unwrap(), None);
    }

    #[test]
    fn file_store_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get("anything").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(FileStore::open(&path).get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn read_json_treats_garbage_as_absent() {
        let store = MemoryStore::new();
        store.set("good", "[1,2,3]").unwrap();
        store.set("bad", "[1,2").unwrap();
        store.set("blank", "  ").unwrap();

        assert_eq!(read_json::<Vec<u32>>(&store, "good"), Some(vec![1, 2, 3]));
        assert_eq!(read_json::<Vec<u32>>(&store, "bad"), None);
        assert_eq!(read_json::<Vec<u32>>(&store, "blank"), None);
        assert_eq!(read_json::<Vec<u32>>(&store, "missing"), None);
    }

    #[test]
    fn denied_store_never_panics() {
        let store = DeniedStore;
        assert_eq!(read_string(&store, "k"), None);
        assert_eq!(read_json::<u32>(&store, "k"), None);
        assert!(!write_string_best_effort(&store, "k", "v"));
        assert!(!write_json_best_effort(&store, "k", &[1, 2]));
        remove_best_effort(&store, "k");
    }

    #[test]
    fn member_name_key() {
        assert_eq!(keys::member_name(2), "memberName2");
    }
}
