//! Key-value persistence for the visit state.
//!
//! The state is two JSON arrays of display names stored under
//! [`VISITED_KEY`] and [`WISHLIST_KEY`]. [`PersistentStore`] reads both keys
//! once when it is opened and writes both after every mutation; the last
//! write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::feature::DistrictFeature;
use crate::lock::{LockMode, StateLock};
use crate::store::{Conquest, DistrictStatus, Membership, Snapshot, Stats, VisitStateStore};

pub const VISITED_KEY: &str = "visitedCities";
pub const WISHLIST_KEY: &str = "wishlistCities";

/// Backing key-value store.
pub trait Storage {
    /// Read the JSON value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the medium cannot be written.
    fn save(&mut self, key: &str, value: &Value) -> Result<()>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns an error when the medium cannot be written.
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, Value>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

/// A single JSON object file mapping keys to values.
///
/// Writes go through a sibling `.tmp` file and a rename while holding an
/// exclusive lock on a sibling `.lock` file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    lock_timeout: Duration,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            lock_timeout,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, mode: LockMode) -> Result<StateLock> {
        Ok(StateLock::acquire(
            &self.path.with_extension("lock"),
            mode,
            self.lock_timeout,
        )?)
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Storage {
            path: self.path.clone(),
            source,
        }
    }

    /// Read the whole map. A missing file is empty; a file that is not a
    /// JSON object is logged and treated as empty.
    fn read_map(&self) -> Result<serde_json::Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(serde_json::Map::new());
            }
            Err(source) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "state file is not a JSON object, treating as empty");
                Ok(serde_json::Map::new())
            }
        }
    }

    fn write_map(&self, map: &serde_json::Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let encoded = serde_json::to_string_pretty(map).map_err(|e| self.io_error(e.into()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, encoded.as_bytes()).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn load(&self, key: &str) -> Result<Option<Value>> {
        let _lock = self.lock(LockMode::Read)?;
        Ok(self.read_map()?.remove(key))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<()> {
        let _lock = self.lock(LockMode::Write)?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.clone());
        self.write_map(&map)?;
        debug!(path = %self.path.display(), key, "saved state key");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _lock = self.lock(LockMode::Write)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}

/// Decode one persisted name list.
///
/// Anything other than an array of strings is a malformed snapshot and
/// decodes as empty.
#[must_use]
pub fn decode_names(key: &str, value: Option<Value>) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };
    match serde_json::from_value::<Vec<String>>(value) {
        Ok(names) => names,
        Err(err) => {
            warn!(key, error = %err, "malformed persisted list, treating as empty");
            Vec::new()
        }
    }
}

/// Read a snapshot from storage, recovering malformed entries as empty.
///
/// # Errors
///
/// Only storage I/O failures are returned.
pub fn load_snapshot(storage: &dyn Storage) -> Result<Snapshot> {
    Ok(Snapshot {
        visited: decode_names(VISITED_KEY, storage.load(VISITED_KEY)?),
        wishlist: decode_names(WISHLIST_KEY, storage.load(WISHLIST_KEY)?),
    })
}

/// Write both name lists of `snapshot` to storage.
///
/// # Errors
///
/// Returns storage I/O failures.
pub fn save_snapshot(storage: &mut dyn Storage, snapshot: &Snapshot) -> Result<()> {
    storage.save(VISITED_KEY, &Value::from(snapshot.visited.clone()))?;
    storage.save(WISHLIST_KEY, &Value::from(snapshot.wishlist.clone()))?;
    Ok(())
}

/// [`VisitStateStore`] bound to a [`Storage`], saved after every mutation.
#[derive(Debug)]
pub struct PersistentStore<S: Storage> {
    store: VisitStateStore,
    storage: S,
}

impl<S: Storage> PersistentStore<S> {
    /// Load the persisted snapshot (or start empty) from `storage`.
    ///
    /// # Errors
    ///
    /// Returns storage I/O failures; malformed contents load as empty.
    pub fn open(storage: S) -> Result<Self> {
        let snapshot = load_snapshot(&storage)?;
        let store = VisitStateStore::from_snapshot(snapshot);
        debug!(
            visited = store.visited().count(),
            wishlist = store.wishlist().count(),
            "opened visit state"
        );
        Ok(Self { store, storage })
    }

    #[must_use]
    pub const fn store(&self) -> &VisitStateStore {
        &self.store
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    #[must_use]
    pub fn into_parts(self) -> (VisitStateStore, S) {
        (self.store, self.storage)
    }

    fn persist(&mut self) -> Result<()> {
        save_snapshot(&mut self.storage, &self.store.snapshot())
    }

    /// # Errors
    ///
    /// Returns storage I/O failures; the in-memory toggle has already happened.
    pub fn toggle_visited(&mut self, name: &str) -> Result<Membership> {
        let membership = self.store.toggle_visited(name);
        self.persist()?;
        Ok(membership)
    }

    /// # Errors
    ///
    /// Returns storage I/O failures; the in-memory toggle has already happened.
    pub fn toggle_wishlist(&mut self, name: &str) -> Result<Membership> {
        let membership = self.store.toggle_wishlist(name);
        self.persist()?;
        Ok(membership)
    }

    #[must_use]
    pub fn membership(&self, name: &str) -> Membership {
        self.store.membership(name)
    }

    #[must_use]
    pub fn stats(&self, total_districts: usize) -> Stats {
        self.store.stats(total_districts)
    }

    #[must_use]
    pub fn province_conquest(&self, districts: &[DistrictFeature], target_code: &str) -> Conquest {
        self.store.province_conquest(districts, target_code)
    }

    #[must_use]
    pub fn status(&self, name: &str, conquest: &Conquest) -> DistrictStatus {
        self.store.status(name, conquest)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Replace the state with `snapshot` and persist it.
    ///
    /// # Errors
    ///
    /// Returns storage I/O failures.
    pub fn restore(&mut self, snapshot: Snapshot) -> Result<()> {
        self.store.restore(snapshot);
        self.persist()
    }

    /// Clear both sets and wipe the storage.
    ///
    /// # Errors
    ///
    /// Returns storage I/O failures.
    pub fn reset(&mut self) -> Result<()> {
        self.store.reset();
        self.storage.clear()
    }
}
