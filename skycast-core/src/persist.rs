//! Client-local storage
//!
//! Four keys, each a plain JSON file under the data directory:
//!
//! | Key | File |
//! |---|---|
//! | saved locations | `saved-locations.json` |
//! | current index | `current-location-index.json` |
//! | unit preference | `measure-units.json` |
//! | tracked ids | `tracked-locations.json` |
//!
//! Values are read once at start-up and rewritten after every mutation.
//! A missing or unreadable value falls back to its default.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::PersistError;
use crate::location::{LocationStore, ResolvedLocation};
use crate::weather::MeasureUnits;

/// One stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    SavedLocations,
    CurrentIndex,
    MeasureUnits,
    TrackedLocations,
}

impl StorageKey {
    /// Key name, also the file stem.
    pub fn name(self) -> &'static str {
        match self {
            StorageKey::SavedLocations => "saved-locations",
            StorageKey::CurrentIndex => "current-location-index",
            StorageKey::MeasureUnits => "measure-units",
            StorageKey::TrackedLocations => "tracked-locations",
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

/// Key/value JSON storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a new store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: StorageKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Read a value. `None` when absent or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        let path = self.path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key = key.name(), error = %e, "could not read stored value");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = key.name(), error = %e, "ignoring corrupt stored value");
                None
            }
        }
    }

    /// Replace a value. Writes a sibling temp file, then renames it over the
    /// old one so a crash never leaves a half-written value behind.
    pub fn write<T: Serialize>(&self, key: StorageKey, value: &T) -> Result<(), PersistError> {
        let io_err = |source| PersistError::Io {
            key: key.name().to_string(),
            source,
        };

        let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Encode {
            key: key.name().to_string(),
            source,
        })?;

        fs::create_dir_all(&self.dir).map_err(io_err)?;
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Everything the dashboard keeps between sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub locations: Vec<ResolvedLocation>,
    pub current_index: usize,
    pub units: MeasureUnits,
    pub tracked: BTreeSet<String>,
}

impl PersistedState {
    /// Snapshot the location store and unit preference.
    pub fn capture(locations: &LocationStore, units: MeasureUnits) -> Self {
        Self {
            locations: locations.locations().to_vec(),
            current_index: locations.current_index().unwrap_or(0),
            units,
            tracked: locations.tracked_ids(),
        }
    }

    /// Read every key, falling back to defaults for missing or corrupt values.
    pub fn load(store: &LocalStore) -> Self {
        let state = Self {
            locations: store.read(StorageKey::SavedLocations).unwrap_or_default(),
            current_index: store.read(StorageKey::CurrentIndex).unwrap_or_default(),
            units: store.read(StorageKey::MeasureUnits).unwrap_or_default(),
            tracked: store.read(StorageKey::TrackedLocations).unwrap_or_default(),
        };
        tracing::info!(
            locations = state.locations.len(),
            current = state.current_index,
            units = %state.units,
            "loaded saved state"
        );
        state
    }

    /// Write every key. Stops at the first failed write.
    pub fn save(&self, store: &LocalStore) -> Result<(), PersistError> {
        store.write(StorageKey::SavedLocations, &self.locations)?;
        store.write(StorageKey::CurrentIndex, &self.current_index)?;
        store.write(StorageKey::MeasureUnits, &self.units)?;
        store.write(StorageKey::TrackedLocations, &self.tracked)?;
        tracing::info!(locations = self.locations.len(), "saved state");
        Ok(())
    }

    /// Rebuild the location store. A stale index is clamped.
    pub fn location_store(&self) -> LocationStore {
        LocationStore::from_parts(self.locations.clone(), self.current_index)
    }
}
