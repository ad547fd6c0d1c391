//! Local persistence of the seat list.
//!
//! The seat list lives under a single key of a [`KeyValueStore`] as a plain
//! JSON array of records. There is no version field: older or hand-edited
//! records are made loadable by back-filling every missing field on load
//! (see [`StoredSeat::into_seat`]).

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(target_arch = "wasm32")]
mod local_storage;

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::FALLBACK_LABEL;
use crate::model::{Seat, SeatDefaults, SeatId, ShapeKind};

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O error when reading/writing a file-backed store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not valid JSON of the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backing store cannot be reached at all
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend-specific failure (e.g. localStorage quota exceeded)
    #[error("Storage error: {0}")]
    Backend(String),
}

/// A string key-value store: localStorage in the browser, files natively.
pub trait KeyValueStore {
    /// Read the value for `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail, for exercising error paths.
    pub fn failing_writes() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    /// Seed a key with a raw value.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Copy `key` (if present) out of `source`. Writes to the copy never
    /// reach `source`.
    pub fn copy_of(source: &impl KeyValueStore, key: &str) -> Result<Self, StorageError> {
        let store = Self::new();
        Ok(match source.get(key)? {
            Some(value) => store.with_entry(key, &value),
            None => store,
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend("quota exceeded".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A persisted seat record with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoredSeat {
    pub id: Option<SeatId>,
    pub label: Option<String>,
    pub name: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius: Option<f32>,
    pub fill: Option<String>,
    pub visible: Option<bool>,
    pub shape: Option<ShapeKind>,
}

impl StoredSeat {
    /// Back-fill missing fields and build a seat.
    ///
    /// Missing ids are freshly generated, labels become `"0"`, positions
    /// take the defaults' center, and the rest take the defaults' values.
    pub fn into_seat(self, defaults: &SeatDefaults) -> Seat {
        Seat {
            id: self.id.unwrap_or_else(SeatId::generate),
            label: self.label.unwrap_or_else(|| FALLBACK_LABEL.to_string()),
            name: self.name.unwrap_or_default(),
            x: self.x.unwrap_or(defaults.center.x),
            y: self.y.unwrap_or(defaults.center.y),
            radius: self.radius.unwrap_or(defaults.radius),
            fill: self.fill.unwrap_or_else(|| defaults.fill.clone()),
            visible: self.visible.unwrap_or(true),
            shape: self.shape.unwrap_or(defaults.shape),
        }
    }
}

/// Decode a persisted seat list, back-filling defaults.
///
/// Duplicate ids are re-keyed so the collection keeps unique ids.
pub fn decode_seats(json: &str, defaults: &SeatDefaults) -> Result<Vec<Seat>, StorageError> {
    let records: Vec<StoredSeat> = serde_json::from_str(json)?;

    let mut seen = HashSet::new();
    let seats = records
        .into_iter()
        .map(|record| {
            let mut seat = record.into_seat(defaults);
            if !seen.insert(seat.id.clone()) {
                let fresh = SeatId::generate();
                log::warn!("Duplicate seat id {} in storage; re-keyed as {}", seat.id, fresh);
                seat.id = fresh;
                seen.insert(seat.id.clone());
            }
            seat
        })
        .collect();

    Ok(seats)
}

/// Encode the seat list verbatim.
pub fn encode_seats(seats: &[Seat]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(seats)?)
}

/// Reads and writes the seat list under a fixed key.
#[derive(Debug)]
pub struct SeatRepository<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> SeatRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored seat list.
    ///
    /// Returns `None` when the key is absent, unreadable, or does not parse;
    /// the caller substitutes its default layout.
    pub fn load(&self, defaults: &SeatDefaults) -> Option<Vec<Seat>> {
        match self.try_load(defaults) {
            Ok(Some(seats)) => {
                log::info!("Loaded {} seats from '{}'", seats.len(), self.key);
                Some(seats)
            }
            Ok(None) => {
                log::debug!("No seats stored under '{}'", self.key);
                None
            }
            Err(e) => {
                log::warn!("Ignoring stored seats under '{}': {}", self.key, e);
                None
            }
        }
    }

    pub fn try_load(&self, defaults: &SeatDefaults) -> Result<Option<Vec<Seat>>, StorageError> {
        match self.storage.get(&self.key)? {
            Some(json) => decode_seats(&json, defaults).map(Some),
            None => Ok(None),
        }
    }

    /// Persist the full list. Failures are logged and discarded; the
    /// in-memory list stays authoritative for the session.
    pub fn save(&mut self, seats: &[Seat]) {
        match self.try_save(seats) {
            Ok(()) => log::trace!("Saved {} seats to '{}'", seats.len(), self.key),
            Err(e) => log::warn!("Failed to save seats to '{}': {}", self.key, e),
        }
    }

    pub fn try_save(&mut self, seats: &[Seat]) -> Result<(), StorageError> {
        let json = encode_seats(seats)?;
        self.storage.set(&self.key, &json)
    }
}
