//! Persistence - the composer state blob in a key-value store.
//!
//! The blob is a JSON object `{ mode, line1, line2, history }` kept under a
//! single key. Reading never fails from the caller's point of view: a missing
//! or unreadable blob yields the default state.

mod file;
mod in_memory;

use serde::{Deserialize, Serialize};

use crate::config::ComposerConfig;
use crate::error::StoreError;
use crate::history::HistoryItem;
use crate::message::{Line, Line2, Mode};

pub use file::FileStore;
pub use in_memory::InMemoryStore;

/// Durable string storage by key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Save (or overwrite) the value for `key`.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedState {
    pub mode: Mode,
    pub line1: Line,
    pub line2: Line2,
    pub history: Vec<HistoryItem>,
}

/// Loads and saves [`SavedState`] under one key of a [`KeyValueStore`].
#[derive(Clone)]
pub struct StatePersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> StatePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn from_config(store: S, config: &ComposerConfig) -> Self {
        Self::new(store, config.storage_key.clone())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the stored state; `Ok(None)` when nothing has been saved yet.
    pub fn try_load(&self) -> Result<Option<SavedState>, StoreError> {
        match self.store.get(&self.key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Read the stored state, falling back to defaults on any failure.
    pub fn load(&self) -> SavedState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => SavedState::default(),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "failed to load saved state, using defaults");
                SavedState::default()
            }
        }
    }

    pub fn save(&self, state: &SavedState) -> Result<(), StoreError> {
        let json = serde_json::to_string(state)?;
        self.store.set(&self.key, json)
    }

    pub fn clear(&self) -> Result<bool, StoreError> {
        self.store.remove(&self.key)
    }
}
