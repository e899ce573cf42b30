//! Persisted, ordered, de-duplicated lists of province slugs.
//!
//! Two lists exist: recents (most recently viewed first) and favorites
//! (toggle-managed). Each is a JSON array of strings under its own key.

use meteo_core::StorageError;

use crate::storage::KeyValueStore;

/// Storage key of the recently viewed provinces.
pub const RECENTS_KEY: &str = "recent_Provinces";

/// Storage key of the favorite provinces.
pub const FAVORITES_KEY: &str = "favorite_Provinces";

/// A slug list bound to one storage key.
#[derive(Debug, Clone)]
pub struct SlugList<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SlugList<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn recents(store: S) -> Self {
        Self::new(store, RECENTS_KEY)
    }

    pub fn favorites(store: S) -> Self {
        Self::new(store, FAVORITES_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current list. Anything unreadable is treated as an empty list.
    pub fn read(&self) -> Vec<String> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", self.key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(slugs) => slugs,
            Err(e) => {
                tracing::debug!("Ignoring malformed {} content: {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Replace the stored list.
    pub fn write(&self, slugs: &[String]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(slugs).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    /// Move `slug` to the front, inserting it if absent. Empty slugs are ignored.
    pub fn add(&self, slug: &str) -> Result<Vec<String>, StorageError> {
        let current = self.read();
        if slug.is_empty() {
            return Ok(current);
        }

        let updated = move_to_front(current, slug);
        self.write(&updated)?;
        Ok(updated)
    }

    /// Remove `slug` if present, otherwise prepend it. Empty slugs are ignored.
    pub fn toggle(&self, slug: &str) -> Result<Vec<String>, StorageError> {
        let current = self.read();
        if slug.is_empty() {
            return Ok(current);
        }

        let updated = toggled(current, slug);
        self.write(&updated)?;
        Ok(updated)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.read().iter().any(|s| s == slug)
    }

    /// Erase the stored key; the next `read` is empty.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

fn move_to_front(list: Vec<String>, slug: &str) -> Vec<String> {
    let mut updated = Vec::with_capacity(list.len() + 1);
    updated.push(slug.to_string());
    updated.extend(list.into_iter().filter(|s| s != slug));
    updated
}

fn toggled(list: Vec<String>, slug: &str) -> Vec<String> {
    if list.iter().any(|s| s == slug) {
        list.into_iter().filter(|s| s != slug).collect()
    } else {
        let mut updated = Vec::with_capacity(list.len() + 1);
        updated.push(slug.to_string());
        updated.extend(list);
        updated
    }
}
