//! Persisted favorites.
//!
//! The set is loaded once from a [`KeyValueStore`] and written back before
//! every [`FavoritesStore::toggle`] returns. Stored data that is missing or
//! unreadable yields an empty set rather than an error.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use crate::activity::Activity;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized favorites array.
pub const FAVORITES_KEY: &str = "tinySparksFavorites";

/// Outcome of a [`FavoritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// Ordered, id-unique collection of favorite activities backed by `S`.
#[derive(Debug)]
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    items: Vec<Activity>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Load favorites from `storage`.
    ///
    /// Never fails: an absent key, a read error, or a value that is not a
    /// JSON array all produce an empty set (the latter two are logged).
    /// Entries that do not decode as an [`Activity`] are skipped on their
    /// own, and entries that repeat an earlier id are dropped.
    pub fn load(storage: S) -> Self {
        let items = match storage.get(FAVORITES_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Value>>(&raw) {
                Ok(entries) => dedup_by_id(decode_entries(entries)),
                Err(e) => {
                    warn!(error = %e, "stored favorites are malformed, starting empty");
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to read stored favorites, starting empty");
                Vec::new()
            }
        };
        debug!(count = items.len(), "favorites loaded");
        Self { storage, items }
    }

    /// Add `activity` if its id is not yet a favorite, otherwise remove the
    /// entry with that id. The new set is persisted before returning.
    ///
    /// If persisting fails the in-memory set is restored, so memory and
    /// storage never disagree.
    pub fn toggle(&mut self, activity: &Activity) -> Result<Toggled, StorageError> {
        let (outcome, undo) = match self.position(&activity.id) {
            Some(pos) => {
                let removed = self.items.remove(pos);
                (Toggled::Removed, Undo::Reinsert(pos, removed))
            }
            None => {
                self.items.push(activity.clone());
                (Toggled::Added, Undo::Pop)
            }
        };

        if let Err(e) = self.persist() {
            match undo {
                Undo::Reinsert(pos, removed) => self.items.insert(pos, removed),
                Undo::Pop => {
                    self.items.pop();
                }
            }
            return Err(e);
        }

        debug!(id = %activity.id, ?outcome, count = self.items.len(), "favorite toggled");
        Ok(outcome)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.items.iter().find(|a| a.id == id)
    }

    /// Favorites in the order they were added.
    pub fn activities(&self) -> &[Activity] {
        &self.items
    }

    pub fn ids(&self) -> HashSet<String> {
        self.items.iter().map(|a| a.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|a| a.id == id)
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        // Serializing plain strings and vectors cannot fail.
        let json = serde_json::to_string(&self.items).unwrap_or_else(|_| "[]".to_owned());
        self.storage.set(FAVORITES_KEY, &json)
    }
}

enum Undo {
    Reinsert(usize, Activity),
    Pop,
}

fn decode_entries(entries: Vec<Value>) -> Vec<Activity> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<Activity>(entry) {
            Ok(activity) => Some(activity),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable stored favorite");
                None
            }
        })
        .collect()
}

fn dedup_by_id(items: Vec<Activity>) -> Vec<Activity> {
    let mut seen = HashSet::new();
    let before = items.len();
    let out: Vec<Activity> = items
        .into_iter()
        .filter(|a| seen.insert(a.id.clone()))
        .collect();
    if out.len() != before {
        warn!(
            dropped = before - out.len(),
            "stored favorites contained duplicate ids"
        );
    }
    out
}
