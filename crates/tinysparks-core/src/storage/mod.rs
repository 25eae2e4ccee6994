//! Persistent key-value storage.
//!
//! [`KeyValueStore`] is the only surface the favorites store touches, so
//! the backing medium can be swapped: [`FileStore`] keeps one file per key
//! in a data directory, [`MemoryStore`] keeps everything in a map.

pub mod file;

use std::collections::HashMap;

use thiserror::Error;

pub use file::FileStore;

/// Errors from reading or writing a stored value.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {key:?}: {source}")]
    Read {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {key:?}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A synchronous string key-value surface.
pub trait KeyValueStore {
    /// Return the value for `key`, or `None` if it has never been set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`. Returns only after the value is durable
    /// as far as the backend can tell.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
