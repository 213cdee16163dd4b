//! The key-value storage trait

use std::sync::Arc;

use crate::error::StorageError;

/// Trait for durable key-value storage
///
/// Keys are short identifiers chosen by the caller; values are structured
/// text (JSON in practice). Implementations take `&self` so a store can be
/// shared behind an `Arc` and written to from wherever the settings owner
/// lives.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`; removing an absent key is a no-op
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// List all keys currently present, sorted
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}
