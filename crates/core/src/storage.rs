//! Key-value persistence capability.
//!
//! Cart state is persisted as text under a string key. The backing store may
//! be unavailable (read-only deployment, full disk, sandboxed client), so
//! every operation reports failure through its return value instead of an
//! error: callers keep working in memory and never crash on storage.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// A durable string-to-string store.
pub trait KeyValueStore: Send + Sync {
    /// Whether the store can currently persist anything.
    fn is_available(&self) -> bool;

    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`. Returns `false` if nothing was persisted.
    fn set(&self, key: &str, value: &str) -> bool;

    /// Delete `key`. Returns `false` if the store could not be updated.
    fn remove(&self, key: &str) -> bool;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> bool {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> bool {
        (**self).remove(key)
    }
}

/// In-process store, used for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn is_available(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        true
    }

    fn remove(&self, key: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        true
    }
}

/// A store that is never available. Every write is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn is_available(&self) -> bool {
        false
    }

    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) -> bool {
        false
    }

    fn remove(&self, _key: &str) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.set("cart", "{}"));
        assert_eq!(store.get("cart").as_deref(), Some("{}"));
        assert!(store.remove("cart"));
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn test_disabled_store_drops_everything() {
        let store = DisabledStore;
        assert!(!store.is_available());
        assert!(!store.set("cart", "{}"));
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn test_store_through_reference() {
        fn write(store: impl KeyValueStore) -> bool {
            store.set("k", "v")
        }
        let store = MemoryStore::new();
        assert!(write(&store));
        assert_eq!(store.len(), 1);
    }
}
