//! In-process key/value store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StoreResult;

use super::KeyValueStore;

/// Map-backed store. Clones share entries, the way every browsing context of
/// one origin sees the same local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("cart").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryStore::new();
        store.put("cart", b"first").unwrap();
        store.put("cart", b"second").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let tab_a = MemoryStore::new();
        let tab_b = tab_a.clone();
        tab_a.put("cart", b"[]").unwrap();
        assert_eq!(tab_b.get("cart").unwrap(), Some(b"[]".to_vec()));
    }

    #[test]
    fn test_delete_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("nope").is_ok());
    }
}
