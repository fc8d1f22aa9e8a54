//! In-memory blob store.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{validate_key, BlobStore};
use crate::error::{Error, Result};

/// A [`BlobStore`] that keeps everything in a `HashMap`
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.blobs.write().insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        validate_key(key)?;
        self.blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::StorageNotFound(key.to_string()))
    }

    fn delete(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.blobs.write().remove(key).is_some())
    }

    fn exists(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.blobs.read().contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let store = MemoryBlobStore::new();
        assert!(store.is_empty());

        store.put("file-1", b"ciphertext").unwrap();
        assert!(store.exists("file-1").unwrap());
        assert_eq!(store.get("file-1").unwrap(), b"ciphertext");
        assert_eq!(store.len(), 1);

        assert!(store.delete("file-1").unwrap());
        assert!(!store.delete("file-1").unwrap());
        assert!(matches!(store.get("file-1"), Err(Error::StorageNotFound(_))));
    }

    #[test]
    fn test_put_replaces() {
        let store = MemoryBlobStore::new();
        store.put("k", b"one").unwrap();
        store.put("k", b"two").unwrap();

        assert_eq!(store.get("k").unwrap(), b"two");
    }

    #[test]
    fn test_invalid_key() {
        let store = MemoryBlobStore::new();
        assert!(matches!(
            store.put("../k", b"x"),
            Err(Error::InvalidStorageKey(_))
        ));
    }
}
