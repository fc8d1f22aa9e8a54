//! # Storage Module
//!
//! Where encrypted blobs live between upload and download.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          BLOB STORAGE                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  BlobStore Trait                                                │   │
//! │  │  ───────────────                                                 │   │
//! │  │                                                                 │   │
//! │  │  • put(key, bytes)     - Store an encrypted blob               │   │
//! │  │  • get(key)            - Fetch it back                         │   │
//! │  │  • delete(key)         - Remove it                             │   │
//! │  │  • exists(key)         - Check for it                          │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌───────────────────┐   ┌──────────────────────────────┐              │
//! │  │  MemoryBlobStore  │   │  FsBlobStore                 │              │
//! │  │                   │   │                              │              │
//! │  │  HashMap + RwLock │   │  <root>/<key>.encrypted      │              │
//! │  │  tests, caches    │   │  one file per blob           │              │
//! │  └───────────────────┘   └──────────────────────────────┘              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stores only ever see ciphertext. They do not interpret the bytes.

mod filesystem;
mod memory;

pub use filesystem::FsBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::{Error, Result};

/// A keyed store of opaque byte blobs
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous blob
    fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Fetch the blob stored under `key`
    ///
    /// Fails with `StorageNotFound` if there is none.
    fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove the blob under `key`, returning whether it existed
    fn delete(&self, key: &str) -> Result<bool>;

    /// Check whether a blob is stored under `key`
    fn exists(&self, key: &str) -> Result<bool>;
}

/// Reject keys that are empty or could address anything outside the store
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidStorageKey(key.to_string()))
    }
}
