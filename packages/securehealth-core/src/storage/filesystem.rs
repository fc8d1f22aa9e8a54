//! Filesystem blob store: one `<key>.encrypted` file per blob under a root
//! directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{validate_key, BlobStore};
use crate::error::{Error, Result};

/// Extension appended to every stored blob
pub const BLOB_EXTENSION: &str = "encrypted";

/// A [`BlobStore`] backed by a directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            Error::StorageWriteError(format!("{}: {}", root.display(), e))
        })?;
        tracing::debug!("Opened blob store at {}", root.display());
        Ok(Self { root })
    }

    /// The store's root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so readers never see half a blob
        let tmp = path.with_extension(format!("{}.tmp", BLOB_EXTENSION));
        fs::write(&tmp, data)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                Error::StorageWriteError(format!("{}: {}", path.display(), e))
            })
    }

    fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_for(key)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::StorageNotFound(key.to_string()),
            _ => Error::StorageReadError(format!("{}: {}", path.display(), e)),
        })
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::StorageWriteError(format!("{}: {}", path.display(), e))),
        }
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.path_for(key)?.is_file())
    }
}
