//! # File Exchange
//!
//! Encrypted file transfer between a sender and a recipient.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::check_pairing;
use crate::crypto::{decrypt_blob, encrypt_blob, EncryptedBlob};
use crate::error::{Error, Result};
use crate::identity::{PublicIdentity, UserIdentity};
use crate::storage::BlobStore;

/// Metadata for a stored encrypted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File id, also the storage key
    pub id: Uuid,
    /// Sanitised original filename
    pub filename: String,
    /// Size of the stored encrypted blob in bytes
    pub stored_size: u64,
    /// Who uploaded the file
    pub sender_id: Uuid,
    /// Whose public key the file is encrypted under
    pub recipient_id: Uuid,
    /// Upload time
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Key of the blob in the [`BlobStore`]
    pub fn storage_key(&self) -> String {
        self.id.to_string()
    }

    /// Whether `user_id` is the sender or the recipient
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }
}

/// Reduce a client-supplied filename to a safe basename
///
/// Drops any directory part, joins whitespace runs with `_`, keeps only
/// ASCII letters, digits, `.`, `-` and `_`, and strips leading and
/// trailing dots and underscores.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let trimmed = kept.trim_matches(|c: char| c == '.' || c == '_');

    if trimmed.is_empty() {
        return Err(Error::InvalidFilename(name.to_string()));
    }
    Ok(trimmed.to_string())
}

/// File transfer service
///
/// Encrypts uploads for their recipient and keeps only ciphertext in the
/// backing store.
pub struct FileExchange {
    store: Arc<dyn BlobStore>,
}

impl FileExchange {
    /// Create a file exchange backed by the given store
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &dyn BlobStore {
        self.store.as_ref()
    }

    /// Encrypt `contents` for `recipient` and store it
    ///
    /// Nothing is written unless encryption succeeds.
    pub fn send_file(
        &self,
        sender: &PublicIdentity,
        recipient: &PublicIdentity,
        filename: &str,
        contents: &[u8],
    ) -> Result<FileRecord> {
        check_pairing(sender.role, recipient.role)?;
        let filename = sanitize_filename(filename)?;

        let key = recipient
            .public_key()
            .map_err(|e| Error::EncryptionFailed(e.to_string()))?;
        let blob = encrypt_blob(contents, &key)?.to_bytes();

        let record = FileRecord {
            id: Uuid::new_v4(),
            filename,
            stored_size: blob.len() as u64,
            sender_id: sender.id,
            recipient_id: recipient.id,
            created_at: Utc::now(),
        };
        self.store.put(&record.storage_key(), &blob)?;

        tracing::info!(
            file_id = %record.id,
            sender = %sender.id,
            recipient = %recipient.id,
            bytes = contents.len(),
            "Stored encrypted file {}",
            record.filename
        );
        Ok(record)
    }

    /// Fetch and decrypt a file with `user`'s private key
    ///
    /// Only the sender or recipient may open a file. The blob is encrypted
    /// for the recipient, so a sender opening their own upload gets
    /// `DecryptionFailed`.
    pub fn open_file(&self, record: &FileRecord, user: &UserIdentity) -> Result<Vec<u8>> {
        if !record.involves(user.id()) {
            tracing::warn!(file_id = %record.id, user = %user.id(), "Refused file access");
            return Err(Error::Unauthorized);
        }

        let bytes = self.store.get(&record.storage_key())?;
        let plaintext = user
            .private_key()
            .map_err(|_| Error::DecryptionFailed)
            .and_then(|key| decrypt_blob(&EncryptedBlob::from_bytes(&bytes)?, &key));

        match plaintext {
            Ok(plaintext) => {
                tracing::info!(file_id = %record.id, user = %user.id(), "Opened file");
                Ok(plaintext)
            }
            Err(e) => {
                tracing::warn!(file_id = %record.id, user = %user.id(), "Unable to decrypt file");
                Err(e)
            }
        }
    }

    /// Remove a file's blob from the store
    pub fn delete_file(&self, record: &FileRecord) -> Result<bool> {
        self.store.delete(&record.storage_key())
    }
}

// ============================================================================
// TESTS
// ============================================================================
