//! # Chunked File Encryption
//!
//! RSA-OAEP encryption of arbitrary-length payloads under a recipient's
//! public key.
//!
//! ## Why chunks?
//!
//! A single RSA-OAEP operation can carry at most
//! `key_bytes - 2 * hash_len - 2` bytes, which is 190 bytes for a 2048-bit
//! key with SHA-256. Payloads are therefore split into fixed 190-byte
//! pieces and each piece is encrypted on its own (no chaining). The chunk
//! size is fixed by the stored format and does not follow the key size.
//!
//! ## Blob Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ENCRYPTED BLOB FORMAT                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────┐                                                  │
//! │  │ chunk_count: u32 │  big-endian                                      │
//! │  └──────────────────┘                                                  │
//! │                                                                         │
//! │  repeated chunk_count times, in plaintext order:                       │
//! │  ┌──────────────────┬──────────────────────────────────────────────┐   │
//! │  │ length: u32 (BE) │ OAEP ciphertext (length bytes, 256 for 2048) │   │
//! │  └──────────────────┴──────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Empty plaintext → 00 00 00 00 (zero chunks)                           │
//! │  500-byte plaintext → 3 chunks of 190, 190, 120 plaintext bytes        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every byte of this layout is part of the storage contract: previously
//! stored files must keep decrypting.
//!
//! ## Padding
//!
//! OAEP with SHA-256 as both the hash and the MGF1 hash, empty label.
//!
//! ## Failure Behaviour
//!
//! Decryption reports exactly one opaque [`Error::DecryptionFailed`] for a
//! truncated blob, inconsistent lengths, a wrong key, or tampered
//! ciphertext. Private-key operations are blinded and every chunk is
//! attempted even after one fails, so timing does not point at the
//! failing chunk either.

use rand::rngs::OsRng;
use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::keys::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// Plaintext bytes carried by each encrypted chunk
pub const CHUNK_SIZE: usize = 190;

/// Size of the big-endian count and length fields
pub const LENGTH_FIELD_SIZE: usize = 4;

/// OAEP overhead for SHA-256: two hash lengths plus two bytes
const OAEP_OVERHEAD: usize = 2 * 32 + 2;

/// A parsed encrypted payload: an ordered list of OAEP ciphertext chunks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedBlob {
    chunks: Vec<Vec<u8>>,
}

impl EncryptedBlob {
    /// Parse the stored byte layout
    ///
    /// Rejects truncated input, length fields that run past the end,
    /// zero-length chunks, and trailing bytes after the declared chunks.
    /// A corrupted chunk count therefore never silently truncates.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut input = bytes;

        let count = read_u32(&mut input)? as usize;

        // Each declared chunk needs at least its own length field.
        if count > input.len() / LENGTH_FIELD_SIZE {
            return Err(Error::DecryptionFailed);
        }

        let mut chunks = Vec::with_capacity(count);
        for _ in 0..count {
            let len = read_u32(&mut input)? as usize;
            if len == 0 {
                return Err(Error::DecryptionFailed);
            }
            chunks.push(take(&mut input, len)?.to_vec());
        }

        if !input.is_empty() {
            return Err(Error::DecryptionFailed);
        }

        Ok(Self { chunks })
    }

    /// Encode into the stored byte layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        // Counts and lengths were range-checked when the blob was built.
        out.extend_from_slice(&(self.chunks.len() as u32).to_be_bytes());
        for chunk in &self.chunks {
            out.extend_from_slice(&(chunk.len() as u32).to_be_bytes());
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Number of ciphertext chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Ciphertext chunks in stored order
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> {
        self.chunks.iter().map(Vec::as_slice)
    }

    /// Size of [`to_bytes`](Self::to_bytes) output
    pub fn encoded_len(&self) -> usize {
        LENGTH_FIELD_SIZE
            + self
                .chunks
                .iter()
                .map(|c| LENGTH_FIELD_SIZE + c.len())
                .sum::<usize>()
    }
}

/// Split `len` bytes off the front of `input`
fn take<'a>(input: &mut &'a [u8], len: usize) -> Result<&'a [u8]> {
    if input.len() < len {
        return Err(Error::DecryptionFailed);
    }
    let (head, tail) = input.split_at(len);
    *input = tail;
    Ok(head)
}

fn read_u32(input: &mut &[u8]) -> Result<u32> {
    let bytes: [u8; LENGTH_FIELD_SIZE] = take(input, LENGTH_FIELD_SIZE)?
        .try_into()
        .map_err(|_| Error::DecryptionFailed)?;
    Ok(u32::from_be_bytes(bytes))
}

// ============================================================================
// ENCRYPTION
// ============================================================================

/// Encrypt a payload for the holder of `public_key_pem`
///
/// ## Returns
///
/// The encoded blob bytes, ready to store.
///
/// ## Errors
///
/// `EncryptionFailed` if the key is malformed or too small for 190-byte
/// chunks. Nothing is returned in that case, so there is no partial blob
/// to persist.
pub fn encrypt(plaintext: &[u8], public_key_pem: &str) -> Result<Vec<u8>> {
    let key = PublicKey::from_pem(public_key_pem)
        .map_err(|e| Error::EncryptionFailed(e.to_string()))?;
    Ok(encrypt_blob(plaintext, &key)?.to_bytes())
}

/// Encrypt a payload with an already-parsed public key
pub fn encrypt_blob(plaintext: &[u8], key: &PublicKey) -> Result<EncryptedBlob> {
    let capacity = key.size().saturating_sub(OAEP_OVERHEAD);
    if capacity < CHUNK_SIZE {
        return Err(Error::EncryptionFailed(format!(
            "{}-bit key fits {} bytes per OAEP block, chunks need {}",
            key.bits(),
            capacity,
            CHUNK_SIZE
        )));
    }

    u32::try_from(plaintext.len().div_ceil(CHUNK_SIZE))
        .map_err(|_| Error::EncryptionFailed("Payload has too many chunks".into()))?;

    let mut rng = OsRng;
    let chunks = plaintext
        .chunks(CHUNK_SIZE)
        .map(|chunk| {
            key.inner
                .encrypt(&mut rng, Oaep::new::<Sha256>(), chunk)
                .map_err(|e| Error::EncryptionFailed(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        recipient = key.fingerprint(),
        bytes = plaintext.len(),
        chunks = chunks.len(),
        "Encrypted payload"
    );

    Ok(EncryptedBlob { chunks })
}

// ============================================================================
// DECRYPTION
// ============================================================================

/// Decrypt stored blob bytes with the recipient's private key
///
/// ## Errors
///
/// `DecryptionFailed`, with no further detail, for any failure: malformed
/// key, malformed framing, wrong key, or corrupted ciphertext.
pub fn decrypt(blob: &[u8], private_key_pem: &str) -> Result<Vec<u8>> {
    let key = PrivateKey::from_pem(private_key_pem).map_err(|_| Error::DecryptionFailed)?;
    let blob = EncryptedBlob::from_bytes(blob)?;
    decrypt_blob(&blob, &key)
}

/// Decrypt a parsed blob with an already-parsed private key
///
/// Chunks are decrypted and concatenated in stored order.
pub fn decrypt_blob(blob: &EncryptedBlob, key: &PrivateKey) -> Result<Vec<u8>> {
    let mut rng = OsRng;
    let mut plaintext = Zeroizing::new(Vec::with_capacity(blob.chunk_count() * CHUNK_SIZE));
    let mut failed = false;

    for chunk in blob.chunks() {
        match key.inner.decrypt_blinded(&mut rng, Oaep::new::<Sha256>(), chunk) {
            Ok(part) => plaintext.extend_from_slice(&Zeroizing::new(part)),
            Err(_) => failed = true,
        }
    }

    if failed {
        return Err(Error::DecryptionFailed);
    }

    tracing::debug!(
        bytes = plaintext.len(),
        chunks = blob.chunk_count(),
        "Decrypted payload"
    );

    Ok(std::mem::take(&mut *plaintext))
}

// ============================================================================
// TESTS
// ============================================================================
