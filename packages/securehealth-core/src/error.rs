//! # Error Handling
//!
//! Error types for SecureHealth Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Key Lifecycle Errors                                              │
//! │  │   ├── KeyGenerationFailed   - RNG or RSA generation unavailable     │
//! │  │   └── InvalidKey            - Malformed or mismatched key material  │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── EncryptionFailed      - Public key unusable for encryption    │
//! │  │   ├── DecryptionFailed      - Opaque: never says why               │
//! │  │   └── SigningFailed         - Private key unusable for signing      │
//! │  │                                                                      │
//! │  ├── Storage Errors                                                    │
//! │  │   ├── StorageReadError      - Failed to read a blob                 │
//! │  │   ├── StorageWriteError     - Failed to write a blob                │
//! │  │   ├── StorageNotFound       - No blob under that key                │
//! │  │   └── InvalidStorageKey     - Key would escape the store            │
//! │  │                                                                      │
//! │  └── Exchange Errors                                                   │
//! │      ├── Unauthorized          - Caller is not a party to the file     │
//! │      ├── RoleMismatch          - Parties are not counterpart roles     │
//! │      └── InvalidFilename       - Nothing usable left after sanitising  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signature verification has no error variant. A failed verification is
//! the ordinary "untrusted" answer and is returned as `false`.

use thiserror::Error;

/// Result type alias for SecureHealth Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for SecureHealth Core
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Key Lifecycle Errors (300-309)
    // ========================================================================

    /// Key pair generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Key material could not be parsed or does not form a pair
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Crypto Errors (310-399)
    // ========================================================================

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed.
    ///
    /// Carries no cause: wrong key, truncated framing and corrupted
    /// ciphertext all look the same to the caller.
    #[error("Unable to decrypt")]
    DecryptionFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ========================================================================
    // Storage Errors (400-499)
    // ========================================================================

    /// Failed to read from storage
    #[error("Failed to read from storage: {0}")]
    StorageReadError(String),

    /// Failed to write to storage
    #[error("Failed to write to storage: {0}")]
    StorageWriteError(String),

    /// Item not found in storage
    #[error("Item not found: {0}")]
    StorageNotFound(String),

    /// Storage key is empty or contains path components
    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    // ========================================================================
    // Exchange Errors (500-599)
    // ========================================================================

    /// The user is not the sender or recipient of the file
    #[error("Unauthorized access")]
    Unauthorized,

    /// Files and chats only flow between counterpart roles
    #[error("Cannot exchange data between a {0} and a {1}")]
    RoleMismatch(String, String),

    /// Filename is empty after sanitising
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 300-309: Key lifecycle
    /// - 310-399: Crypto
    /// - 400-499: Storage
    /// - 500-599: Exchange
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Key lifecycle (300-309)
            Error::KeyGenerationFailed(_) => 300,
            Error::InvalidKey(_) => 301,

            // Crypto (310-399)
            Error::EncryptionFailed(_) => 310,
            Error::DecryptionFailed => 311,
            Error::SigningFailed(_) => 312,

            // Storage (400-499)
            Error::StorageReadError(_) => 400,
            Error::StorageWriteError(_) => 401,
            Error::StorageNotFound(_) => 402,
            Error::InvalidStorageKey(_) => 403,

            // Exchange (500-599)
            Error::Unauthorized => 500,
            Error::RoleMismatch(_, _) => 501,
            Error::InvalidFilename(_) => 502,

            // Internal (900-999)
            Error::SerializationError(_) => 900,
        }
    }

    /// Check if this error must be surfaced to the user
    ///
    /// These failures abort the user's action (registration, message send,
    /// download) and are never retried silently.
    pub fn requires_user_action(&self) -> bool {
        matches!(
            self,
            Error::KeyGenerationFailed(_)
                | Error::SigningFailed(_)
                | Error::DecryptionFailed
                | Error::Unauthorized
                | Error::RoleMismatch(_, _)
                | Error::InvalidFilename(_)
        )
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
