//! # SecureHealth Core
//!
//! End-to-end protection for a doctor/patient communication platform:
//! per-user RSA key pairs, chunked RSA-OAEP file encryption and RSA-PSS
//! chat message signatures.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SECUREHEALTH CORE MODULES                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────┐          ┌──────────────────────────────────────┐     │
//! │  │  Identity   │          │              Exchange                │     │
//! │  │             │─────────►│                                      │     │
//! │  │ - Register  │          │ - FileExchange (send/open/delete)    │     │
//! │  │ - Roles     │          │ - ChatMessage (compose/authentic)    │     │
//! │  │ - Public    │          └──────────┬─────────────────┬─────────┘     │
//! │  └──────┬──────┘                     │                 │               │
//! │         │                            ▼                 ▼               │
//! │  ┌──────▼────────────────────────────────────┐  ┌───────────────┐     │
//! │  │               Crypto                      │  │    Storage    │     │
//! │  │                                           │  │               │     │
//! │  │ - RSA-2048 key pairs (PKCS#8 / SPKI PEM)  │  │ - BlobStore   │     │
//! │  │ - Chunked RSA-OAEP (SHA-256)              │  │ - Memory      │     │
//! │  │ - RSA-PSS signatures (SHA-256, max salt)  │  │ - Filesystem  │     │
//! │  └───────────────────────────────────────────┘  └───────────────┘     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Key lifecycle, encryption, signatures
//! - [`identity`] - Registered users and roles
//! - [`storage`] - Storage of encrypted blobs
//! - [`exchange`] - File transfer and chat built on the above
//!
//! ## Quick Start
//!
//! ```ignore
//! use securehealth_core::{decrypt, encrypt, generate_key_pair, sign, verify};
//!
//! let (private_pem, public_pem) = generate_key_pair()?;
//!
//! let blob = encrypt(b"lab results", &public_pem)?;
//! assert_eq!(decrypt(&blob, &private_pem)?, b"lab results");
//!
//! let signature = sign("See you at 3pm", &private_pem)?;
//! assert!(verify("See you at 3pm", &signature, &public_pem));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod error;
pub mod exchange;
pub mod identity;
pub mod storage;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{
    decrypt, encrypt, generate_key_pair, sign, verify, EncryptedBlob, KeyPair, PrivateKey,
    PublicKey, SignedMessage,
};
pub use error::{Error, Result};
pub use exchange::{ChatMessage, FileExchange, FileRecord};
pub use identity::{PublicIdentity, Role, UserIdentity};
pub use storage::{BlobStore, FsBlobStore, MemoryBlobStore};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
