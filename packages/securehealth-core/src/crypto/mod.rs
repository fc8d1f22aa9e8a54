//! # Cryptography Module
//!
//! The asymmetric key lifecycle and the two protocols built on it:
//! chunked RSA-OAEP file encryption and RSA-PSS message signing.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Registration                                                          │
//! │  ────────────                                                           │
//! │   generate_key_pair() ──► (private PEM, public PEM) on the user record │
//! │                                                                         │
//! │  File transfer                         Chat                            │
//! │  ─────────────                         ────                             │
//! │   sender                                sender                         │
//! │     │ recipient public key               │ own private key             │
//! │     ▼                                    ▼                             │
//! │   encrypt() ─► blob ─► storage         sign() ─► base64 signature      │
//! │                          │                          │                  │
//! │   recipient              ▼              anyone      ▼                  │
//! │     │ own private key                     │ sender public key          │
//! │     ▼                                     ▼                            │
//! │   decrypt() ─► original bytes           verify() ─► true / false       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Parameters |
//! |-----------|---------|------------|
//! | RSA | Key pairs | 2048 bits, e = 65537 |
//! | RSA-OAEP | File encryption | SHA-256, MGF1-SHA256, no label, 190-byte chunks |
//! | RSA-PSS | Message signatures | SHA-256, MGF1-SHA256, maximum salt |
//! | SHA-256 | Key fingerprints | over DER SubjectPublicKeyInfo |
//!
//! ## Statelessness
//!
//! Every operation takes its keys and data as arguments and keeps nothing
//! between calls, so all of them may run concurrently from any number of
//! threads without locking. Randomness comes from `OsRng` on each call.

mod encryption;
mod keys;
mod signing;

pub use encryption::{
    decrypt, decrypt_blob, encrypt, encrypt_blob, EncryptedBlob, CHUNK_SIZE, LENGTH_FIELD_SIZE,
};
pub use keys::{generate_key_pair, KeyPair, PrivateKey, PublicKey, KEY_BITS, PUBLIC_EXPONENT};
pub use signing::{sign, sign_with_key, verify, verify_with_key, SignedMessage};

/// Shared key pairs for unit tests; RSA generation is too slow to repeat.
#[cfg(test)]
pub(crate) mod fixtures {
    use once_cell::sync::Lazy;

    use super::KeyPair;

    pub static ALICE: Lazy<KeyPair> =
        Lazy::new(|| KeyPair::generate().expect("generate alice"));

    pub static BOB: Lazy<KeyPair> = Lazy::new(|| KeyPair::generate().expect("generate bob"));
}
