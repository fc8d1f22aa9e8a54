//! # Message Signatures
//!
//! RSA-PSS signatures over chat message text.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGNING FLOW                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SENDER                                                                │
//! │                                                                         │
//! │   "Take 5mg twice daily"                                               │
//! │          │  UTF-8 bytes (content only: no timestamp, no sender id)     │
//! │          ▼                                                              │
//! │   SHA-256 digest                                                       │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   RSA-PSS sign (MGF1-SHA256, maximum salt length, sender private key)  │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   base64 signature ──► stored and broadcast next to the plain text     │
//! │                                                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                       VERIFICATION FLOW                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ANYONE holding the claimed sender's public key                        │
//! │                                                                         │
//! │   (content, base64 signature, public key PEM)                          │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   decode ─► parse key ─► RSA-PSS verify                                │
//! │          │                                                              │
//! │          ▼                                                              │
//! │   true  : signed by that key over byte-identical content               │
//! │   false : anything else (never an error)                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Salt Length
//!
//! The salt is as long as the encoding allows:
//! `ceil((mod_bits - 1) / 8) - hash_len - 2`, i.e. 222 bytes for a
//! 2048-bit key. Verification uses the same rule, derived from the public
//! key, so signatures from other PSS implementations using the maximum
//! salt length verify here and vice versa.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::rngs::OsRng;
use rsa::Pss;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::keys::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

/// SHA-256 output length
const HASH_LEN: usize = 32;

/// Largest PSS salt permitted for a modulus of `mod_bits` bits
fn max_salt_len(mod_bits: usize) -> Option<usize> {
    let em_len = mod_bits.checked_sub(1)?.div_ceil(8);
    em_len.checked_sub(HASH_LEN + 2)
}

/// Sign a message with the sender's PKCS#8 PEM private key
///
/// ## Returns
///
/// The signature as standard base64 text.
///
/// ## Errors
///
/// `SigningFailed` if the key is malformed or unusable. The caller must
/// then drop the message rather than send it unsigned.
///
/// ## Example
///
/// ```ignore
/// let signature = sign("See you at 3pm", keys.private_key_pem())?;
/// assert!(verify("See you at 3pm", &signature, keys.public_key_pem()));
/// ```
pub fn sign(message: &str, private_key_pem: &str) -> Result<String> {
    let key =
        PrivateKey::from_pem(private_key_pem).map_err(|e| Error::SigningFailed(e.to_string()))?;
    sign_with_key(message, &key)
}

/// Sign a message with an already-parsed private key
pub fn sign_with_key(message: &str, key: &PrivateKey) -> Result<String> {
    let salt_len = max_salt_len(key.bits())
        .ok_or_else(|| Error::SigningFailed("Key too small for PSS".into()))?;
    let digest = Sha256::digest(message.as_bytes());

    let signature = key
        .inner
        .sign_with_rng(&mut OsRng, Pss::new_with_salt::<Sha256>(salt_len), &digest)
        .map_err(|e| Error::SigningFailed(e.to_string()))?;

    Ok(STANDARD.encode(signature))
}

/// Verify a base64 signature against a message and SPKI PEM public key
///
/// Returns `true` only on a cryptographic match. Malformed base64, a
/// malformed key, the wrong key, altered content and plain mismatches all
/// return `false`; this function never fails.
pub fn verify(message: &str, signature: &str, public_key_pem: &str) -> bool {
    match PublicKey::from_pem(public_key_pem) {
        Ok(key) => verify_with_key(message, signature, &key),
        Err(_) => {
            tracing::debug!("Signature rejected: unusable public key");
            false
        }
    }
}

/// Verify a base64 signature using an already-parsed public key
pub fn verify_with_key(message: &str, signature: &str, key: &PublicKey) -> bool {
    let Ok(signature) = STANDARD.decode(signature.trim()) else {
        tracing::debug!("Signature rejected: not base64");
        return false;
    };
    let Some(salt_len) = max_salt_len(key.bits()) else {
        return false;
    };
    let digest = Sha256::digest(message.as_bytes());

    let valid = key
        .inner
        .verify(Pss::new_with_salt::<Sha256>(salt_len), &digest, &signature)
        .is_ok();

    tracing::debug!(signer = key.fingerprint(), valid, "Verified message signature");
    valid
}

// ============================================================================
// SIGNED MESSAGE
// ============================================================================

/// Message text with its signature
///
/// The signature covers `content` alone. Metadata such as timestamps and
/// sender ids travel beside it unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// The message text
    pub content: String,
    /// Base64 RSA-PSS signature over the UTF-8 bytes of `content`
    pub signature: String,
}

impl SignedMessage {
    /// Sign `content` with the sender's PEM private key
    pub fn sign(content: impl Into<String>, private_key_pem: &str) -> Result<Self> {
        let content = content.into();
        let signature = sign(&content, private_key_pem)?;
        Ok(Self { content, signature })
    }

    /// Sign `content` with an already-parsed private key
    pub fn sign_with_key(content: impl Into<String>, key: &PrivateKey) -> Result<Self> {
        let content = content.into();
        let signature = sign_with_key(&content, key)?;
        Ok(Self { content, signature })
    }

    /// Check the signature against the claimed signer's PEM public key
    pub fn verify(&self, public_key_pem: &str) -> bool {
        verify(&self.content, &self.signature, public_key_pem)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures::{ALICE, BOB};

    #[test]
    fn test_sign_verify() {
        let message = "Hello, World!";

        let signature = sign(message, ALICE.private_key_pem()).unwrap();
        assert!(verify(message, &signature, ALICE.public_key_pem()));
    }

    #[test]
    fn test_sign_verify_unicode_and_empty() {
        for message in ["", "ü", "Blutdruck 120/80 – alles gut 👍", "line\nbreak"] {
            let signature = sign(message, BOB.private_key_pem()).unwrap();
            assert!(verify(message, &signature, BOB.public_key_pem()), "{:?}", message);
        }
    }

    #[test]
    fn test_signature_shape() {
        let signature = sign("shape", ALICE.private_key_pem()).unwrap();
        let raw = STANDARD.decode(&signature).unwrap();

        assert_eq!(raw.len(), 256);
    }

    #[test]
    fn test_signatures_are_randomized() {
        // PSS salts are random: same message, different signatures, both valid
        let sig1 = sign("same", ALICE.private_key_pem()).unwrap();
        let sig2 = sign("same", ALICE.private_key_pem()).unwrap();

        assert_ne!(sig1, sig2);
        assert!(verify("same", &sig1, ALICE.public_key_pem()));
        assert!(verify("same", &sig2, ALICE.public_key_pem()));
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let signature = sign("Take 5mg", ALICE.private_key_pem()).unwrap();

        assert!(!verify("Take 6mg", &signature, ALICE.public_key_pem()));
        assert!(!verify("Take 5mg ", &signature, ALICE.public_key_pem()));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let signature = sign("Hello", ALICE.private_key_pem()).unwrap();
        assert!(!verify("Hello", &signature, BOB.public_key_pem()));
    }

    #[test]
    fn test_verify_malformed_inputs_return_false() {
        let signature = sign("Hello", ALICE.private_key_pem()).unwrap();

        assert!(!verify("Hello", "", ALICE.public_key_pem()));
        assert!(!verify("Hello", "***not base64***", ALICE.public_key_pem()));
        assert!(!verify("Hello", "AAAA", ALICE.public_key_pem()));
        assert!(!verify("Hello", &signature, ""));
        assert!(!verify("Hello", &signature, "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n"));
        // A private key is not a public key
        assert!(!verify("Hello", &signature, ALICE.private_key_pem()));
    }

    #[test]
    fn test_sign_with_malformed_key_fails() {
        let result = sign("Hello", "not a key");
        assert!(matches!(result, Err(Error::SigningFailed(_))));
    }

    #[test]
    fn test_max_salt_len() {
        assert_eq!(max_salt_len(2048), Some(222));
        assert_eq!(max_salt_len(3072), Some(350));
        assert_eq!(max_salt_len(0), None);
        assert_eq!(max_salt_len(256), None);
    }

    #[test]
    fn test_signed_message() {
        let signed = SignedMessage::sign("Lab results attached", ALICE.private_key_pem()).unwrap();

        assert!(signed.verify(ALICE.public_key_pem()));
        assert!(!signed.verify(BOB.public_key_pem()));

        let json = serde_json::to_string(&signed).unwrap();
        let restored: SignedMessage = serde_json::from_str(&json).unwrap();
        assert!(restored.verify(ALICE.public_key_pem()));
    }

    #[test]
    fn test_signed_message_tampered() {
        let mut signed = SignedMessage::sign("Dose: 10mg", ALICE.private_key_pem()).unwrap();
        signed.content = "Dose: 100mg".into();

        assert!(!signed.verify(ALICE.public_key_pem()));
    }
}
