//! # Identity Module
//!
//! Registered users and the key pairs they own.
//!
//! ## Identity Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          USER IDENTITY                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  UserIdentity (owner only)          PublicIdentity (shareable)         │
//! │  ┌──────────────────────────┐       ┌──────────────────────────┐      │
//! │  │ id: UUID                 │ ────► │ id                       │      │
//! │  │ name                     │       │ name                     │      │
//! │  │ role: Doctor | Patient   │       │ role                     │      │
//! │  │ keys: KeyPair            │       │ public_key (PEM)         │      │
//! │  │ created_at               │       └──────────────────────────┘      │
//! │  └──────────────────────────┘                                          │
//! │                                                                         │
//! │  Doctors exchange files and messages with patients, and patients       │
//! │  with doctors. Same-role pairs are refused.                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{KeyPair, PrivateKey, PublicKey};
use crate::error::Result;

/// The two classes of registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Care provider
    Doctor,
    /// Person receiving care
    Patient,
}

impl Role {
    /// The role this one exchanges data with
    pub fn counterpart(self) -> Role {
        match self {
            Role::Doctor => Role::Patient,
            Role::Patient => Role::Doctor,
        }
    }

    /// Whether files and chats may flow between `self` and `other`
    pub fn can_exchange_with(self, other: Role) -> bool {
        other == self.counterpart()
    }

    /// Lowercase name, as stored
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user together with their key pair
///
/// ## Security
///
/// - Holds the private key; keep it inside the owner's trust boundary
/// - The key pair is zeroized when dropped
#[derive(Debug)]
pub struct UserIdentity {
    id: Uuid,
    name: String,
    role: Role,
    keys: KeyPair,
    created_at: DateTime<Utc>,
}

impl UserIdentity {
    /// Register a new user, generating their key pair
    ///
    /// Key generation failure aborts the registration with
    /// `KeyGenerationFailed`; no identity is created.
    pub fn register(name: impl Into<String>, role: Role) -> Result<Self> {
        let keys = KeyPair::generate()?;
        let identity = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            keys,
            created_at: Utc::now(),
        };

        tracing::info!("Registered {} {} ({})", identity.role, identity.name, identity.id);
        Ok(identity)
    }

    /// Rebuild an identity from a stored user record
    pub fn from_parts(
        id: Uuid,
        name: impl Into<String>,
        role: Role,
        keys: KeyPair,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            keys,
            created_at,
        }
    }

    /// User id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role
    pub fn role(&self) -> Role {
        self.role
    }

    /// The stored key pair
    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    /// Parse the private key for decrypting or signing
    pub fn private_key(&self) -> Result<PrivateKey> {
        self.keys.private_key()
    }

    /// When the user registered
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The shareable view of this user
    pub fn public(&self) -> PublicIdentity {
        PublicIdentity {
            id: self.id,
            name: self.name.clone(),
            role: self.role,
            public_key: self.keys.public_key_pem().to_string(),
        }
    }
}

/// What other users may know about a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    /// User id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Role
    pub role: Role,
    /// SPKI PEM public key
    pub public_key: String,
}

impl PublicIdentity {
    /// Parse the public key
    pub fn public_key(&self) -> Result<PublicKey> {
        PublicKey::from_pem(&self.public_key)
    }
}

// ============================================================================
// TESTS
// ============================================================================
