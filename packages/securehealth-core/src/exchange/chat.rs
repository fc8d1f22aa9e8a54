//! # Chat Messages
//!
//! Signed chat messages. Text travels in the clear next to an RSA-PSS
//! signature over the content, so any participant can check authorship
//! with the sender's public key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{verify_with_key, SignedMessage};
use crate::error::{Error, Result};
use crate::identity::{PublicIdentity, UserIdentity};

/// A chat message as stored and broadcast
///
/// ## Wire Format (JSON)
///
/// ```json
/// {
///   "id": "…",
///   "room_id": "…",
///   "sender_id": "…",
///   "sent_at": "2024-05-01T09:30:00Z",
///   "content": "Take 5mg twice daily",
///   "signature": "base64…"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message id
    pub id: Uuid,
    /// Chat room the message belongs to
    pub room_id: String,
    /// Claimed sender
    pub sender_id: Uuid,
    /// Send time (not covered by the signature)
    pub sent_at: DateTime<Utc>,
    /// Content and signature
    #[serde(flatten)]
    pub message: SignedMessage,
}

impl ChatMessage {
    /// Sign `content` as `sender` for delivery to `room_id`
    ///
    /// ## Errors
    ///
    /// `SigningFailed` if the sender's key cannot sign. The message must
    /// then be dropped, never sent unsigned.
    pub fn compose(
        room_id: impl Into<String>,
        sender: &UserIdentity,
        content: impl Into<String>,
    ) -> Result<Self> {
        let key = sender
            .private_key()
            .map_err(|e| Error::SigningFailed(e.to_string()))?;
        let message = SignedMessage::sign_with_key(content, &key)?;

        let chat = Self {
            id: Uuid::new_v4(),
            room_id: room_id.into(),
            sender_id: sender.id(),
            sent_at: Utc::now(),
            message,
        };
        tracing::debug!(message_id = %chat.id, room = %chat.room_id, "Composed signed message");
        Ok(chat)
    }

    /// The message text
    pub fn content(&self) -> &str {
        &self.message.content
    }

    /// The base64 signature
    pub fn signature(&self) -> &str {
        &self.message.signature
    }

    /// Whether `sender` wrote this message
    ///
    /// True only when the claimed sender id matches and the signature
    /// verifies under the sender's public key.
    pub fn is_authentic(&self, sender: &PublicIdentity) -> bool {
        if self.sender_id != sender.id {
            return false;
        }
        match sender.public_key() {
            Ok(key) => verify_with_key(&self.message.content, &self.message.signature, &key),
            Err(_) => false,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
