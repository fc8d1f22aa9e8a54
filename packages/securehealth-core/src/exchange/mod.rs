//! # Exchange Module
//!
//! The service layer that wires identities, crypto and storage together
//! for the two user-facing flows.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          EXCHANGE FLOWS                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  File transfer (FileExchange)                                          │
//! │  ──────────────────────────────                                         │
//! │   send_file:  role check ─► sanitise name ─► encrypt for recipient     │
//! │               ─► BlobStore::put ─► FileRecord                          │
//! │   open_file:  party check ─► BlobStore::get ─► decrypt with own key    │
//! │                                                                         │
//! │  Chat (ChatMessage)                                                    │
//! │  ───────────────────                                                    │
//! │   compose:       sign content with sender key ─► stamp room/sender/time│
//! │   is_authentic:  sender id matches ∧ signature verifies                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod chat;
mod files;

pub use chat::ChatMessage;
pub use files::{sanitize_filename, FileExchange, FileRecord};

use crate::error::{Error, Result};
use crate::identity::Role;

/// Refuse exchanges between roles that are not counterparts
pub(crate) fn check_pairing(from: Role, to: Role) -> Result<()> {
    if from.can_exchange_with(to) {
        Ok(())
    } else {
        Err(Error::RoleMismatch(from.to_string(), to.to_string()))
    }
}
