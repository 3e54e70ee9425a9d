//! People and messages as they travel between devices

use heapless::String;

use crate::codec::CodecError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum display name length in bytes
pub const MAX_NAME_LEN: usize = 16;

/// Maximum message text length in bytes
pub const MAX_TEXT_LEN: usize = 128;

/// Identifier of the "everyone in range" participant
pub const BROADCAST_ID: u32 = 0;

/// Display name of the broadcast participant
const BROADCAST_NAME: &str = "Everyone";

/// Bounded display name
pub type Name = String<MAX_NAME_LEN>;

/// Bounded message text
pub type Text = String<MAX_TEXT_LEN>;

/// Copy `text` into a bounded string, failing if it does not fit
pub(crate) fn bounded<const N: usize>(text: &str) -> Result<String<N>, CodecError> {
    let mut out = String::new();
    out.push_str(text).map_err(|_| CodecError::FieldTooLong)?;
    Ok(out)
}

/// Another device (or this one)
///
/// The identifier is unique per device. Local identifiers are drawn at
/// random from a large space, so collisions are not handled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    /// Display name
    pub name: Name,
    /// Device identifier
    pub id: u32,
}

impl Person {
    /// Create a person, rejecting names longer than [`MAX_NAME_LEN`]
    pub fn new(name: &str, id: u32) -> Result<Self, CodecError> {
        Ok(Self {
            name: bounded(name)?,
            id,
        })
    }

    /// The participant every device in range listens to
    pub fn broadcast() -> Self {
        let mut name = Name::new();
        let _ = name.push_str(BROADCAST_NAME);
        Self {
            name,
            id: BROADCAST_ID,
        }
    }

    /// Check if this is the broadcast participant
    pub fn is_broadcast(&self) -> bool {
        self.id == BROADCAST_ID
    }
}

/// One message in a conversation
///
/// Immutable once stored in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    /// Message body
    pub text: Text,
    /// Who wrote it
    pub sender: Person,
    /// Device clock (ms) when it was sent, if known
    ///
    /// Not carried on the wire; decoded messages have `None`.
    pub sent_at_ms: Option<u32>,
}

impl Message {
    /// Create a message without a timestamp
    pub fn new(text: &str, sender: Person) -> Result<Self, CodecError> {
        Ok(Self {
            text: bounded(text)?,
            sender,
            sent_at_ms: None,
        })
    }

    /// Attach a send timestamp
    pub fn with_timestamp(mut self, sent_at_ms: u32) -> Self {
        self.sent_at_ms = Some(sent_at_ms);
        self
    }
}
