//! Doomsday Messenger radio payload format
//!
//! This crate defines what one handheld puts on the air for another to
//! pick up. The radio driver only moves opaque byte payloads; this crate
//! turns a [`Message`] into such a payload and back.
//!
//! # Payload Overview
//!
//! ```text
//! ┌───────┬───────────┬──────┬─────────────┬──────┬──────────────┐
//! │ MAGIC │ SENDER ID │ 0xCC │ SENDER NAME │ 0xCC │ MESSAGE TEXT │
//! │ 4B    │ 1–10B     │ 1B   │ 0–16B       │ 1B   │ 0–128B       │
//! └───────┴───────────┴──────┴─────────────┴──────┴──────────────┘
//! ```
//!
//! The sender ID is ASCII decimal. The name may not contain the separator
//! byte; the text is everything after the second separator, so it may.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod codec;
pub mod message;

pub use codec::{decode, encode, encode_into, CodecError, Payload, MAGIC, MAX_PAYLOAD_SIZE, SEPARATOR};
pub use message::{Message, Name, Person, Text, BROADCAST_ID, MAX_NAME_LEN, MAX_TEXT_LEN};
