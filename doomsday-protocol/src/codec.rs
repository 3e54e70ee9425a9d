//! Payload encoding and decoding
//!
//! Payload format:
//! - MAGIC (4 bytes): ASCII "doom", rejects traffic from other radios
//! - SENDER ID (1-10 bytes): ASCII decimal `u32`
//! - SEPARATOR (1 byte): 0xCC
//! - SENDER NAME (0-16 bytes): UTF-8, never contains 0xCC
//! - SEPARATOR (1 byte): 0xCC
//! - TEXT (0-128 bytes): UTF-8, runs to the end of the payload
//!
//! Only the first two separators are structural. Any 0xCC after them is
//! part of the text, which keeps texts with combining marks (U+0300..U+033F
//! start with 0xCC in UTF-8) intact.

use heapless::Vec;

use crate::message::{bounded, Message, Person, MAX_NAME_LEN, MAX_TEXT_LEN};

/// Prefix carried by every payload
pub const MAGIC: &[u8; 4] = b"doom";

/// Field separator byte
pub const SEPARATOR: u8 = 0xCC;

/// Maximum digits in a decimal `u32`
pub const MAX_ID_DIGITS: usize = 10;

/// Maximum complete payload size (MAGIC + ID + SEP + NAME + SEP + TEXT)
pub const MAX_PAYLOAD_SIZE: usize = MAGIC.len() + MAX_ID_DIGITS + 1 + MAX_NAME_LEN + 1 + MAX_TEXT_LEN;

/// One encoded message, ready for the radio
pub type Payload = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Errors that can occur during payload encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Payload does not start with [`MAGIC`]
    MissingPrefix,
    /// Fewer than two separators after the prefix
    MissingSeparator,
    /// Sender ID is empty, non-numeric or out of range
    InvalidSenderId,
    /// Name or text is not valid UTF-8
    InvalidUtf8,
    /// Name or text exceeds its maximum length
    FieldTooLong,
    /// Sender name contains the separator byte
    NameContainsSeparator,
    /// Payload exceeds [`MAX_PAYLOAD_SIZE`]
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Write the decimal digits of `id` to the tail of `digits`
fn format_id(mut id: u32, digits: &mut [u8; MAX_ID_DIGITS]) -> &[u8] {
    let mut start = MAX_ID_DIGITS;
    loop {
        start -= 1;
        digits[start] = b'0' + (id % 10) as u8;
        id /= 10;
        if id == 0 {
            break;
        }
    }
    &digits[start..]
}

fn parse_id(digits: &[u8]) -> Result<u32, CodecError> {
    if digits.is_empty() || digits.len() > MAX_ID_DIGITS {
        return Err(CodecError::InvalidSenderId);
    }

    let mut id: u32 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(CodecError::InvalidSenderId);
        }
        id = id
            .checked_mul(10)
            .and_then(|id| id.checked_add(u32::from(byte - b'0')))
            .ok_or(CodecError::InvalidSenderId)?;
    }
    Ok(id)
}

/// Split at the first separator, dropping it
fn split_field(bytes: &[u8]) -> Result<(&[u8], &[u8]), CodecError> {
    let at = bytes
        .iter()
        .position(|&b| b == SEPARATOR)
        .ok_or(CodecError::MissingSeparator)?;
    Ok((&bytes[..at], &bytes[at + 1..]))
}

/// Encode a message into a byte buffer
///
/// Returns the number of bytes written. The timestamp is not encoded.
pub fn encode_into(message: &Message, buffer: &mut [u8]) -> Result<usize, CodecError> {
    let name = message.sender.name.as_bytes();
    if name.contains(&SEPARATOR) {
        return Err(CodecError::NameContainsSeparator);
    }

    let mut digits = [0u8; MAX_ID_DIGITS];
    let id = format_id(message.sender.id, &mut digits);
    let text = message.text.as_bytes();
    let separator: &[u8] = &[SEPARATOR];

    let fields: [&[u8]; 6] = [&MAGIC[..], id, separator, name, separator, text];
    let len: usize = fields.iter().map(|field| field.len()).sum();
    if buffer.len() < len {
        return Err(CodecError::BufferTooSmall);
    }

    let mut pos = 0;
    for field in fields {
        buffer[pos..pos + field.len()].copy_from_slice(field);
        pos += field.len();
    }
    Ok(pos)
}

/// Encode a message into a heapless payload
pub fn encode(message: &Message) -> Result<Payload, CodecError> {
    let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
    let len = encode_into(message, &mut buffer)?;
    Vec::from_slice(&buffer[..len]).map_err(|_| CodecError::BufferTooSmall)
}

/// Decode a payload received from the radio
///
/// The returned message has no timestamp.
pub fn decode(payload: &[u8]) -> Result<Message, CodecError> {
    let body = payload
        .strip_prefix(&MAGIC[..])
        .ok_or(CodecError::MissingPrefix)?;
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(CodecError::PayloadTooLarge);
    }

    let (id, rest) = split_field(body)?;
    let (name, text) = split_field(rest)?;

    let id = parse_id(id)?;
    let name = core::str::from_utf8(name).map_err(|_| CodecError::InvalidUtf8)?;
    let text = core::str::from_utf8(text).map_err(|_| CodecError::InvalidUtf8)?;

    Ok(Message {
        text: bounded(text)?,
        sender: Person {
            name: bounded(name)?,
            id,
        },
        sent_at_ms: None,
    })
}
