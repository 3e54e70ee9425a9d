//! Unified error type for the messenger core
//!
//! All variants carry only fixed-size data so the error stays `Copy` and
//! can be handed to the host for display without allocation.

use doomsday_protocol::CodecError;

/// Top-level error type returned by every fallible core operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Navigation
    /// Go-back attempted with only the root screen in history
    AtRootState,

    /// Action not valid on the current screen
    DisallowedInContext,

    /// The message reader needs a current thread and there is none
    NoCurrentThread,

    // Messaging
    /// Inbound payload failed to decode (payload is dropped)
    InvalidMessage(CodecError),

    /// Send attempted before the host wired a transport
    TransportNotConfigured,

    /// The transport rejected the payload
    TransportFailed,

    // Catalog
    /// A decoration received data of the wrong shape
    CursorDataTypeMismatch,

    // Generic
    /// A fixed-capacity store is full
    CapacityExceeded,
}

impl Error {
    /// Short text suitable for an error screen
    pub fn message(&self) -> &'static str {
        match self {
            Error::AtRootState => "already at root state",
            Error::DisallowedInContext => "not allowed here",
            Error::NoCurrentThread => "no conversation open",
            Error::InvalidMessage(_) => "invalid message",
            Error::TransportNotConfigured => "radio send not configured",
            Error::TransportFailed => "radio send failed",
            Error::CursorDataTypeMismatch => "cursor data has wrong type",
            Error::CapacityExceeded => "storage full",
        }
    }
}

impl From<CodecError> for Error {
    fn from(e: CodecError) -> Self {
        Error::InvalidMessage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_becomes_invalid_message() {
        let err: Error = CodecError::MissingPrefix.into();
        assert_eq!(err, Error::InvalidMessage(CodecError::MissingPrefix));
        assert_eq!(err.message(), "invalid message");
    }

    #[test]
    fn test_root_state_message() {
        assert_eq!(Error::AtRootState.message(), "already at root state");
    }
}
