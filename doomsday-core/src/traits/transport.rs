//! Outbound radio transport

use crate::error::Error;

/// Trait for sending encoded payloads
///
/// Inbound payloads do not go through this trait. The host hands them to
/// [`Device::receive`](crate::device::Device::receive), usually through
/// the runtime inbox.
pub trait Transport {
    /// Send one encoded payload
    ///
    /// Implementations return [`Error::TransportFailed`] when the radio
    /// rejects the payload.
    fn send(&mut self, payload: &[u8]) -> Result<(), Error>;
}

/// Placeholder used until the host wires a radio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unwired;

impl Transport for Unwired {
    fn send(&mut self, _payload: &[u8]) -> Result<(), Error> {
        Err(Error::TransportNotConfigured)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, payload: &[u8]) -> Result<(), Error> {
        (**self).send(payload)
    }
}
