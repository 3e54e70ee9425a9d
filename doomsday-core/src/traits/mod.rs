//! Collaborator traits
//!
//! These traits define the interface between the messenger core and the
//! board-specific radio and LED drivers.

pub mod leds;
pub mod transport;

pub use leds::LedStrip;
pub use transport::{Transport, Unwired};
