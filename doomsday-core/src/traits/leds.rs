//! LED strip output

use crate::led::LedFrame;

/// Trait for the six-LED strip driver
///
/// Writes are fire-and-forget; a driver that can fail should log and drop
/// the frame. The next change rewrites every LED anyway.
pub trait LedStrip {
    /// Show one frame
    fn write(&mut self, frame: &LedFrame);
}
