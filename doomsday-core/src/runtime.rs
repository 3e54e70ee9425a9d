//! Cooperative host loop driver
//!
//! The radio driver may run in an interrupt handler. It enqueues raw
//! payloads on a `heapless::spsc::Queue`; the main loop owns the consumer
//! end through [`Runtime`] and feeds everything into the device from one
//! place:
//!
//! ```text
//! radio IRQ ──Producer──▶ Queue ──Consumer──▶ Runtime::poll ──▶ Device::receive
//! buttons ───────────────────────────────────▶ Runtime::handle_input
//! timer ─────────────────────────────────────▶ Runtime::poll ──▶ LedStrip
//! ```

use doomsday_protocol::Payload;
use heapless::spsc::Consumer;

use crate::config::INBOX_DEPTH;
use crate::device::{Device, InputEvent};
use crate::error::Error;
use crate::led::LedFrame;
use crate::traits::{LedStrip, Transport};

/// What one poll did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollReport {
    /// Payloads filed into threads
    pub received: u8,
    /// Payloads that failed to decode or did not fit
    pub dropped: u8,
    /// A new frame was written to the strip
    pub frame_changed: bool,
    /// Device revision after the poll
    pub revision: u32,
}

/// Drives a [`Device`] from the host loop
pub struct Runtime<'d, 'q, T> {
    device: &'d mut Device<T>,
    inbox: Consumer<'q, Payload, INBOX_DEPTH>,
    /// Clock at the last frame change (ms)
    last_frame_ms: u32,
    /// Scheduler switch count seen at the last poll
    switches: u32,
    /// Frame last written to the strip
    shown: Option<LedFrame>,
}

impl<'d, 'q, T: Transport> Runtime<'d, 'q, T> {
    /// Start driving `device`
    ///
    /// `now_ms` is the current clock; the first frame is written on the
    /// first poll.
    pub fn new(
        device: &'d mut Device<T>,
        inbox: Consumer<'q, Payload, INBOX_DEPTH>,
        now_ms: u32,
    ) -> Self {
        device.set_clock(now_ms);
        let switches = device.leds().switches();
        Self {
            device,
            inbox,
            last_frame_ms: now_ms,
            switches,
            shown: None,
        }
    }

    pub fn device(&self) -> &Device<T> {
        &*self.device
    }

    pub fn device_mut(&mut self) -> &mut Device<T> {
        &mut *self.device
    }

    /// Feed one input event to the device
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), Error> {
        trace!("input {}", event);
        let result = self.device.process_input(event);
        if let Err(e) = result {
            warn!("input {} failed: {}", event, e);
        }
        result
    }

    /// Run one pass of the host loop
    ///
    /// Updates the clock, files queued payloads, advances the LED
    /// animation and writes the strip if its colors changed.
    pub fn poll(&mut self, now_ms: u32, strip: &mut impl LedStrip) -> PollReport {
        let mut report = PollReport::default();
        self.device.set_clock(now_ms);

        while let Some(payload) = self.inbox.dequeue() {
            match self.device.receive(&payload) {
                Ok(()) => {
                    debug!("received {} bytes", payload.len());
                    report.received = report.received.saturating_add(1);
                }
                Err(e) => {
                    warn!("dropped payload: {}", e);
                    report.dropped = report.dropped.saturating_add(1);
                }
            }
        }

        // A newly switched-in animation shows its frame from now on
        let switches = self.device.leds().switches();
        if switches != self.switches {
            self.switches = switches;
            self.last_frame_ms = now_ms;
        }

        let elapsed = now_ms.wrapping_sub(self.last_frame_ms);
        if self.device.tick_leds(elapsed).is_some() {
            self.last_frame_ms = now_ms;
        }

        let frame = self.device.led_frame();
        if self.shown != Some(frame) {
            trace!("led frame {}", self.device.leds().frame_index());
            strip.write(&frame);
            self.shown = Some(frame);
            report.frame_changed = true;
        }

        report.revision = self.device.revision();
        report
    }
}
