//! The device aggregate
//!
//! [`Device`] owns every piece of runtime state: navigation, threads, the
//! keypad, the LED scheduler and the outbound transport. Behavior is split
//! across modules by concern; this module holds construction, the clock,
//! LED control and the change counter.

pub mod input;
pub mod view;

pub use input::{FunctionKey, InputEvent};
pub use view::{MenuView, ThreadView};

use doomsday_protocol::Person;
use heapless::Vec;
use rand_core::RngCore;

use crate::config::{DeviceConfig, MAX_THREAD_MENU_ITEMS};
use crate::led::{AnimationId, LedFrame, LedScheduler};
use crate::menu::{Catalog, Item, Navigator};
use crate::messaging::{Keypad, ThreadStore};
use crate::traits::{Transport, Unwired};

/// One handheld messenger
pub struct Device<T> {
    pub(crate) config: DeviceConfig,
    pub(crate) catalog: Catalog<T>,
    pub(crate) nav: Navigator,
    /// Conversations screen as last rebuilt
    pub(crate) thread_menu: Vec<Item<T>, MAX_THREAD_MENU_ITEMS>,
    pub(crate) threads: ThreadStore,
    pub(crate) identity: Person,
    pub(crate) keypad: Keypad,
    pub(crate) leds: LedScheduler,
    pub(crate) transport: T,
    /// Device clock (ms), set by the host
    pub(crate) now_ms: u32,
    revision: u32,
}

impl Device<Unwired> {
    /// Device with the standard menus and no radio
    ///
    /// Sending fails with `TransportNotConfigured` until a transport is
    /// wired with [`Device::with_transport`].
    pub fn new<R: RngCore>(config: DeviceConfig, rng: &mut R) -> Self {
        Self::with_transport(config, rng, Unwired)
    }
}

impl<T: Transport> Device<T> {
    /// Device with the standard menus
    pub fn with_transport<R: RngCore>(config: DeviceConfig, rng: &mut R, transport: T) -> Self {
        Self::with_catalog(config, rng, transport, Catalog::standard())
    }

    /// Device with a custom catalog
    ///
    /// Starts on the root screen. The root's on-enter hook is not run; call
    /// [`enter_silent`](Self::enter_silent) with the root screen to run it.
    pub fn with_catalog<R: RngCore>(
        config: DeviceConfig,
        rng: &mut R,
        transport: T,
        catalog: Catalog<T>,
    ) -> Self {
        let identity = config.identity(rng);
        let leds = LedScheduler::new(config.idle_animation.animation());
        let nav = Navigator::new(Catalog::<T>::ROOT, config.evict_oldest_history);

        let mut device = Self {
            config,
            catalog,
            nav,
            thread_menu: Vec::new(),
            threads: ThreadStore::new(),
            identity,
            keypad: Keypad::new(),
            leds,
            transport,
            now_ms: 0,
            revision: 0,
        };
        device.rebuild_thread_menu();
        device
    }

    /// Local identity used as the sender of outgoing messages
    pub fn identity(&self) -> &Person {
        &self.identity
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Device clock (ms)
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }

    /// Update the device clock
    ///
    /// Used to timestamp sent messages.
    pub fn set_clock(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }

    /// Change counter
    ///
    /// Increases (wrapping) whenever visible state changes, so a renderer
    /// only needs to redraw when it differs from the last value it saw.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// LED scheduler
    pub fn leds(&self) -> &LedScheduler {
        &self.leds
    }

    /// Colors currently shown on the strip
    pub fn led_frame(&self) -> LedFrame {
        self.leds.frame()
    }

    /// Toggle a themed animation
    ///
    /// Starting one restarts it from frame 0. Stopping it resumes the idle
    /// animation at the same position so the strip does not jump.
    pub fn toggle_animation(&mut self, id: AnimationId) {
        if self.leds.is_playing(id) {
            self.leds
                .switch_continue(self.config.idle_animation.animation());
        } else {
            self.leds.switch_reset(id.animation());
        }
        self.touch();
    }

    /// Advance the LED animation
    ///
    /// `elapsed_ms` is the time since the last frame change.
    pub fn tick_leds(&mut self, elapsed_ms: u32) -> Option<LedFrame> {
        self.leds.tick(elapsed_ms)
    }
}
