//! Board-agnostic control core for the Doomsday Messenger handheld
//!
//! This crate contains all application logic that does not depend on
//! specific hardware:
//!
//! - Screen catalog and navigation engine
//! - Conversation threads and multi-tap text entry
//! - LED animation tables and frame scheduler
//! - Collaborator traits (radio transport, LED strip)
//! - Configuration and the host loop driver
//!
//! Everything is fixed-capacity and allocation free. The host owns the
//! loop: it feeds input events and inbound payloads in and polls the
//! device for what to draw.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the macros are visible to later modules
#[macro_use]
mod fmt;

pub mod config;
pub mod device;
pub mod error;
pub mod led;
pub mod menu;
pub mod messaging;
pub mod runtime;
pub mod traits;

pub use device::{Device, FunctionKey, InputEvent, MenuView, ThreadView};
pub use error::Error;
pub use runtime::{PollReport, Runtime};
