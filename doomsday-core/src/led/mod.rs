//! LED animations and frame scheduling

pub mod animation;
pub mod scheduler;

pub use animation::{Animation, AnimationId, Color, LedFrame, DEMO, IDLE, LED_COUNT, SOS};
pub use scheduler::LedScheduler;
