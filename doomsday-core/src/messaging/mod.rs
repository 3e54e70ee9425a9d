//! Conversation threads and text entry

pub mod keypad;
pub mod store;
pub mod thread;

pub use keypad::{Key, Keypad};
pub use store::ThreadStore;
pub use thread::{Draft, Thread, ThreadId};
