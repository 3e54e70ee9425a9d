//! Configuration
//!
//! Compile-time capacities plus the small runtime configuration a board
//! hands to the core at startup.

pub mod types;

pub use types::*;
