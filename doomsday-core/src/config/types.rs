//! Configuration type definitions
//!
//! Board firmware may persist [`DeviceConfig`] in flash as postcard binary
//! data (with the `serde` feature). The core itself never touches storage.

use doomsday_protocol::{Name, Person, MAX_TEXT_LEN};
use rand_core::RngCore;

use crate::led::AnimationId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum conversation threads
pub const MAX_THREADS: usize = 8;

/// Maximum messages kept per thread
pub const MAX_MESSAGES: usize = 32;

/// Maximum draft length (one message worth of text)
pub const MAX_DRAFT_LEN: usize = MAX_TEXT_LEN;

/// Maximum navigation history depth
pub const MAX_HISTORY: usize = 16;

/// Maximum items on a catalog screen
pub const MAX_ITEMS: usize = 8;

/// Maximum item label length
pub const MAX_LABEL_LEN: usize = 20;

/// Items on the generated conversations screen (fixed items + one per thread)
pub const MAX_THREAD_MENU_ITEMS: usize = MAX_ITEMS + MAX_THREADS;

/// Inbound payloads buffered between the radio interrupt and the main loop
///
/// A `heapless::spsc::Queue` of this size holds one less element.
pub const INBOX_DEPTH: usize = 8;

/// Default owner name
const DEFAULT_OWNER_NAME: &str = "You";

/// Runtime configuration of one handheld
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Name other devices see
    pub owner_name: Name,
    /// Fixed device identifier (None = draw one at startup)
    pub local_id: Option<u32>,
    /// Animation shown when no themed animation is active
    pub idle_animation: AnimationId,
    /// Drop the oldest non-root history entry when history is full
    ///
    /// When false, navigating forward with a full history fails with
    /// `CapacityExceeded`.
    pub evict_oldest_history: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        let mut owner_name = Name::new();
        let _ = owner_name.push_str(DEFAULT_OWNER_NAME);
        Self {
            owner_name,
            local_id: None,
            idle_animation: AnimationId::Idle,
            evict_oldest_history: true,
        }
    }
}

impl DeviceConfig {
    /// Build the local identity
    ///
    /// Uses the configured identifier if any, otherwise draws one in
    /// `1..=i32::MAX` from `rng`. Zero is reserved for broadcast.
    pub fn identity<R: RngCore>(&self, rng: &mut R) -> Person {
        let id = match self.local_id {
            Some(id) => id,
            None => rng.next_u32() % (i32::MAX as u32) + 1,
        };
        Person {
            name: self.owner_name.clone(),
            id,
        }
    }
}

#[cfg(feature = "serde")]
impl DeviceConfig {
    /// Load from a postcard blob
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }

    /// Store into `buf`, returning the used prefix
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_default_config() {
        let config = DeviceConfig::default();
        assert_eq!(config.owner_name.as_str(), "You");
        assert_eq!(config.local_id, None);
        assert_eq!(config.idle_animation, AnimationId::Idle);
        assert!(config.evict_oldest_history);
    }

    #[test]
    fn test_fixed_identity() {
        let config = DeviceConfig {
            local_id: Some(1234),
            ..DeviceConfig::default()
        };
        let mut rng = StepRng::new(99, 1);
        let me = config.identity(&mut rng);
        assert_eq!(me.id, 1234);
        assert_eq!(me.name.as_str(), "You");
    }

    #[test]
    fn test_generated_identity_never_broadcast() {
        let config = DeviceConfig::default();

        // Values that would map to zero with a naive modulo
        for start in [0u64, i32::MAX as u64, u32::MAX as u64] {
            let mut rng = StepRng::new(start, 0);
            let me = config.identity(&mut rng);
            assert!(me.id >= 1);
            assert!(me.id <= i32::MAX as u32);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_postcard_roundtrip() {
        let config = DeviceConfig {
            local_id: Some(77),
            idle_animation: AnimationId::Sos,
            ..DeviceConfig::default()
        };
        let mut buf = [0u8; 64];
        let used = config.to_postcard(&mut buf).unwrap().len();
        assert_eq!(DeviceConfig::from_postcard(&buf[..used]).unwrap(), config);
    }
}
