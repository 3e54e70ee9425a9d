//! LED frame scheduler
//!
//! Plays one [`Animation`] at a time. The caller measures the time since
//! the last frame change and passes it to [`LedScheduler::tick`]; the
//! scheduler only decides whether that is long enough to advance.

use super::animation::{Animation, AnimationId, Color, LedFrame, LED_COUNT};

/// Active animation and frame position
#[derive(Debug, Clone, Copy)]
pub struct LedScheduler {
    animation: &'static Animation,
    frame: usize,
    /// Bumped (wrapping) on every animation switch
    switches: u32,
}

impl LedScheduler {
    /// Start `animation` at frame 0
    pub const fn new(animation: &'static Animation) -> Self {
        Self {
            animation,
            frame: 0,
            switches: 0,
        }
    }

    /// Animation being played
    pub fn animation(&self) -> &'static Animation {
        self.animation
    }

    /// Check if `id` is the animation being played
    pub fn is_playing(&self, id: AnimationId) -> bool {
        core::ptr::eq(self.animation, id.animation())
    }

    /// Current frame position
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Switch counter
    ///
    /// Changes whenever an animation is switched in, so a driver can
    /// restart its frame timer.
    pub fn switches(&self) -> u32 {
        self.switches
    }

    /// Colors of the current frame
    pub fn frame(&self) -> LedFrame {
        self.animation
            .frames
            .get(self.frame)
            .copied()
            .unwrap_or([Color::BLACK; LED_COUNT])
    }

    /// Switch animation and restart from frame 0
    pub fn switch_reset(&mut self, animation: &'static Animation) {
        self.animation = animation;
        self.frame = 0;
        self.switches = self.switches.wrapping_add(1);
    }

    /// Switch animation keeping the frame position
    ///
    /// The position wraps if the new animation is shorter.
    pub fn switch_continue(&mut self, animation: &'static Animation) {
        self.animation = animation;
        self.frame = match animation.len() {
            0 => 0,
            len => self.frame % len,
        };
        self.switches = self.switches.wrapping_add(1);
    }

    /// Advance one frame if `elapsed_ms` covers the frame duration
    ///
    /// `elapsed_ms` is the time since the last frame change. Returns the
    /// new frame when it advanced, `None` otherwise.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<LedFrame> {
        if self.animation.is_empty() || elapsed_ms < self.animation.frame_ms {
            return None;
        }
        self.frame = (self.frame + 1) % self.animation.len();
        Some(self.frame())
    }
}
