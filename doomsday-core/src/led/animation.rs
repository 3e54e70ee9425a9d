//! LED animation tables
//!
//! Each animation is a loop of frames for the six-LED strip with a fixed
//! time per frame. Tables are built at compile time and live in flash.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of LEDs on the strip
pub const LED_COUNT: usize = 6;

/// One LED color (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Check if the LED is dark
    pub const fn is_off(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Colors for every LED on the strip
pub type LedFrame = [Color; LED_COUNT];

/// A looping LED pattern
#[derive(Debug)]
pub struct Animation {
    /// Display name
    pub name: &'static str,
    /// Time each frame is shown (ms)
    pub frame_ms: u32,
    /// Frames in playback order (never empty)
    pub frames: &'static [LedFrame],
}

impl Animation {
    /// Number of frames in the loop
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the animation has no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Built-in animations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnimationId {
    /// All LEDs off
    Idle,
    /// SOS in morse code
    Sos,
    /// Color chase and fades
    Demo,
}

impl AnimationId {
    /// Get the animation table
    pub fn animation(self) -> &'static Animation {
        match self {
            AnimationId::Idle => &IDLE,
            AnimationId::Sos => &SOS,
            AnimationId::Demo => &DEMO,
        }
    }
}

const fn solid(color: Color) -> LedFrame {
    [color; LED_COUNT]
}

/// Blank strip
pub static IDLE: Animation = Animation {
    name: "Idle",
    frame_ms: 100,
    frames: &IDLE_FRAMES,
};

static IDLE_FRAMES: [LedFrame; 1] = [solid(Color::BLACK)];

/// SOS timing: one frame per morse unit (dot = 1 on, dash = 3 on)
const SOS_PATTERN: [bool; 32] = [
    // S
    true, false, true, false, true, false, false,
    // O
    true, true, true, false, true, true, true, false, true, true, true, false, false,
    // S
    true, false, true, false, true, false,
    // word gap
    false, false, false, false, false, false,
];

const fn sos_frames() -> [LedFrame; SOS_PATTERN.len()] {
    let mut frames = [solid(Color::BLACK); SOS_PATTERN.len()];
    let mut i = 0;
    while i < SOS_PATTERN.len() {
        if SOS_PATTERN[i] {
            frames[i] = solid(Color::WHITE);
        }
        i += 1;
    }
    frames
}

/// Morse SOS on all LEDs
pub static SOS: Animation = Animation {
    name: "SOS",
    frame_ms: 200,
    frames: &SOS_FRAMES,
};

static SOS_FRAMES: [LedFrame; SOS_PATTERN.len()] = sos_frames();

/// Frames in the chase section
const CHASE_LEN: usize = 12;

/// Brightness steps of one fade up and down
const FADE_LEVELS: [u8; 9] = [50, 100, 150, 200, 255, 200, 150, 100, 50];

/// Dark frames between sections
const GAP_LEN: usize = 4;

const DEMO_LEN: usize = CHASE_LEN + 4 * (GAP_LEN + FADE_LEVELS.len()) + GAP_LEN;

/// Chase color for an LED `offset` frames behind the head
const fn chase_color(offset: usize) -> Color {
    match offset {
        1 => Color::GREEN,
        2..=6 if offset % 2 == 0 => Color::BLUE,
        2..=6 => Color::RED,
        _ => Color::BLACK,
    }
}

const fn demo_frames() -> [LedFrame; DEMO_LEN] {
    let mut frames = [solid(Color::BLACK); DEMO_LEN];

    // A green head trailing red/blue runs down the strip
    let mut f = 0;
    while f < CHASE_LEN {
        let mut led = 0;
        while led < LED_COUNT {
            if f > led {
                frames[f][led] = chase_color(f - led);
            }
            led += 1;
        }
        f += 1;
    }

    // White, red, green, blue fades separated by dark gaps
    let mut pos = CHASE_LEN + GAP_LEN;
    let mut channel = 0;
    while channel < 4 {
        let mut step = 0;
        while step < FADE_LEVELS.len() {
            let v = FADE_LEVELS[step];
            frames[pos] = solid(match channel {
                0 => Color::new(v, v, v),
                1 => Color::new(v, 0, 0),
                2 => Color::new(0, v, 0),
                _ => Color::new(0, 0, v),
            });
            pos += 1;
            step += 1;
        }
        pos += GAP_LEN;
        channel += 1;
    }
    frames
}

/// Strip self-test pattern
pub static DEMO: Animation = Animation {
    name: "Demo",
    frame_ms: 1,
    frames: &DEMO_FRAMES,
};

static DEMO_FRAMES: [LedFrame; DEMO_LEN] = demo_frames();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_is_dark() {
        assert_eq!(IDLE.len(), 1);
        assert!(IDLE.frames[0].iter().all(Color::is_off));
    }

    #[test]
    fn test_sos_timing() {
        assert_eq!(SOS.len(), 32);
        assert_eq!(SOS.frame_ms, 200);

        let lit = SOS.frames.iter().filter(|f| f[0] == Color::WHITE).count();
        // Three dots plus three 3-unit dashes plus three dots
        assert_eq!(lit, 3 + 9 + 3);

        // Dash in the middle: three lit frames in a row
        assert!(SOS.frames[7..10].iter().all(|f| f[0] == Color::WHITE));
        assert!(SOS.frames[26..].iter().all(|f| f[0].is_off()));
    }

    #[test]
    fn test_demo_chase() {
        assert_eq!(DEMO.len(), 68);

        // Frame 0 dark, head enters on frame 1
        assert!(DEMO.frames[0].iter().all(Color::is_off));
        assert_eq!(DEMO.frames[1][0], Color::GREEN);

        // Frame 6: head on the last LED, trail behind it
        assert_eq!(
            DEMO.frames[6],
            [Color::BLUE, Color::RED, Color::BLUE, Color::RED, Color::BLUE, Color::GREEN]
        );

        // Frame 11: only the tail end remains
        assert!(DEMO.frames[11][..5].iter().all(Color::is_off));
        assert_eq!(DEMO.frames[11][5], Color::BLUE);
    }

    #[test]
    fn test_demo_fades() {
        let white_peak = CHASE_LEN + GAP_LEN + 4;
        assert_eq!(DEMO.frames[white_peak], solid(Color::WHITE));

        let blue_start = CHASE_LEN + 3 * (GAP_LEN + FADE_LEVELS.len()) + GAP_LEN;
        assert_eq!(DEMO.frames[blue_start], solid(Color::new(0, 0, 50)));
        assert!(DEMO.frames[DEMO_LEN - 1].iter().all(Color::is_off));
    }

    #[test]
    fn test_ids_map_to_tables() {
        assert_eq!(AnimationId::Idle.animation().name, "Idle");
        assert_eq!(AnimationId::Sos.animation().name, "SOS");
        assert_eq!(AnimationId::Demo.animation().name, "Demo");
    }
}
