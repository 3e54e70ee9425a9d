//! Input events from the buttons and keypad

use super::Device;
use crate::error::Error;
use crate::menu::{Direction, ScreenId};
use crate::messaging::Key;
use crate::traits::Transport;

/// Function button on the side of the case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FunctionKey {
    /// Back
    F1,
    F2,
    F3,
    F4,
}

impl FunctionKey {
    /// Key for a button number (1-4)
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(FunctionKey::F1),
            2 => Some(FunctionKey::F2),
            3 => Some(FunctionKey::F3),
            4 => Some(FunctionKey::F4),
            _ => None,
        }
    }
}

/// Everything the host can feed into the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    Up,
    Down,
    /// Select / send
    Accept,
    /// Jump straight to a screen
    OpenMenu(ScreenId),
    /// Keypad key
    Key(Key),
    Function(FunctionKey),
}

impl InputEvent {
    /// Parse a keypad character (`0`-`9`, `*`, `#`)
    pub fn from_char(c: char) -> Option<Self> {
        let key = match c {
            '*' => Key::Star,
            '#' => Key::Pound,
            _ => Key::from_digit(c.to_digit(10)? as u8)?,
        };
        Some(InputEvent::Key(key))
    }
}

impl<T: Transport> Device<T> {
    /// Apply one input event
    ///
    /// Keypad keys are ignored outside the reader, as are the reserved
    /// function keys. An error leaves the device interactive.
    pub fn process_input(&mut self, event: InputEvent) -> Result<(), Error> {
        match event {
            InputEvent::Up => {
                self.move_highlight(Direction::Up);
                Ok(())
            }
            InputEvent::Down => {
                self.move_highlight(Direction::Down);
                Ok(())
            }
            InputEvent::Accept => self.activate(),
            InputEvent::OpenMenu(screen) => self.enter(screen),
            InputEvent::Key(key) => {
                if self.current_screen() != ScreenId::Reader {
                    return Ok(());
                }
                self.press_key(key)
            }
            InputEvent::Function(FunctionKey::F1) => self.go_back(),
            InputEvent::Function(_) => Ok(()),
        }
    }
}
