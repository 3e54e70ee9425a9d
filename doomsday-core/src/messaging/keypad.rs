//! Multi-tap text entry
//!
//! Repeated presses of one key cycle through its letters. Pressing a
//! different key commits the pending letter to the draft and starts on the
//! new key. The pending letter is shown after the draft but is not part of
//! it until committed.

use doomsday_protocol::{encode, Message};

use super::thread::Draft;
use crate::config::MAX_MESSAGES;
use crate::device::Device;
use crate::error::Error;
use crate::menu::ScreenId;
use crate::traits::Transport;

/// Keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    /// Delete
    Star,
    /// Commit pending letter
    Pound,
}

impl Key {
    /// Key for a digit
    pub fn from_digit(digit: u8) -> Option<Self> {
        Some(match digit {
            0 => Key::Num0,
            1 => Key::Num1,
            2 => Key::Num2,
            3 => Key::Num3,
            4 => Key::Num4,
            5 => Key::Num5,
            6 => Key::Num6,
            7 => Key::Num7,
            8 => Key::Num8,
            9 => Key::Num9,
            _ => return None,
        })
    }

    /// Letters cycled by repeated presses (empty for `*` and `#`)
    pub fn candidates(self) -> &'static [char] {
        match self {
            Key::Num0 => &[' '],
            Key::Num1 => &['1', '2'],
            Key::Num2 => &['a', 'b', 'c'],
            Key::Num3 => &['d', 'e', 'f'],
            Key::Num4 => &['g', 'h', 'i'],
            Key::Num5 => &['j', 'k', 'l'],
            Key::Num6 => &['m', 'n', 'o'],
            Key::Num7 => &['p', 'q', 'r', 's'],
            Key::Num8 => &['t', 'u', 'v'],
            Key::Num9 => &['w', 'x', 'y', 'z'],
            Key::Star | Key::Pound => &[],
        }
    }
}

/// Multi-tap state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    active: Option<Key>,
    index: usize,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key being cycled
    pub fn active(&self) -> Option<Key> {
        self.active
    }

    /// Selected but uncommitted letter
    pub fn pending(&self) -> Option<char> {
        self.active
            .and_then(|key| key.candidates().get(self.index).copied())
    }

    /// Handle a letter key
    ///
    /// On a full draft the switch is refused and nothing changes.
    pub fn press(&mut self, key: Key, draft: &mut Draft) -> Result<(), Error> {
        if key.candidates().is_empty() {
            return Err(Error::DisallowedInContext);
        }
        if self.active == Some(key) {
            self.index = (self.index + 1) % key.candidates().len();
            return Ok(());
        }
        self.commit(draft)?;
        self.active = Some(key);
        self.index = 0;
        Ok(())
    }

    /// Move the pending letter into `draft`
    pub fn commit(&mut self, draft: &mut Draft) -> Result<(), Error> {
        if let Some(c) = self.pending() {
            draft.push(c).map_err(|_| Error::CapacityExceeded)?;
        }
        self.reset();
        Ok(())
    }

    /// Drop the pending letter, or the last draft letter if none is pending
    pub fn delete(&mut self, draft: &mut Draft) {
        if self.active.is_some() {
            self.reset();
        } else {
            draft.pop();
        }
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.index = 0;
    }
}

impl<T: Transport> Device<T> {
    /// Multi-tap state
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Handle a keypad key in the reader
    ///
    /// `*` deletes and `#` commits the pending letter.
    pub fn press_key(&mut self, key: Key) -> Result<(), Error> {
        if self.current_screen() != ScreenId::Reader {
            return Err(Error::DisallowedInContext);
        }
        let thread = self.threads.current_mut().ok_or(Error::NoCurrentThread)?;
        let draft = thread.draft_mut();
        match key {
            Key::Star => self.keypad.delete(draft),
            Key::Pound => self.keypad.commit(draft)?,
            _ => self.keypad.press(key, draft)?,
        }
        self.touch();
        Ok(())
    }

    /// Send the draft of the current thread
    ///
    /// Commits the pending letter, encodes the draft as a message from the
    /// local identity and hands it to the transport. The draft is cleared
    /// whether or not the send succeeds; only a sent message is added to
    /// the thread. An empty draft sends nothing.
    pub fn submit(&mut self) -> Result<(), Error> {
        if self.current_screen() != ScreenId::Reader {
            return Err(Error::DisallowedInContext);
        }
        let thread = self.threads.current_mut().ok_or(Error::NoCurrentThread)?;
        if thread.messages().len() >= MAX_MESSAGES {
            return Err(Error::CapacityExceeded);
        }

        self.keypad.commit(thread.draft_mut())?;
        if thread.draft().is_empty() {
            self.touch();
            return Ok(());
        }

        let message = Message::new(thread.draft(), self.identity.clone())?
            .with_timestamp(self.now_ms);
        let payload = encode(&message)?;

        thread.draft_mut().clear();
        self.touch();
        self.transport.send(&payload)?;

        if let Some(thread) = self.threads.current_mut() {
            thread.push(message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, MAX_DRAFT_LEN};
    use crate::traits::Unwired;
    use doomsday_protocol::{decode, Person};
    use rand::rngs::mock::StepRng;

    #[derive(Default)]
    struct Radio {
        sent: std::vec::Vec<std::vec::Vec<u8>>,
        fail: bool,
    }

    impl Transport for Radio {
        fn send(&mut self, payload: &[u8]) -> Result<(), Error> {
            if self.fail {
                return Err(Error::TransportFailed);
            }
            self.sent.push(payload.to_vec());
            Ok(())
        }
    }

    fn config() -> DeviceConfig {
        DeviceConfig {
            local_id: Some(42),
            ..DeviceConfig::default()
        }
    }

    fn reader<T: Transport>(transport: T) -> Device<T> {
        let mut device = Device::with_transport(config(), &mut StepRng::new(0, 1), transport);
        let id = device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        device.open_thread(id).unwrap();
        device
    }

    fn press(device: &mut Device<impl Transport>, keys: &[Key]) {
        for &key in keys {
            device.press_key(key).unwrap();
        }
    }

    fn draft<T: Transport>(device: &Device<T>) -> &str {
        device.current_thread().unwrap().draft()
    }

    #[test]
    fn test_cycle_then_switch_commits() {
        let mut device = reader(Unwired);
        press(&mut device, &[Key::Num2, Key::Num2, Key::Num2]);
        assert_eq!(device.keypad().pending(), Some('c'));

        press(&mut device, &[Key::Num3]);
        assert_eq!(draft(&device), "c");
        assert_eq!(device.keypad().pending(), Some('d'));
    }

    #[test]
    fn test_cycle_wraps() {
        let mut keypad = Keypad::new();
        let mut draft = Draft::new();
        for _ in 0..4 {
            keypad.press(Key::Num2, &mut draft).unwrap();
        }
        assert_eq!(keypad.pending(), Some('a'));
        assert!(draft.is_empty());
    }

    #[test]
    fn test_key_one_cycles_digits() {
        let mut device = reader(Unwired);
        press(&mut device, &[Key::Num1]);
        assert_eq!(device.keypad().pending(), Some('1'));
        press(&mut device, &[Key::Num1, Key::Num1, Key::Pound]);
        assert_eq!(draft(&device), "1");
    }

    #[test]
    fn test_first_press_commits_nothing() {
        let mut device = reader(Unwired);
        press(&mut device, &[Key::Num4]);
        assert_eq!(draft(&device), "");
        assert_eq!(device.keypad().pending(), Some('g'));
    }

    #[test]
    fn test_pound_allows_same_key_twice() {
        let mut device = reader(Unwired);
        press(
            &mut device,
            &[Key::Num4, Key::Num4, Key::Pound, Key::Num4, Key::Num0, Key::Pound],
        );
        assert_eq!(draft(&device), "hg ");
        assert_eq!(device.keypad().pending(), None);
    }

    #[test]
    fn test_star_deletes() {
        let mut device = reader(Unwired);
        press(&mut device, &[Key::Num2, Key::Num3, Key::Star]);
        assert_eq!(draft(&device), "a");
        assert_eq!(device.keypad().pending(), None);

        press(&mut device, &[Key::Star]);
        assert_eq!(draft(&device), "");
        // Deleting from an empty draft is harmless
        press(&mut device, &[Key::Star]);
    }

    #[test]
    fn test_keys_outside_reader() {
        let mut device = reader(Unwired);
        device.go_back().unwrap();
        assert_eq!(device.press_key(Key::Num2), Err(Error::DisallowedInContext));
        assert_eq!(device.submit(), Err(Error::DisallowedInContext));
    }

    #[test]
    fn test_full_draft() {
        let mut keypad = Keypad::new();
        let mut draft = Draft::new();
        for _ in 0..MAX_DRAFT_LEN {
            draft.push('x').unwrap();
        }
        keypad.press(Key::Num2, &mut draft).unwrap();
        assert_eq!(keypad.press(Key::Num3, &mut draft), Err(Error::CapacityExceeded));
        assert_eq!(keypad.pending(), Some('a'));
    }

    #[test]
    fn test_submit_sends_and_logs() {
        let mut device = reader(Radio::default());
        device.now_ms = 1500;
        press(&mut device, &[Key::Num4, Key::Num4, Key::Num4, Key::Num3, Key::Num3]);
        device.submit().unwrap();

        assert_eq!(device.transport.sent.len(), 1);
        let sent = decode(&device.transport.sent[0]).unwrap();
        assert_eq!(sent.text.as_str(), "ie");
        assert_eq!(sent.sender.id, 42);
        assert_eq!(sent.sender.name.as_str(), "You");

        let thread = device.current_thread().unwrap();
        assert_eq!(thread.draft(), "");
        assert_eq!(thread.messages().len(), 1);
        assert_eq!(thread.messages()[0].sent_at_ms, Some(1500));
        assert_eq!(device.keypad().pending(), None);
    }

    #[test]
    fn test_accept_in_reader_submits() {
        let mut device = reader(Radio::default());
        press(&mut device, &[Key::Num5]);
        device.activate().unwrap();
        assert_eq!(device.transport.sent.len(), 1);
    }

    #[test]
    fn test_submit_unwired() {
        let mut device = reader(Unwired);
        press(&mut device, &[Key::Num2]);
        assert_eq!(device.submit(), Err(Error::TransportNotConfigured));
        let thread = device.current_thread().unwrap();
        assert_eq!(thread.draft(), "");
        assert!(thread.messages().is_empty());
    }

    #[test]
    fn test_submit_failed_send() {
        let radio = Radio {
            fail: true,
            ..Radio::default()
        };
        let mut device = reader(radio);
        press(&mut device, &[Key::Num2]);
        assert_eq!(device.submit(), Err(Error::TransportFailed));
        assert!(device.current_thread().unwrap().messages().is_empty());
    }

    #[test]
    fn test_submit_empty_draft() {
        let mut device = reader(Radio::default());
        device.submit().unwrap();
        assert!(device.transport.sent.is_empty());
    }
}
