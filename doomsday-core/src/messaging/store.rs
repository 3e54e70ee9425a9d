//! Thread store
//!
//! Threads are only ever appended, so a [`ThreadId`] stays valid for the
//! lifetime of the device.

use doomsday_protocol::{decode, Person};
use heapless::Vec;

use super::thread::{Thread, ThreadId};
use crate::config::MAX_THREADS;
use crate::device::Device;
use crate::error::Error;
use crate::menu::{label, Action, Decoration, Item, ScreenId};
use crate::traits::Transport;

/// All threads plus the open one
#[derive(Debug, Clone, Default)]
pub struct ThreadStore {
    threads: Vec<Thread, MAX_THREADS>,
    current: Option<ThreadId>,
}

impl ThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads in creation order
    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn get(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.get(id.index())
    }

    pub fn get_mut(&mut self, id: ThreadId) -> Option<&mut Thread> {
        self.threads.get_mut(id.index())
    }

    /// Thread with the remote participant `remote_id`
    pub fn find(&self, remote_id: u32) -> Option<ThreadId> {
        self.threads
            .iter()
            .position(|thread| thread.remote().id == remote_id)
            .map(ThreadId)
    }

    /// Append a new empty thread
    pub fn create(&mut self, local: Person, remote: Person) -> Result<ThreadId, Error> {
        let id = ThreadId(self.threads.len());
        self.threads
            .push(Thread::new(local, remote))
            .map_err(|_| Error::CapacityExceeded)?;
        Ok(id)
    }

    pub fn current_id(&self) -> Option<ThreadId> {
        self.current
    }

    pub fn current(&self) -> Option<&Thread> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_mut(&mut self) -> Option<&mut Thread> {
        self.current.and_then(|id| self.threads.get_mut(id.index()))
    }

    /// Make `id` the open thread
    pub fn set_current(&mut self, id: ThreadId) -> Result<(), Error> {
        if self.get(id).is_none() {
            return Err(Error::NoCurrentThread);
        }
        self.current = Some(id);
        Ok(())
    }
}

impl<T: Transport> Device<T> {
    /// All threads
    pub fn threads(&self) -> &[Thread] {
        self.threads.threads()
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.get(id)
    }

    /// The open thread
    pub fn current_thread(&self) -> Option<&Thread> {
        self.threads.current()
    }

    /// Start a thread with `remote`
    ///
    /// The thread menu is not regenerated; call
    /// [`rebuild_thread_menu`](Self::rebuild_thread_menu) to show it.
    pub fn create_thread(&mut self, remote: Person) -> Result<ThreadId, Error> {
        let id = self.threads.create(self.identity.clone(), remote)?;
        self.touch();
        Ok(id)
    }

    /// Thread with `remote`, created (and listed) if missing
    pub fn find_or_create_thread(&mut self, remote: Person) -> Result<ThreadId, Error> {
        if let Some(id) = self.threads.find(remote.id) {
            return Ok(id);
        }
        let id = self.create_thread(remote)?;
        self.rebuild_thread_menu();
        Ok(id)
    }

    /// Decode an inbound payload and file it under the sender's thread
    ///
    /// Nothing changes when decoding fails or storage is full.
    pub fn receive(&mut self, payload: &[u8]) -> Result<(), Error> {
        let message = decode(payload)?;

        match self.threads.find(message.sender.id) {
            Some(id) if self.threads.get(id).map_or(true, Thread::is_full) => {
                return Err(Error::CapacityExceeded);
            }
            None if self.threads.threads().len() >= MAX_THREADS => {
                return Err(Error::CapacityExceeded);
            }
            _ => {}
        }

        let id = self.find_or_create_thread(message.sender.clone())?;
        let thread = self.threads.get_mut(id).ok_or(Error::NoCurrentThread)?;
        thread.push(message)?;
        self.touch();
        Ok(())
    }

    /// Regenerate the conversations menu
    ///
    /// The fixed items of the conversations screen come first, followed by
    /// one entry per thread. The generated part is replaced, never
    /// appended to, so repeated calls are harmless. When threads were added
    /// since the last rebuild the newest entry is highlighted; otherwise
    /// the highlight is kept (clamped to the list).
    pub fn rebuild_thread_menu(&mut self) {
        let fixed = &self.catalog.screen(ScreenId::Conversations).items;
        let listed = self.thread_menu.len().saturating_sub(fixed.len());
        let grew = self.threads.threads().len() > listed;

        self.thread_menu.clear();
        for item in fixed.iter() {
            // Fixed items fit: MAX_ITEMS <= capacity
            let _ = self.thread_menu.push(item.clone());
        }
        for (index, thread) in self.threads.threads().iter().enumerate() {
            let item = Item {
                label: label(thread.name()),
                action: Action::OpenThread(ThreadId(index)),
                decoration: Decoration::RightArrow,
                cursor: None,
            };
            let _ = self.thread_menu.push(item);
        }

        let last = self.thread_menu.len().saturating_sub(1);
        let index = if grew {
            last
        } else {
            self.nav.highlight(ScreenId::Conversations).min(last)
        };
        self.nav.set_highlight(ScreenId::Conversations, index);
        self.touch();
    }

    /// Make `id` current and open the reader
    ///
    /// Any pending multi-tap character is discarded.
    pub fn open_thread(&mut self, id: ThreadId) -> Result<(), Error> {
        if self.threads.get(id).is_none() {
            return Err(Error::NoCurrentThread);
        }
        if !self.nav.can_push() {
            return Err(Error::CapacityExceeded);
        }
        self.threads.set_current(id)?;
        self.keypad.reset();
        self.enter(ScreenId::Reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeviceConfig, MAX_HISTORY, MAX_MESSAGES};
    use crate::traits::Unwired;
    use doomsday_protocol::{encode, CodecError, Message};
    use rand::rngs::mock::StepRng;

    fn device() -> Device<Unwired> {
        Device::new(DeviceConfig::default(), &mut StepRng::new(7, 1))
    }

    fn payload(text: &str, name: &str, id: u32) -> doomsday_protocol::Payload {
        let sender = Person::new(name, id).unwrap();
        encode(&Message::new(text, sender).unwrap()).unwrap()
    }

    #[test]
    fn test_create_then_rebuild_adds_one_entry() {
        let mut device = device();
        device.rebuild_thread_menu();
        let before = device.items(ScreenId::Conversations).len();

        let ada = device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        device.rebuild_thread_menu();
        let items = device.items(ScreenId::Conversations);
        assert_eq!(items.len(), before + 1);

        let entry = items.last().unwrap().clone();
        assert_eq!(entry.label.as_str(), "Ada");

        device.enter(ScreenId::Conversations).unwrap();
        device.nav.set_highlight(ScreenId::Conversations, before);
        device.activate().unwrap();
        assert_eq!(device.current_screen(), ScreenId::Reader);
        assert_eq!(device.threads.current_id(), Some(ada));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut device = device();
        device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        device.create_thread(Person::new("Bob", 6).unwrap()).unwrap();
        device.rebuild_thread_menu();
        let first: std::vec::Vec<_> = device
            .items(ScreenId::Conversations)
            .iter()
            .map(|item| item.label.clone())
            .collect();
        device.rebuild_thread_menu();
        device.rebuild_thread_menu();
        let again: std::vec::Vec<_> = device
            .items(ScreenId::Conversations)
            .iter()
            .map(|item| item.label.clone())
            .collect();
        assert_eq!(first, again);
        assert_eq!(first.len(), 4);
    }

    #[test]
    fn test_receive_creates_and_reuses_thread() {
        let mut device = device();
        device.receive(&payload("hi", "Bob", 77)).unwrap();
        device.receive(&payload("there", "Bob", 77)).unwrap();

        assert_eq!(device.threads().len(), 1);
        let thread = &device.threads()[0];
        assert_eq!(thread.name(), "Bob");
        assert_eq!(thread.messages().len(), 2);
        assert_eq!(thread.highlight(), 1);
        assert_eq!(thread.messages()[1].text.as_str(), "there");

        // New threads are listed right away
        assert_eq!(device.items(ScreenId::Conversations).len(), 3);
    }

    #[test]
    fn test_receive_unnamed_sender() {
        let mut device = device();
        device.receive(&payload("hi", "", 1234)).unwrap();
        assert_eq!(device.threads()[0].name(), "1234");
    }

    #[test]
    fn test_receive_invalid_leaves_state() {
        let mut device = device();
        device.receive(&payload("hi", "Bob", 77)).unwrap();
        let revision = device.revision();

        assert_eq!(
            device.receive(b"nope"),
            Err(Error::InvalidMessage(CodecError::MissingPrefix))
        );
        assert_eq!(device.threads().len(), 1);
        assert_eq!(device.threads()[0].messages().len(), 1);
        assert_eq!(device.revision(), revision);
    }

    #[test]
    fn test_receive_full_thread() {
        let mut device = device();
        for _ in 0..MAX_MESSAGES {
            device.receive(&payload("hi", "Bob", 77)).unwrap();
        }
        assert_eq!(
            device.receive(&payload("hi", "Bob", 77)),
            Err(Error::CapacityExceeded)
        );
    }

    #[test]
    fn test_receive_too_many_threads() {
        let mut device = device();
        for id in 1..=MAX_THREADS as u32 {
            device.receive(&payload("hi", "", id)).unwrap();
        }
        assert_eq!(
            device.receive(&payload("hi", "", 999)),
            Err(Error::CapacityExceeded)
        );
        assert_eq!(device.threads().len(), MAX_THREADS);
    }

    #[test]
    fn test_open_missing_thread() {
        let mut device = device();
        assert_eq!(device.open_thread(ThreadId(3)), Err(Error::NoCurrentThread));
        assert_eq!(device.current_screen(), ScreenId::MainMenu);
    }

    #[test]
    fn test_open_thread_full_history_keeps_state() {
        let config = DeviceConfig {
            evict_oldest_history: false,
            ..DeviceConfig::default()
        };
        let mut device = Device::new(config, &mut StepRng::new(7, 1));
        let ada = device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        let bob = device.create_thread(Person::new("Bob", 6).unwrap()).unwrap();
        device.open_thread(ada).unwrap();
        device.press_key(crate::messaging::Key::Num2).unwrap();
        while device.navigator().depth() < MAX_HISTORY {
            device.enter(ScreenId::People).unwrap();
        }

        assert_eq!(device.open_thread(bob), Err(Error::CapacityExceeded));
        assert_eq!(device.threads.current_id(), Some(ada));
        assert_eq!(device.keypad().pending(), Some('a'));
        assert_eq!(device.current_screen(), ScreenId::People);
    }

    #[test]
    fn test_new_sender_highlighted() {
        let mut device = device();
        device.enter(ScreenId::Conversations).unwrap();
        device.receive(&payload("hi", "Ada", 5)).unwrap();
        device.receive(&payload("hi", "Bob", 6)).unwrap();
        let last = device.items(ScreenId::Conversations).len() - 1;
        assert_eq!(device.highlight(ScreenId::Conversations), last);
        assert_eq!(device.items(ScreenId::Conversations)[last].label.as_str(), "Bob");

        // A rebuild with no new thread keeps the position
        device.move_highlight(crate::menu::Direction::Up);
        device.rebuild_thread_menu();
        assert_eq!(device.highlight(ScreenId::Conversations), last - 1);
    }

    #[test]
    fn test_broadcast_from_new_conversation() {
        let mut device = device();
        device.enter(ScreenId::NewConversation).unwrap();
        device.move_highlight(crate::menu::Direction::Down);
        device.activate().unwrap();

        assert_eq!(device.current_screen(), ScreenId::Reader);
        let thread = device.current_thread().unwrap();
        assert!(thread.remote().is_broadcast());
        assert_eq!(thread.name(), "Everyone");

        // Opening it again reuses the thread
        device.go_back().unwrap();
        device.activate().unwrap();
        assert_eq!(device.threads().len(), 1);
    }

    #[test]
    fn test_back_from_reader_lists_thread() {
        let mut device = device();
        device.enter(ScreenId::Conversations).unwrap();
        let id = device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        device.open_thread(id).unwrap();

        device.go_back().unwrap();
        assert_eq!(device.current_screen(), ScreenId::Conversations);
        assert_eq!(device.items(ScreenId::Conversations)[2].label.as_str(), "Ada");
    }
}
