//! Conversation threads

use core::fmt::Write;

use doomsday_protocol::{Message, Name, Person};
use heapless::{String, Vec};

use crate::config::{MAX_DRAFT_LEN, MAX_MESSAGES};
use crate::error::Error;
use crate::menu::{wrap_step, Direction};

/// Handle of a thread in the device's thread list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThreadId(pub(crate) usize);

impl ThreadId {
    /// Position in the thread list
    pub fn index(self) -> usize {
        self.0
    }
}

/// Text being composed
pub type Draft = String<MAX_DRAFT_LEN>;

/// A conversation with one remote participant
#[derive(Debug, Clone)]
pub struct Thread {
    name: Name,
    local: Person,
    remote: Person,
    messages: Vec<Message, MAX_MESSAGES>,
    highlight: usize,
    draft: Draft,
}

impl Thread {
    /// Empty thread between `local` and `remote`
    ///
    /// Named after the remote's display name, or its decimal id when the
    /// name is empty.
    pub fn new(local: Person, remote: Person) -> Self {
        let mut name = remote.name.clone();
        if name.is_empty() {
            // Ten digits always fit
            let _ = write!(name, "{}", remote.id);
        }
        Self {
            name,
            local,
            remote,
            messages: Vec::new(),
            highlight: 0,
            draft: Draft::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn remote(&self) -> &Person {
        &self.remote
    }

    /// Both participants, local first
    pub fn participants(&self) -> [&Person; 2] {
        [&self.local, &self.remote]
    }

    /// Messages in arrival order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Highlighted message index (0 when empty)
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    pub fn highlighted(&self) -> Option<&Message> {
        self.messages.get(self.highlight)
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub(crate) fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn is_full(&self) -> bool {
        self.messages.is_full()
    }

    /// Append a message and highlight it
    pub fn push(&mut self, message: Message) -> Result<(), Error> {
        self.messages
            .push(message)
            .map_err(|_| Error::CapacityExceeded)?;
        self.highlight = self.messages.len() - 1;
        Ok(())
    }

    /// Move the message highlight with wraparound
    pub fn move_highlight(&mut self, direction: Direction) {
        self.highlight = wrap_step(self.highlight, self.messages.len(), direction);
    }
}
