//! Navigation engine
//!
//! The history stack always holds at least the root screen and its top is
//! the current screen. Forward navigation pushes, back pops. Highlights
//! are kept per screen so a menu remembers its position.

use heapless::Vec;

use super::catalog::{Action, Item, ScreenId, SCREEN_COUNT};
use crate::config::MAX_HISTORY;
use crate::device::Device;
use crate::error::Error;
use crate::traits::Transport;

/// Highlight movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

/// Move `index` one step in a list of `len` entries, wrapping at both ends
pub fn wrap_step(index: usize, len: usize, direction: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    match direction {
        Direction::Up if index == 0 => len - 1,
        Direction::Up => (index - 1).min(len - 1),
        Direction::Down if index + 1 >= len => 0,
        Direction::Down => index + 1,
    }
}

/// History stack and per-screen highlights
#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<ScreenId, MAX_HISTORY>,
    highlights: [usize; SCREEN_COUNT],
    evict_oldest: bool,
    /// Entry evicted by the last push, restored by the next pop
    evicted: Option<ScreenId>,
}

impl Navigator {
    /// Start at `root` with a single-entry history
    pub fn new(root: ScreenId, evict_oldest: bool) -> Self {
        let mut history = Vec::new();
        // Capacity is at least one
        let _ = history.push(root);
        Self {
            history,
            highlights: [0; SCREEN_COUNT],
            evict_oldest,
            evicted: None,
        }
    }

    /// Screen at the top of the history
    pub fn current(&self) -> ScreenId {
        self.history.last().copied().unwrap_or(ScreenId::MainMenu)
    }

    /// History entries, root first
    pub fn history(&self) -> &[ScreenId] {
        &self.history
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Raw highlight stored for `screen`
    pub fn highlight(&self, screen: ScreenId) -> usize {
        self.highlights[screen.index()]
    }

    pub fn set_highlight(&mut self, screen: ScreenId, index: usize) {
        self.highlights[screen.index()] = index;
    }

    /// Check if [`push`](Self::push) would succeed
    pub fn can_push(&self) -> bool {
        !self.history.is_full() || (self.evict_oldest && self.history.len() >= 2)
    }

    /// Push a screen, evicting the oldest non-root entry when full
    ///
    /// Only the most recent eviction is remembered.
    pub fn push(&mut self, screen: ScreenId) -> Result<(), Error> {
        if !self.can_push() {
            return Err(Error::CapacityExceeded);
        }
        self.evicted = if self.history.is_full() {
            Some(self.history.remove(1))
        } else {
            None
        };
        self.history.push(screen).map_err(|_| Error::CapacityExceeded)
    }

    /// Replace the top entry
    pub fn replace(&mut self, screen: ScreenId) {
        if let Some(top) = self.history.last_mut() {
            *top = screen;
        }
    }

    /// Drop the top entry and return the new top
    pub fn pop(&mut self) -> Result<ScreenId, Error> {
        if self.history.len() <= 1 {
            return Err(Error::AtRootState);
        }
        self.history.pop();
        if let Some(screen) = self.evicted.take() {
            let _ = self.history.insert(1, screen);
        }
        Ok(self.current())
    }
}

impl<T: Transport> Device<T> {
    /// Current screen
    pub fn current_screen(&self) -> ScreenId {
        self.nav.current()
    }

    /// Navigation state
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    /// Items shown on `screen`
    ///
    /// The conversations screen shows the generated thread menu.
    pub fn items(&self, screen: ScreenId) -> &[Item<T>] {
        match screen {
            ScreenId::Conversations => self.thread_menu.as_slice(),
            _ => self.catalog.screen(screen).items.as_slice(),
        }
    }

    /// Highlighted item index on `screen`, clamped to its items
    pub fn highlight(&self, screen: ScreenId) -> usize {
        let len = self.items(screen).len();
        self.nav.highlight(screen).min(len.saturating_sub(1))
    }

    fn check_reader(&self, screen: ScreenId) -> Result<(), Error> {
        if screen == ScreenId::Reader && self.threads.current().is_none() {
            return Err(Error::NoCurrentThread);
        }
        Ok(())
    }

    fn run_on_enter(&mut self, screen: ScreenId) -> Result<(), Error> {
        match self.catalog.screen(screen).on_enter {
            Some(hook) => hook(self),
            None => Ok(()),
        }
    }

    /// Navigate forward to `screen`
    ///
    /// The transition is committed before the on-enter hook runs. A hook
    /// failure is returned but the device stays on `screen`.
    pub fn enter(&mut self, screen: ScreenId) -> Result<(), Error> {
        self.check_reader(screen)?;
        self.nav.push(screen)?;
        self.touch();
        self.run_on_enter(screen)
    }

    /// Switch to `screen` without growing the history
    pub fn enter_silent(&mut self, screen: ScreenId) -> Result<(), Error> {
        self.check_reader(screen)?;
        self.nav.replace(screen);
        self.touch();
        self.run_on_enter(screen)
    }

    /// Return to the previous screen
    ///
    /// Pops first, then re-enters the new top silently (running its hook).
    /// An entry evicted by the `enter` just before is put back.
    pub fn go_back(&mut self) -> Result<(), Error> {
        let previous = self.nav.pop()?;
        self.enter_silent(previous)
    }

    /// Move the highlight with wraparound
    ///
    /// In the reader this moves through the current thread's messages.
    /// Empty lists are left alone.
    pub fn move_highlight(&mut self, direction: Direction) {
        let screen = self.current_screen();
        if screen == ScreenId::Reader {
            if let Some(thread) = self.threads.current_mut() {
                thread.move_highlight(direction);
                self.touch();
            }
            return;
        }

        let len = self.items(screen).len();
        if len == 0 {
            return;
        }
        let index = wrap_step(self.highlight(screen), len, direction);
        self.nav.set_highlight(screen, index);
        self.touch();
    }

    /// Activate the highlighted item
    ///
    /// In the reader this submits the draft instead.
    pub fn activate(&mut self) -> Result<(), Error> {
        let screen = self.current_screen();
        if screen == ScreenId::Reader {
            return self.submit();
        }

        let action = self
            .items(screen)
            .get(self.highlight(screen))
            .map(|item| item.action)
            .ok_or(Error::DisallowedInContext)?;

        match action {
            Action::Enter(target) => self.enter(target),
            Action::Back => self.go_back(),
            Action::ToggleAnimation(id) => {
                self.toggle_animation(id);
                Ok(())
            }
            Action::OpenThread(thread) => self.open_thread(thread),
            Action::Call(hook) => hook(self),
        }
    }
}
