//! Screen catalog
//!
//! Every screen is built once when the device starts and stored in an
//! array indexed by [`ScreenId`]. Items refer to other screens by id, so
//! the menu graph can be cyclic without any screen owning another.

use heapless::{String, Vec};

use super::decoration::{CursorData, Decoration};
use crate::config::{MAX_ITEMS, MAX_LABEL_LEN};
use crate::device::Device;
use crate::error::Error;
use crate::led::AnimationId;
use crate::messaging::ThreadId;
use crate::traits::Transport;

/// Item label text
pub type Label = String<MAX_LABEL_LEN>;

/// Callback run against the whole device
pub type Hook<T> = fn(&mut Device<T>) -> Result<(), Error>;

/// Supplier of decoration data for an item
pub type CursorFn<T> = fn(&Device<T>) -> CursorData;

/// Number of screens in a catalog
pub const SCREEN_COUNT: usize = 9;

/// Stable handle of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScreenId {
    /// Root menu
    MainMenu,
    /// Thread list
    Conversations,
    /// Pick a recipient
    NewConversation,
    People,
    Games,
    Demos,
    Tools,
    Settings,
    /// Message reader of the current thread
    Reader,
}

impl ScreenId {
    /// All screens, in catalog order
    pub const ALL: [ScreenId; SCREEN_COUNT] = [
        ScreenId::MainMenu,
        ScreenId::Conversations,
        ScreenId::NewConversation,
        ScreenId::People,
        ScreenId::Games,
        ScreenId::Demos,
        ScreenId::Tools,
        ScreenId::Settings,
        ScreenId::Reader,
    ];

    /// Position in the catalog array
    pub const fn index(self) -> usize {
        match self {
            ScreenId::MainMenu => 0,
            ScreenId::Conversations => 1,
            ScreenId::NewConversation => 2,
            ScreenId::People => 3,
            ScreenId::Games => 4,
            ScreenId::Demos => 5,
            ScreenId::Tools => 6,
            ScreenId::Settings => 7,
            ScreenId::Reader => 8,
        }
    }
}

/// What an item does when activated
pub enum Action<T> {
    /// Navigate forward to a screen
    Enter(ScreenId),
    /// Navigate back
    Back,
    /// Toggle a themed LED animation
    ToggleAnimation(AnimationId),
    /// Make a thread current and open the reader
    OpenThread(ThreadId),
    /// Run arbitrary device logic
    Call(Hook<T>),
}

// Manual impls: derive would require `T: Clone`
impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Action<T> {}

impl<T> core::fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Action::Enter(id) => f.debug_tuple("Enter").field(id).finish(),
            Action::Back => f.write_str("Back"),
            Action::ToggleAnimation(id) => f.debug_tuple("ToggleAnimation").field(id).finish(),
            Action::OpenThread(id) => f.debug_tuple("OpenThread").field(id).finish(),
            Action::Call(_) => f.write_str("Call"),
        }
    }
}

/// A selectable entry on a screen
pub struct Item<T> {
    pub label: Label,
    pub action: Action<T>,
    pub decoration: Decoration,
    pub cursor: Option<CursorFn<T>>,
}

impl<T> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            action: self.action,
            decoration: self.decoration,
            cursor: self.cursor,
        }
    }
}

impl<T> core::fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Item")
            .field("label", &self.label)
            .field("action", &self.action)
            .field("decoration", &self.decoration)
            .finish()
    }
}

/// Build a label, truncating at [`MAX_LABEL_LEN`] bytes on a char boundary
pub fn label(text: &str) -> Label {
    let mut label = Label::new();
    for c in text.chars() {
        if label.push(c).is_err() {
            break;
        }
    }
    label
}

impl<T> Item<T> {
    /// Item with no decoration
    pub fn new(text: &str, action: Action<T>) -> Self {
        Self {
            label: label(text),
            action,
            decoration: Decoration::None,
            cursor: None,
        }
    }

    /// Forward navigation item (right arrow)
    pub fn link(text: &str, target: ScreenId) -> Self {
        Self::new(text, Action::Enter(target)).decorated(Decoration::RightArrow)
    }

    /// "Go Back" item (left arrow)
    pub fn back() -> Self {
        Self::new("Go Back", Action::Back).decorated(Decoration::LeftArrow)
    }

    /// Checkbox item showing `checked`
    pub fn toggle(text: &str, action: Action<T>, checked: CursorFn<T>) -> Self {
        let mut item = Self::new(text, action).decorated(Decoration::Checkbox);
        item.cursor = Some(checked);
        item
    }

    pub fn decorated(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }

    /// Decoration data for rendering
    ///
    /// Fails with [`Error::CursorDataTypeMismatch`] when the supplier
    /// returns data the decoration cannot draw. That is a catalog bug, so
    /// debug builds assert.
    pub fn cursor_data(&self, device: &Device<T>) -> Result<CursorData, Error> {
        let data = match self.cursor {
            Some(supply) => supply(device),
            None => CursorData::None,
        };
        if !self.decoration.accepts(data) {
            debug_assert!(false, "cursor data {:?} for {:?}", data, self.decoration);
            return Err(Error::CursorDataTypeMismatch);
        }
        Ok(data)
    }
}

/// One screen definition
pub struct Screen<T> {
    pub id: ScreenId,
    pub title: &'static str,
    pub items: Vec<Item<T>, MAX_ITEMS>,
    pub on_enter: Option<Hook<T>>,
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            title: self.title,
            items: self.items.clone(),
            on_enter: self.on_enter,
        }
    }
}

impl<T> core::fmt::Debug for Screen<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Screen")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("items", &self.items)
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

impl<T> Screen<T> {
    /// Empty screen
    pub fn new(id: ScreenId, title: &'static str) -> Self {
        Self {
            id,
            title,
            items: Vec::new(),
            on_enter: None,
        }
    }

    /// Append an item
    ///
    /// Items past [`MAX_ITEMS`] are dropped (debug builds assert).
    pub fn with(mut self, item: Item<T>) -> Self {
        let pushed = self.items.push(item).is_ok();
        debug_assert!(pushed, "too many items on {:?}", self.id);
        self
    }

    /// Set the on-enter hook
    pub fn on_enter(mut self, hook: Hook<T>) -> Self {
        self.on_enter = Some(hook);
        self
    }
}

/// All screens of a device
pub struct Catalog<T> {
    screens: [Screen<T>; SCREEN_COUNT],
}

impl<T> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        Self {
            screens: self.screens.clone(),
        }
    }
}

impl<T> core::fmt::Debug for Catalog<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.screens.iter()).finish()
    }
}

impl<T> Catalog<T> {
    /// Root screen
    pub const ROOT: ScreenId = ScreenId::MainMenu;

    /// Catalog of titled screens with no items or hooks
    pub fn bare() -> Self {
        Self {
            screens: ScreenId::ALL.map(|id| Screen::new(id, default_title(id))),
        }
    }

    /// Look up a screen
    pub fn screen(&self, id: ScreenId) -> &Screen<T> {
        &self.screens[id.index()]
    }

    /// Replace the screen with the same id
    pub fn with_screen(mut self, screen: Screen<T>) -> Self {
        let index = screen.id.index();
        self.screens[index] = screen;
        self
    }
}

fn default_title(id: ScreenId) -> &'static str {
    match id {
        ScreenId::MainMenu => "Main Menu",
        ScreenId::Conversations => "Conversations",
        ScreenId::NewConversation => "New Conversation",
        ScreenId::People => "People",
        ScreenId::Games => "Games",
        ScreenId::Demos => "Demos",
        ScreenId::Tools => "Tools",
        ScreenId::Settings => "Settings",
        ScreenId::Reader => "Messages",
    }
}

impl<T: Transport> Catalog<T> {
    /// The messenger's menus
    pub fn standard() -> Self {
        Self::bare()
            .with_screen(
                Screen::new(ScreenId::MainMenu, "Main Menu")
                    .with(Item::link("Conversations", ScreenId::Conversations))
                    .with(Item::link("People", ScreenId::People))
                    .with(Item::link("Games", ScreenId::Games))
                    .with(Item::link("Demo", ScreenId::Demos))
                    .with(Item::link("Tools", ScreenId::Tools))
                    .with(Item::link("Settings", ScreenId::Settings)),
            )
            .with_screen(
                Screen::new(ScreenId::Conversations, "Conversations")
                    .with(Item::back())
                    .with(Item::link("New Conversation", ScreenId::NewConversation))
                    .on_enter(refresh_threads::<T>),
            )
            .with_screen(
                Screen::new(ScreenId::NewConversation, "New Conversation")
                    .with(Item::back())
                    .with(
                        Item::new("Everyone", Action::Call(open_broadcast::<T>))
                            .decorated(Decoration::RightArrow),
                    ),
            )
            .with_screen(Screen::new(ScreenId::People, "People").with(Item::back()))
            .with_screen(Screen::new(ScreenId::Games, "Games").with(Item::back()))
            .with_screen(
                Screen::new(ScreenId::Demos, "Demos")
                    .with(Item::back())
                    .with(Item::toggle(
                        "RGB Demo",
                        Action::ToggleAnimation(AnimationId::Demo),
                        demo_checked::<T>,
                    )),
            )
            .with_screen(
                Screen::new(ScreenId::Tools, "Tools")
                    .with(Item::back())
                    .with(Item::toggle(
                        "SOS Mode",
                        Action::ToggleAnimation(AnimationId::Sos),
                        sos_checked::<T>,
                    )),
            )
            .with_screen(Screen::new(ScreenId::Settings, "Settings").with(Item::back()))
    }
}

fn refresh_threads<T: Transport>(device: &mut Device<T>) -> Result<(), Error> {
    device.rebuild_thread_menu();
    Ok(())
}

fn open_broadcast<T: Transport>(device: &mut Device<T>) -> Result<(), Error> {
    let thread = device.find_or_create_thread(doomsday_protocol::Person::broadcast())?;
    device.open_thread(thread)
}

fn sos_checked<T: Transport>(device: &Device<T>) -> CursorData {
    CursorData::Checked(device.leds().is_playing(AnimationId::Sos))
}

fn demo_checked<T: Transport>(device: &Device<T>) -> CursorData {
    CursorData::Checked(device.leds().is_playing(AnimationId::Demo))
}
