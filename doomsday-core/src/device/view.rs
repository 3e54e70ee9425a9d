//! Read-only snapshots for the renderer

use super::Device;
use crate::error::Error;
use crate::menu::{CursorData, Item, ScreenId};
use crate::messaging::Thread;
use crate::traits::Transport;

/// A menu screen as it should be drawn
pub struct MenuView<'a, T> {
    pub screen: ScreenId,
    pub title: &'static str,
    pub items: &'a [Item<T>],
    /// Highlighted item (0 when there are no items)
    pub highlight: usize,
}

/// The reader as it should be drawn
pub struct ThreadView<'a> {
    pub thread: &'a Thread,
    /// Letter to show after the draft
    pub pending: Option<char>,
}

impl<T: Transport> Device<T> {
    /// Snapshot of the current menu (`None` in the reader)
    pub fn menu_view(&self) -> Option<MenuView<'_, T>> {
        let screen = self.current_screen();
        if screen == ScreenId::Reader {
            return None;
        }
        Some(MenuView {
            screen,
            title: self.catalog.screen(screen).title,
            items: self.items(screen),
            highlight: self.highlight(screen),
        })
    }

    /// Snapshot of the reader (`None` outside it)
    pub fn thread_view(&self) -> Option<ThreadView<'_>> {
        if self.current_screen() != ScreenId::Reader {
            return None;
        }
        Some(ThreadView {
            thread: self.current_thread()?,
            pending: self.keypad.pending(),
        })
    }

    /// Decoration data for item `index` of the current menu
    pub fn cursor_data(&self, index: usize) -> Result<CursorData, Error> {
        let item = self
            .items(self.current_screen())
            .get(index)
            .ok_or(Error::DisallowedInContext)?;
        item.cursor_data(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::menu::{Action, Catalog, Decoration, Screen};
    use crate::traits::Unwired;
    use doomsday_protocol::Person;
    use rand::rngs::mock::StepRng;

    fn device() -> Device<Unwired> {
        Device::new(DeviceConfig::default(), &mut StepRng::new(7, 1))
    }

    #[test]
    fn test_menu_view() {
        let mut device = device();
        device.enter(ScreenId::Demos).unwrap();
        let view = device.menu_view().unwrap();
        assert_eq!(view.title, "Demos");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[1].decoration, Decoration::Checkbox);
        assert_eq!(device.cursor_data(0), Ok(CursorData::None));
        assert_eq!(device.cursor_data(1), Ok(CursorData::Checked(false)));
        assert!(device.thread_view().is_none());
    }

    #[test]
    fn test_thread_view() {
        let mut device = device();
        let id = device.create_thread(Person::new("Ada", 5).unwrap()).unwrap();
        device.open_thread(id).unwrap();
        assert!(device.menu_view().is_none());

        let view = device.thread_view().unwrap();
        assert_eq!(view.thread.name(), "Ada");
        assert_eq!(view.pending, None);
    }

    fn no_data(_: &Device<Unwired>) -> CursorData {
        CursorData::None
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "cursor data"))]
    fn test_checkbox_without_bool() {
        let mut bad = Item::new("Broken", Action::Back).decorated(Decoration::Checkbox);
        bad.cursor = Some(no_data);
        let catalog = Catalog::standard().with_screen(Screen::new(ScreenId::MainMenu, "Main").with(bad));
        let device = Device::with_catalog(
            DeviceConfig::default(),
            &mut StepRng::new(7, 1),
            Unwired,
            catalog,
        );
        assert_eq!(device.cursor_data(0), Err(Error::CursorDataTypeMismatch));
    }
}
