//! Menu catalog and navigation

pub mod catalog;
pub mod decoration;
pub mod navigation;

pub use catalog::{
    label, Action, Catalog, CursorFn, Hook, Item, Label, Screen, ScreenId, SCREEN_COUNT,
};
pub use decoration::{CursorData, Decoration};
pub use navigation::{wrap_step, Direction, Navigator};
