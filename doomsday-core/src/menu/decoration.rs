//! Item decorations
//!
//! The renderer draws a decoration next to an item label. Data-driven
//! decorations (the checkbox) get their state from the item's cursor
//! supplier as a [`CursorData`] value.

/// Marker drawn beside an item label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoration {
    None,
    /// Leads to another screen
    RightArrow,
    /// Leads back
    LeftArrow,
    /// On/off state, needs [`CursorData::Checked`]
    Checkbox,
}

/// State supplied to a decoration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorData {
    None,
    Checked(bool),
}

impl Decoration {
    /// Check if this decoration can draw `data`
    pub fn accepts(self, data: CursorData) -> bool {
        matches!(
            (self, data),
            (Decoration::Checkbox, CursorData::Checked(_))
                | (
                    Decoration::None | Decoration::RightArrow | Decoration::LeftArrow,
                    CursorData::None
                )
        )
    }
}
