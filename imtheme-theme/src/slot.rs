//! Slot classification.
//!
//! A few slots paint the large background areas of a window. They are kept
//! opaque and close to the variant's brightness, so the sampling policy treats
//! them as a separate class.

/// Slots that paint large background surfaces.
pub const SURFACE_SLOTS: [&str; 4] = [
    "ImGuiCol_WindowBg",
    "ImGuiCol_ChildBg",
    "ImGuiCol_PopupBg",
    "ImGuiCol_MenuBarBg",
];

/// The policy class of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotClass {
    /// Window, child, popup or menu-bar background.
    Surface,
    /// Any other color slot.
    Ordinary,
}

impl SlotClass {
    /// Classify a slot by name.
    pub fn of(slot: &str) -> Self {
        if SURFACE_SLOTS.contains(&slot) {
            SlotClass::Surface
        } else {
            SlotClass::Ordinary
        }
    }

    /// Returns `true` for surface slots.
    pub fn is_surface(self) -> bool {
        matches!(self, SlotClass::Surface)
    }
}
