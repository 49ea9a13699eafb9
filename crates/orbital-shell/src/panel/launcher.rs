//! Application launcher button state

use log::debug;
use crate::math::{Rect, Vec2};

/// Open/closed state of the launcher menu
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Launcher {
    open: bool,
    tooltip_visible: bool,
}

impl Launcher {
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn tooltip_visible(&self) -> bool {
        self.tooltip_visible
    }

    pub fn set_tooltip_visible(&mut self, visible: bool) {
        self.tooltip_visible = visible;
    }

    /// Button click; hides the tooltip
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.tooltip_visible = false;
        debug!("launcher {}", if self.open { "opened" } else { "closed" });
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Close when a press lands outside both the menu and its button
    ///
    /// Returns whether the menu was closed.
    pub fn close_on_outside_press(&mut self, pos: Vec2, menu: Rect, button: Rect) -> bool {
        if self.open && !menu.contains(pos) && !button.contains(pos) {
            self.close();
            return true;
        }
        false
    }
}
