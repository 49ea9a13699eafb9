//! Taskbar entry

use serde::Serialize;
use crate::window::WindowId;

/// A taskbar entry, either a running window or a pinned launcher
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub is_window: bool,
    pub window_id: Option<WindowId>,
    pub active: bool,
    pub tooltip_visible: bool,
    /// Slot on the taskbar
    pub ordinal: usize,
}

impl Task {
    /// Pinned entry with no window
    pub fn pinned(title: &str, description: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            is_window: false,
            window_id: None,
            active: false,
            tooltip_visible: false,
            ordinal: 0,
        }
    }

    /// Entry for a running window
    pub fn for_window(title: &str, description: &str, icon: &str, window_id: WindowId) -> Self {
        Self {
            is_window: true,
            window_id: Some(window_id),
            ..Self::pinned(title, description, icon)
        }
    }

    /// Description tooltips are only shown for entries without a window
    #[inline]
    pub fn shows_tooltip(&self) -> bool {
        self.tooltip_visible && !self.is_window
    }
}
