//! Input result type

use serde::Serialize;
use crate::window::WindowId;

/// What a pointer position landed on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerTarget {
    /// A taskbar entry (task index)
    Task { index: usize },
    /// The taskbar background
    Taskbar,
    /// The application launcher button
    Launcher,
    /// The open launcher menu
    Menu,
    /// Any other part of the bottom panel (clock, gaps)
    Panel,
    /// A window title bar
    TitleBar { window_id: WindowId },
    /// A window body
    Window { window_id: WindowId },
    /// A desktop icon
    Icon { index: usize },
    /// Empty workspace
    Workspace,
}

/// Keyboard modifiers held during a pointer event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { ctrl: false, shift: false };
    pub const CTRL: Modifiers = Modifiers { ctrl: true, shift: false };
}

/// Result of input handling
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputResult {
    /// Input was handled internally
    Handled,
    /// Input was not handled (pass through)
    Unhandled,
    /// Input should be forwarded to window content
    Forward {
        /// Target window
        window_id: WindowId,
        /// X coordinate in window-local space
        local_x: f32,
        /// Y coordinate in window-local space
        local_y: f32,
    },
}

impl InputResult {
    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled | InputResult::Forward { .. })
    }
}
