//! Window configuration for creation

use crate::math::{Size, Vec2};

/// Configuration for creating a window
#[derive(Clone, Debug, Default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Icon path shown in the title bar and taskbar
    pub icon: String,
    /// Initial position (None = auto-cascade)
    pub position: Option<Vec2>,
    /// Initial size
    pub size: Size,
}

impl WindowConfig {
    /// Create a config with a title, icon and size
    pub fn new(title: &str, icon: &str, size: Size) -> Self {
        Self {
            title: title.to_string(),
            icon: icon.to_string(),
            position: None,
            size,
        }
    }

    /// Set an explicit initial position
    pub fn at(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }
}
