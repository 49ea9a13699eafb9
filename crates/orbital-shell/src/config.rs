//! Shell configuration
//!
//! Every constant shared between the grid math, window clamping and taskbar
//! slot computation lives here. The [`Scene`](crate::Scene) owns exactly one
//! instance and hands it to each engine.

use serde::{Deserialize, Serialize};
use crate::error::{ShellError, ShellResult};
use crate::math::{GridMetrics, Size, Vec2};

/// Desktop icon cell metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IconMetrics {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for IconMetrics {
    fn default() -> Self {
        Self {
            width: 103.0,
            height: 93.0,
            margin: 5.0,
        }
    }
}

impl IconMetrics {
    /// Grid metrics derived from the icon cell
    #[inline]
    pub fn grid(&self) -> GridMetrics {
        GridMetrics::new(self.width, self.height, self.margin)
    }
}

/// Taskbar entry metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskbarMetrics {
    pub entry_width: f32,
    pub gap: f32,
    /// Offset from the pointer to the ghost icon that follows it during a drag
    pub ghost_offset: Vec2,
}

impl Default for TaskbarMetrics {
    fn default() -> Self {
        Self {
            entry_width: 52.0,
            gap: 2.0,
            ghost_offset: Vec2::new(10.0, 20.0),
        }
    }
}

impl TaskbarMetrics {
    /// Horizontal distance between two neighbouring entries
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.entry_width + self.gap
    }
}

/// Bottom panel metrics
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelMetrics {
    pub height: f32,
    /// Extra distance above the panel inside which a window makes the panel float
    pub float_gap: f32,
    /// Width reserved for the clock at the right end of the panel
    pub clock_width: f32,
    /// Size of the launcher menu opened above the launcher button
    pub menu_size: Size,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            height: 44.0,
            float_gap: 7.0,
            clock_width: 100.0,
            menu_size: Size::new(600.0, 500.0),
        }
    }
}

impl PanelMetrics {
    /// Distance from the display bottom that triggers the panel float signal
    #[inline]
    pub fn float_threshold(&self) -> f32 {
        self.height + self.float_gap
    }
}

/// Window placement constants
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowMetrics {
    /// How far below the display a minimized window is parked
    pub minimize_offset: f32,
    pub min_size: Size,
    pub title_bar_height: f32,
}

impl Default for WindowMetrics {
    fn default() -> Self {
        Self {
            minimize_offset: 100.0,
            min_size: Size::new(200.0, 150.0),
            title_bar_height: 30.0,
        }
    }
}

/// Drag activation settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragSettings {
    /// Pointer travel (px, Chebyshev) that must be exceeded before a drag starts
    pub delay: f32,
    /// Press/release window (ms) within which an undragged press counts as a click
    pub click_window_ms: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            delay: 0.0,
            click_window_ms: 200.0,
        }
    }
}

/// Complete shell configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShellConfig {
    pub display: Size,
    pub icon: IconMetrics,
    pub taskbar: TaskbarMetrics,
    pub panel: PanelMetrics,
    pub window: WindowMetrics,
    pub drag: DragSettings,
    pub snap_to_grid: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            display: Size::new(1024.0, 768.0),
            icon: IconMetrics::default(),
            taskbar: TaskbarMetrics::default(),
            panel: PanelMetrics::default(),
            window: WindowMetrics::default(),
            drag: DragSettings::default(),
            snap_to_grid: true,
        }
    }
}

impl ShellConfig {
    /// Parse a (possibly partial) JSON configuration; missing keys keep defaults
    pub fn from_json(json: &str) -> ShellResult<Self> {
        let config: ShellConfig =
            serde_json::from_str(json).map_err(|e| ShellError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the grid and clamping math cannot work with
    pub fn validate(&self) -> ShellResult<()> {
        if self.icon.grid().pitch().x <= 0.0 || self.icon.grid().pitch().y <= 0.0 {
            return Err(ShellError::Config("icon pitch must be positive".to_string()));
        }
        if self.taskbar.pitch() <= 0.0 {
            return Err(ShellError::Config("taskbar pitch must be positive".to_string()));
        }
        if self.drag.delay < 0.0 {
            return Err(ShellError::Config("drag delay must not be negative".to_string()));
        }
        Ok(())
    }

    /// Area available to desktop icons (display minus the bottom panel)
    #[inline]
    pub fn workspace_area(&self) -> Size {
        Size::new(
            self.display.width,
            (self.display.height - self.panel.height).max(0.0),
        )
    }
}
