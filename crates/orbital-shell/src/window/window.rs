//! Window struct and status

use serde::{Deserialize, Serialize};
use crate::math::{Rect, Size, Vec2};
use super::WindowId;

/// Window status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowStatus {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Geometry a window returns to when restored
///
/// Captured once when the window is created and never refreshed, so a
/// restore always brings back the launch geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OriginInfo {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl OriginInfo {
    /// Capture a position and size
    pub fn capture(position: Vec2, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Part of a window under the pointer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WindowRegion {
    TitleBar,
    Content,
}

/// A window on the display
#[derive(Clone, Debug)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    /// Top-left corner in display pixels
    pub position: Vec2,
    /// Window size including the title bar
    pub size: Size,
    /// Z-order (higher = on top)
    pub z: u32,
    pub status: WindowStatus,
    pub origin: OriginInfo,
    pub(crate) title_bar_height: f32,
}

impl Window {
    /// Get the window's bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Get the title bar rectangle
    pub fn title_bar_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            self.title_bar_height.min(self.size.height),
        )
    }

    /// Whether the window receives pointer events
    ///
    /// Minimized windows stay in the collection but are hidden below the
    /// display and ignore the pointer.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.status != WindowStatus::Minimized
    }

    /// Dragging is only allowed in the normal state
    #[inline]
    pub fn can_drag(&self) -> bool {
        self.status == WindowStatus::Normal
    }

    /// Region of the window at a point, if the point is inside it
    pub fn region_at(&self, pos: Vec2) -> Option<WindowRegion> {
        if !self.rect().contains(pos) {
            return None;
        }
        if self.title_bar_rect().contains(pos) {
            Some(WindowRegion::TitleBar)
        } else {
            Some(WindowRegion::Content)
        }
    }
}
