//! Panel geometry

use serde::Serialize;
use crate::config::PanelMetrics;
use crate::math::{Rect, Size};

/// Rectangles of the panel parts in display coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PanelLayout {
    pub panel: Rect,
    pub launcher: Rect,
    pub taskbar: Rect,
    pub clock: Rect,
    /// Launcher menu, only hit while open
    pub menu: Rect,
}

impl PanelLayout {
    /// Lay the panel out along the bottom edge of the display
    pub fn compute(display: Size, metrics: &PanelMetrics) -> Self {
        let h = metrics.height;
        let top = display.height - h;
        let clock_width = metrics.clock_width.min(display.width);
        Self {
            panel: Rect::new(0.0, top, display.width, h),
            launcher: Rect::new(0.0, top, h, h),
            taskbar: Rect::new(h, top, (display.width - h - clock_width).max(0.0), h),
            clock: Rect::new(display.width - clock_width, top, clock_width, h),
            menu: Rect::new(0.0, top - metrics.menu_size.height, metrics.menu_size.width, metrics.menu_size.height),
        }
    }
}
