//! Window manager for lifecycle, status, clamping, focus and z-order

use std::collections::HashMap;
use log::{debug, warn};
use crate::config::{ShellConfig, WindowMetrics};
use crate::error::{ShellError, ShellResult};
use crate::math::{Size, Vec2};
use super::{OriginInfo, Window, WindowConfig, WindowId, WindowRegion, WindowStatus};

/// Window manager handling window lifecycle, status, z-order and focus
#[derive(Clone, Debug)]
pub struct WindowManager {
    /// All windows by ID
    windows: HashMap<WindowId, Window>,
    /// Focus stack (most recently focused at end)
    focus_stack: Vec<WindowId>,
    /// Next window ID
    next_id: u64,
    /// Next z-order value
    next_z: u32,
    display: Size,
    metrics: WindowMetrics,
    /// Bottom distance under which a window makes the panel float
    float_threshold: f32,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}

impl WindowManager {
    /// Create a new window manager for a display
    pub fn new(display: Size, metrics: WindowMetrics, float_threshold: f32) -> Self {
        Self {
            windows: HashMap::new(),
            focus_stack: Vec::new(),
            next_id: 1,
            next_z: 1,
            display,
            metrics,
            float_threshold,
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.display, config.window, config.panel.float_threshold())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Create a new window; it is raised and its geometry becomes the restore origin
    pub fn create(&mut self, config: WindowConfig) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;

        let z = self.next_z;
        self.next_z += 1;

        // Default position if not specified
        let position = config.position.unwrap_or_else(|| {
            let offset = (id % 10) as f32 * 30.0;
            Vec2::new(80.0 + offset, 35.0 + offset)
        });
        let size = config.size.clamp(self.metrics.min_size, self.display);
        let position = self.clamp_position(position, size);

        let window = Window {
            id,
            title: config.title,
            icon: config.icon,
            position,
            size,
            z,
            status: WindowStatus::Normal,
            origin: OriginInfo::capture(position, size),
            title_bar_height: self.metrics.title_bar_height,
        };
        debug!("window {} '{}' created at {:?}", id, window.title, position);

        self.windows.insert(id, window);
        self.focus_stack.push(id);

        id
    }

    /// Close a window
    pub fn close(&mut self, id: WindowId) -> ShellResult<Window> {
        let window = self.windows.remove(&id).ok_or_else(|| invalid(id))?;
        self.focus_stack.retain(|&wid| wid != id);
        debug!("window {} closed", id);
        Ok(window)
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    /// Get a mutable window by ID
    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Get the number of windows
    pub fn count(&self) -> usize {
        self.windows.len()
    }

    /// Get windows sorted by z-order (back to front)
    pub fn windows_by_z(&self) -> Vec<&Window> {
        let mut windows: Vec<&Window> = self.windows.values().collect();
        windows.sort_by_key(|w| w.z);
        windows
    }

    #[inline]
    pub fn display(&self) -> Size {
        self.display
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Focus a window (brings to top)
    pub fn focus(&mut self, id: WindowId) -> ShellResult<()> {
        let window = self.windows.get_mut(&id).ok_or_else(|| invalid(id))?;
        window.z = self.next_z;
        self.next_z += 1;

        self.focus_stack.retain(|&wid| wid != id);
        self.focus_stack.push(id);
        Ok(())
    }

    /// Get the currently focused window ID
    pub fn focused(&self) -> Option<WindowId> {
        self.focus_stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.windows.get(id).is_some_and(Window::is_interactive))
    }

    // =========================================================================
    // Status state machine
    // =========================================================================

    /// Fill the display
    pub fn maximize(&mut self, id: WindowId) -> ShellResult<()> {
        let display = self.display;
        let window = self.window_mut(id)?;
        window.status = WindowStatus::Maximized;
        window.position = Vec2::ZERO;
        window.size = display;
        debug!("window {} maximized", id);
        Ok(())
    }

    /// Park the window below the display; its size is kept
    pub fn minimize(&mut self, id: WindowId) -> ShellResult<()> {
        let parked_y = self.display.height + self.metrics.minimize_offset;
        let window = self.window_mut(id)?;
        window.status = WindowStatus::Minimized;
        window.position = Vec2::new(0.0, parked_y);
        debug!("window {} minimized", id);
        Ok(())
    }

    /// Return to normal status with the origin geometry
    pub fn restore(&mut self, id: WindowId) -> ShellResult<()> {
        let window = self.window_mut(id)?;
        window.status = WindowStatus::Normal;
        window.position = window.origin.position();
        window.size = window.origin.size();
        debug!("window {} restored to {:?}", id, window.origin);
        Ok(())
    }

    /// Title bar double-click: maximized windows restore, others maximize
    pub fn toggle_maximize(&mut self, id: WindowId) -> ShellResult<()> {
        match self.window(id)?.status {
            WindowStatus::Maximized => self.restore(id),
            _ => self.maximize(id),
        }
    }

    /// Taskbar entry click for a window
    ///
    /// Minimized windows are restored and raised, the focused normal window
    /// is minimized, anything else is raised.
    pub fn click_task_icon(&mut self, id: WindowId) -> ShellResult<()> {
        let status = self.window(id)?.status;
        match status {
            WindowStatus::Minimized => {
                self.restore(id)?;
                self.focus(id)
            }
            WindowStatus::Normal if self.focused() == Some(id) => self.minimize(id),
            _ => self.focus(id),
        }
    }

    // =========================================================================
    // Positioning
    // =========================================================================

    /// Move a window, clamped to the display
    ///
    /// Returns whether the bottom panel should float above the window, which
    /// is the case when the clamped bottom edge is within the float threshold
    /// of the display bottom.
    pub fn reposition(&mut self, id: WindowId, candidate: Vec2) -> ShellResult<bool> {
        let size = self.window(id)?.size;
        let position = self.clamp_position(candidate, size);

        let window = self.window_mut(id)?;
        window.position = position;
        Ok(self.floats_panel(id))
    }

    /// Whether a normal window's bottom edge is within the float threshold of
    /// the display bottom; closed, maximized and minimized windows never float
    /// the panel
    pub fn floats_panel(&self, id: WindowId) -> bool {
        self.windows.get(&id).is_some_and(|w| {
            w.status == WindowStatus::Normal
                && self.display.height - w.rect().bottom() < self.float_threshold
        })
    }

    /// Resize a normal window within the minimum size and the display
    pub fn set_size(&mut self, id: WindowId, size: Size) -> ShellResult<()> {
        if self.window(id)?.status != WindowStatus::Normal {
            return Ok(());
        }
        let size = size.clamp(self.metrics.min_size, self.display);
        let position = self.clamp_position(self.window(id)?.position, size);

        let window = self.window_mut(id)?;
        window.size = size;
        window.position = position;
        Ok(())
    }

    /// Adopt a new display size
    pub fn set_display(&mut self, display: Size) {
        self.display = display;
        let parked_y = display.height + self.metrics.minimize_offset;
        let ids: Vec<WindowId> = self.windows.keys().copied().collect();
        for id in ids {
            let Some(window) = self.windows.get(&id) else { continue };
            let (status, position, size) = (window.status, window.position, window.size);
            let position = match status {
                WindowStatus::Normal => self.clamp_position(position, size),
                WindowStatus::Maximized => Vec2::ZERO,
                WindowStatus::Minimized => Vec2::new(0.0, parked_y),
            };
            if let Some(window) = self.windows.get_mut(&id) {
                window.position = position;
                if status == WindowStatus::Maximized {
                    window.size = display;
                }
            }
        }
    }

    /// Clamp a candidate position so the window stays inside the display
    ///
    /// A window larger than the display is pinned to the right/bottom edge
    /// and overflows to the left/top.
    pub fn clamp_position(&self, candidate: Vec2, size: Size) -> Vec2 {
        let mut x = candidate.x;
        let mut y = candidate.y;
        if x < 0.0 {
            x = 0.0;
        } else if x + size.width > self.display.width {
            x = self.display.width - size.width;
        }
        if y < 0.0 {
            y = 0.0;
        } else if y + size.height > self.display.height {
            y = self.display.height - size.height;
        }
        Vec2::new(x, y)
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    /// Find the topmost interactive window at a position
    pub fn window_at(&self, pos: Vec2) -> Option<WindowId> {
        self.region_at(pos).map(|(id, _)| id)
    }

    /// Topmost window whose title bar is under the position
    pub fn title_bar_at(&self, pos: Vec2) -> Option<WindowId> {
        match self.region_at(pos) {
            Some((id, WindowRegion::TitleBar)) => Some(id),
            _ => None,
        }
    }

    /// Find which region of which window is at a position
    pub fn region_at(&self, pos: Vec2) -> Option<(WindowId, WindowRegion)> {
        let mut windows: Vec<&Window> = self
            .windows
            .values()
            .filter(|w| w.is_interactive())
            .collect();
        windows.sort_by_key(|w| std::cmp::Reverse(w.z));

        windows
            .into_iter()
            .find_map(|w| w.region_at(pos).map(|region| (w.id, region)))
    }

    fn window(&self, id: WindowId) -> ShellResult<&Window> {
        self.windows.get(&id).ok_or_else(|| invalid(id))
    }

    fn window_mut(&mut self, id: WindowId) -> ShellResult<&mut Window> {
        self.windows.get_mut(&id).ok_or_else(|| invalid(id))
    }
}

fn invalid(id: WindowId) -> ShellError {
    warn!("no window with id {}", id);
    ShellError::InvalidWindow(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> WindowManager {
        WindowManager::new(Size::new(1024.0, 768.0), WindowMetrics::default(), 51.0)
    }

    fn create_at(wm: &mut WindowManager, x: f32, y: f32, w: f32, h: f32) -> WindowId {
        wm.create(WindowConfig::new("Test", "/icons/test.svg", Size::new(w, h)).at(Vec2::new(x, y)))
    }

    #[test]
    fn test_window_creation() {
        let mut wm = manager();
        let id = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);

        let window = wm.get(id).unwrap();
        assert_eq!(window.status, WindowStatus::Normal);
        assert_eq!(window.origin, OriginInfo::capture(Vec2::new(100.0, 100.0), Size::new(400.0, 300.0)));
        assert_eq!(wm.count(), 1);
    }

    #[test]
    fn test_create_cascades_and_clamps() {
        let mut wm = manager();
        let a = wm.create(WindowConfig::new("A", "", Size::new(400.0, 300.0)));
        let b = wm.create(WindowConfig::new("B", "", Size::new(400.0, 300.0)));
        assert_eq!(wm.get(a).unwrap().position, Vec2::new(110.0, 65.0));
        assert_eq!(wm.get(b).unwrap().position, Vec2::new(140.0, 95.0));

        let c = create_at(&mut wm, 900.0, 700.0, 400.0, 300.0);
        assert_eq!(wm.get(c).unwrap().position, Vec2::new(624.0, 468.0));
    }

    #[test]
    fn test_window_focus() {
        let mut wm = manager();
        let id1 = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);
        let id2 = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);

        assert_eq!(wm.focused(), Some(id2));

        wm.focus(id1).unwrap();
        assert_eq!(wm.focused(), Some(id1));
        assert!(wm.get(id1).unwrap().z > wm.get(id2).unwrap().z);
        assert_eq!(wm.windows_by_z().last().map(|w| w.id), Some(id1));
    }

    #[test]
    fn test_window_close() {
        let mut wm = manager();
        let id = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);

        wm.close(id).unwrap();
        assert_eq!(wm.count(), 0);
        assert!(wm.get(id).is_none());
        assert_eq!(wm.close(id).unwrap_err(), ShellError::InvalidWindow(id));
    }

    #[test]
    fn test_maximize_restore_fidelity() {
        let mut wm = manager();
        let id = create_at(&mut wm, 80.0, 35.0, 931.0, 675.0);

        wm.maximize(id).unwrap();
        let window = wm.get(id).unwrap();
        assert_eq!(window.status, WindowStatus::Maximized);
        assert_eq!(window.position, Vec2::ZERO);
        assert_eq!(window.size, Size::new(1024.0, 768.0));

        wm.toggle_maximize(id).unwrap();
        let window = wm.get(id).unwrap();
        assert_eq!(window.status, WindowStatus::Normal);
        assert_eq!(window.position, Vec2::new(80.0, 35.0));
        assert_eq!(window.size, Size::new(931.0, 675.0));
    }

    #[test]
    fn test_restore_ignores_later_moves() {
        let mut wm = manager();
        let id = create_at(&mut wm, 10.0, 10.0, 400.0, 300.0);
        wm.reposition(id, Vec2::new(300.0, 200.0)).unwrap();
        wm.toggle_maximize(id).unwrap();
        wm.toggle_maximize(id).unwrap();
        assert_eq!(wm.get(id).unwrap().position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_minimize_parks_below_display() {
        let mut wm = manager();
        let id = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);

        wm.minimize(id).unwrap();
        let window = wm.get(id).unwrap();
        assert_eq!(window.status, WindowStatus::Minimized);
        assert!((window.position.y - 868.0).abs() < 0.001);
        assert_eq!(window.size, Size::new(400.0, 300.0));
        assert_eq!(wm.focused(), None);
    }

    #[test]
    fn test_click_task_icon_cycle() {
        let mut wm = manager();
        let a = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);
        let b = create_at(&mut wm, 200.0, 200.0, 400.0, 300.0);

        // a is normal but not focused: raise
        wm.click_task_icon(a).unwrap();
        assert_eq!(wm.focused(), Some(a));

        // a is focused: minimize
        wm.click_task_icon(a).unwrap();
        assert_eq!(wm.get(a).unwrap().status, WindowStatus::Minimized);
        assert_eq!(wm.focused(), Some(b));

        // a is minimized: restore and raise
        wm.click_task_icon(a).unwrap();
        let window = wm.get(a).unwrap();
        assert_eq!(window.status, WindowStatus::Normal);
        assert_eq!(window.position, Vec2::new(100.0, 100.0));
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn test_reposition_clamps_all_edges() {
        let mut wm = manager();
        let id = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);

        wm.reposition(id, Vec2::new(-50.0, -20.0)).unwrap();
        assert_eq!(wm.get(id).unwrap().position, Vec2::ZERO);

        wm.reposition(id, Vec2::new(900.0, 600.0)).unwrap();
        assert_eq!(wm.get(id).unwrap().position, Vec2::new(624.0, 468.0));
    }

    #[test]
    fn test_reposition_panel_float_signal() {
        let mut wm = manager();
        let id = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);

        // Bottom at 700: 68px from the display bottom
        assert!(!wm.reposition(id, Vec2::new(0.0, 400.0)).unwrap());
        // Bottom at 720: 48px from the display bottom
        assert!(wm.reposition(id, Vec2::new(0.0, 420.0)).unwrap());
        // Exactly at the threshold does not float
        assert!(!wm.reposition(id, Vec2::new(0.0, 417.0)).unwrap());
    }

    #[test]
    fn test_floats_panel_only_while_normal() {
        let mut wm = manager();
        let id = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);
        assert!(wm.reposition(id, Vec2::new(0.0, 468.0)).unwrap());
        assert!(wm.floats_panel(id));

        wm.minimize(id).unwrap();
        assert!(!wm.floats_panel(id));
        wm.maximize(id).unwrap();
        assert!(!wm.floats_panel(id));

        wm.close(id).unwrap();
        assert!(!wm.floats_panel(id));
    }

    #[test]
    fn test_set_size_only_when_normal() {
        let mut wm = manager();
        let id = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);

        wm.set_size(id, Size::new(50.0, 2000.0)).unwrap();
        assert_eq!(wm.get(id).unwrap().size, Size::new(200.0, 768.0));

        wm.maximize(id).unwrap();
        wm.set_size(id, Size::new(300.0, 300.0)).unwrap();
        assert_eq!(wm.get(id).unwrap().size, Size::new(1024.0, 768.0));
    }

    #[test]
    fn test_set_display_reclamps() {
        let mut wm = manager();
        let a = create_at(&mut wm, 600.0, 400.0, 400.0, 300.0);
        let b = create_at(&mut wm, 0.0, 0.0, 400.0, 300.0);
        wm.maximize(b).unwrap();

        wm.set_display(Size::new(800.0, 600.0));
        assert_eq!(wm.get(a).unwrap().position, Vec2::new(400.0, 300.0));
        assert_eq!(wm.get(b).unwrap().size, Size::new(800.0, 600.0));
    }

    #[test]
    fn test_hit_testing() {
        let mut wm = manager();
        let id = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);

        assert_eq!(wm.title_bar_at(Vec2::new(200.0, 115.0)), Some(id));
        assert_eq!(wm.window_at(Vec2::new(300.0, 300.0)), Some(id));
        assert_eq!(wm.title_bar_at(Vec2::new(300.0, 300.0)), None);
        assert!(wm.window_at(Vec2::new(50.0, 50.0)).is_none());

        wm.minimize(id).unwrap();
        assert!(wm.window_at(Vec2::new(300.0, 300.0)).is_none());
    }

    #[test]
    fn test_hit_testing_prefers_topmost() {
        let mut wm = manager();
        let a = create_at(&mut wm, 100.0, 100.0, 400.0, 300.0);
        let b = create_at(&mut wm, 150.0, 150.0, 400.0, 300.0);

        assert_eq!(wm.window_at(Vec2::new(200.0, 200.0)), Some(b));
        wm.focus(a).unwrap();
        assert_eq!(wm.window_at(Vec2::new(200.0, 200.0)), Some(a));
    }

    #[test]
    fn test_invalid_window() {
        let mut wm = manager();
        assert_eq!(wm.maximize(42), Err(ShellError::InvalidWindow(42)));
        assert_eq!(wm.reposition(42, Vec2::ZERO), Err(ShellError::InvalidWindow(42)));
    }
}
