//! Hit testing and pointer routing
//!
//! Presses are routed by [`Scene::hit_test`] in priority order: taskbar,
//! launcher, open launcher menu, windows (topmost first), the rest of the
//! panel, icons, empty workspace. The surface that receives the press owns
//! the gesture until release or teardown.

use log::{debug, trace, warn};
use crate::input::{DragEvent, InputResult, Modifiers, PointerTarget};
use crate::math::{Rect, Vec2};
use crate::window::{Window, WindowId, WindowRegion};
use super::{Gesture, Scene};

impl Scene {
    /// What is under a display position
    pub fn hit_test(&self, pos: Vec2) -> PointerTarget {
        let layout = &self.layout;
        if layout.taskbar.contains(pos) {
            return self
                .task_at(pos)
                .map_or(PointerTarget::Taskbar, |index| PointerTarget::Task { index });
        }
        if layout.launcher.contains(pos) {
            return PointerTarget::Launcher;
        }
        if self.launcher.is_open() && layout.menu.contains(pos) {
            return PointerTarget::Menu;
        }
        if let Some((window_id, region)) = self.windows.region_at(pos) {
            return match region {
                WindowRegion::TitleBar => PointerTarget::TitleBar { window_id },
                WindowRegion::Content => PointerTarget::Window { window_id },
            };
        }
        if layout.panel.contains(pos) {
            return PointerTarget::Panel;
        }
        match self.icons.get_clicked(pos) {
            Some(index) => PointerTarget::Icon { index },
            None => PointerTarget::Workspace,
        }
    }

    /// Task whose entry is under a display position
    fn task_at(&self, pos: Vec2) -> Option<usize> {
        let bar = self.layout.taskbar;
        let metrics = self.tasks.metrics();
        let local_x = pos.x - bar.x;
        if local_x < 0.0 {
            return None;
        }
        let slot = (local_x / metrics.pitch()).floor();
        if local_x - slot * metrics.pitch() >= metrics.entry_width {
            return None;
        }
        self.tasks.index_at_ordinal(slot as usize)
    }

    // =========================================================================
    // Pointer down
    // =========================================================================

    /// Handle pointer down
    pub fn pointer_down(&mut self, pos: Vec2, modifiers: Modifiers, now_ms: f64) -> InputResult {
        if self.gesture.is_some() {
            trace!("press during a gesture; cancelling it");
            self.cancel_gesture();
        }
        if self.launcher.close_on_outside_press(pos, self.layout.menu, self.layout.launcher) {
            debug!("launcher closed by outside press");
        }

        match self.hit_test(pos) {
            PointerTarget::Task { index } => self.press_task(index, pos, now_ms),
            PointerTarget::Launcher => {
                self.launcher.toggle();
                InputResult::Handled
            }
            PointerTarget::Taskbar | PointerTarget::Menu | PointerTarget::Panel => InputResult::Handled,
            PointerTarget::TitleBar { window_id } => self.press_title_bar(window_id, pos),
            PointerTarget::Window { window_id } => self.press_window_content(window_id, pos),
            PointerTarget::Icon { index } => self.press_icon(index, pos, modifiers),
            PointerTarget::Workspace => self.press_workspace(pos),
        }
    }

    fn press_task(&mut self, index: usize, pos: Vec2, now_ms: f64) -> InputResult {
        if self.task_drag.pointer_down(pos) == DragEvent::Ignored {
            return InputResult::Unhandled;
        }
        self.task_grab.start_drag(Vec2::ZERO, index);
        if let Err(e) = self.tasks.set_active(index, true) {
            warn!("task press: {}", e);
        }
        self.gesture = Some(Gesture::Task {
            pressed_at: now_ms,
            ghost: None,
        });
        InputResult::Handled
    }

    /// Title bar press raises the window and arms a move
    fn press_title_bar(&mut self, id: WindowId, pos: Vec2) -> InputResult {
        if let Err(e) = self.windows.focus(id) {
            warn!("title bar press: {}", e);
            return InputResult::Unhandled;
        }
        let origin = match self.windows.get(id) {
            Some(window) => window.position,
            None => return InputResult::Unhandled,
        };
        if self.window_drag.pointer_down(pos) != DragEvent::Ignored {
            self.window_grab.start_drag(pos - origin, id);
            self.gesture = Some(Gesture::Window);
        }
        InputResult::Handled
    }

    /// Content press raises the window and forwards the event to it
    fn press_window_content(&mut self, id: WindowId, pos: Vec2) -> InputResult {
        if let Err(e) = self.windows.focus(id) {
            warn!("window press: {}", e);
            return InputResult::Unhandled;
        }
        let local = match self.windows.get(id) {
            Some(window) => window.rect().to_local(pos),
            None => return InputResult::Unhandled,
        };
        InputResult::Forward {
            window_id: id,
            local_x: local.x,
            local_y: local.y,
        }
    }

    /// Icon press: ctrl toggles the icon into the selection, a plain press on
    /// an unselected icon selects it alone
    fn press_icon(&mut self, index: usize, pos: Vec2, modifiers: Modifiers) -> InputResult {
        let icon_pos = match self.icons.get(index) {
            Some(icon) => icon.pos,
            None => return InputResult::Unhandled,
        };
        if self.icon_drag.pointer_down(pos) == DragEvent::Ignored {
            return InputResult::Unhandled;
        }

        let result = if modifiers.ctrl {
            self.icons.toggle(index).map(|_| ())
        } else if self.icons.get(index).is_some_and(|icon| !icon.selected) {
            self.icons.clicked_selection(index)
        } else {
            Ok(())
        };
        if let Err(e) = result {
            warn!("icon press: {}", e);
        }

        self.icon_grab.start_drag(pos - icon_pos, index);
        self.gesture = Some(Gesture::Icons {
            toggled: modifiers.ctrl,
            last_delta: Vec2::ZERO,
        });
        InputResult::Handled
    }

    /// Empty workspace press clears the selection and arms a rubber band
    fn press_workspace(&mut self, pos: Vec2) -> InputResult {
        self.icons.cancel_select();
        if self.icon_drag.pointer_down(pos) != DragEvent::Ignored {
            self.gesture = Some(Gesture::RubberBand { from: pos, to: pos });
        }
        InputResult::Handled
    }

    // =========================================================================
    // Pointer move
    // =========================================================================

    /// Handle pointer move; without a gesture this is a hover
    pub fn pointer_move(&mut self, pos: Vec2) -> InputResult {
        let gesture = match self.gesture {
            Some(gesture) => gesture,
            None => {
                self.hover(pos);
                return InputResult::Unhandled;
            }
        };

        match gesture {
            Gesture::Icons { toggled, last_delta } => {
                // Controller deltas are cumulative; icons move incrementally
                if let Some(delta) = self.icon_drag.pointer_move(pos, &true).delta() {
                    self.icons.drag(delta - last_delta);
                    self.gesture = Some(Gesture::Icons {
                        toggled,
                        last_delta: delta,
                    });
                }
            }
            Gesture::RubberBand { from, .. } => {
                if self.icon_drag.pointer_move(pos, &true).delta().is_some() {
                    self.icons.select_in_rect(Rect::from_corners(from, pos));
                    self.gesture = Some(Gesture::RubberBand { from, to: pos });
                }
            }
            Gesture::Window => self.move_window(pos),
            Gesture::Task { pressed_at, .. } => self.move_task(pos, pressed_at),
        }
        InputResult::Handled
    }

    fn move_window(&mut self, pos: Vec2) {
        let Some(id) = self.window_grab.owner() else { return };

        let windows = &self.windows;
        let allow = || windows.get(id).is_some_and(Window::can_drag);
        if self.window_drag.pointer_move(pos, &allow).delta().is_none() {
            return;
        }

        match self.windows.reposition(id, self.window_grab.follow(pos)) {
            Ok(_) => self.float_window = Some(id),
            Err(e) => {
                warn!("window drag: {}", e);
                self.cancel_gesture();
            }
        }
    }

    /// Ghost icon follows the pointer; entries reorder while it is over the taskbar
    fn move_task(&mut self, pos: Vec2, pressed_at: f64) {
        let Some(index) = self.task_grab.owner() else { return };
        if self.task_drag.pointer_move(pos, &true).delta().is_none() {
            return;
        }

        let ghost = pos + self.config.taskbar.ghost_offset;
        self.gesture = Some(Gesture::Task {
            pressed_at,
            ghost: Some(ghost),
        });

        let bar = self.layout.taskbar;
        if !bar.contains(ghost) {
            return;
        }
        if let Some(slot) = self.tasks.slot_at(ghost.x - bar.x) {
            if let Err(e) = self.tasks.make_to_position(index, slot) {
                warn!("task reorder: {}", e);
            }
        }
    }

    fn hover(&mut self, pos: Vec2) {
        let task = if self.layout.taskbar.contains(pos) {
            self.task_at(pos)
        } else {
            None
        };
        self.tasks.set_hovered(task);
        self.launcher.set_tooltip_visible(self.layout.launcher.contains(pos));
        self.clock.set_tooltip_visible(self.layout.clock.contains(pos));
    }

    // =========================================================================
    // Pointer up
    // =========================================================================

    /// Handle pointer up; always returns every surface to idle
    pub fn pointer_up(&mut self, now_ms: f64) -> InputResult {
        let Some(gesture) = self.gesture.take() else {
            trace!("pointer up without a gesture");
            return InputResult::Unhandled;
        };

        match gesture {
            Gesture::Icons { toggled, .. } => {
                let event = self.icon_drag.pointer_up();
                let pressed = self.icon_grab.owner();
                self.icon_grab.stop_drag();
                self.release_icons(event, pressed, toggled);
            }
            Gesture::RubberBand { .. } => {
                self.icon_drag.pointer_up();
            }
            Gesture::Window => {
                self.window_drag.pointer_up();
                self.window_grab.stop_drag();
            }
            Gesture::Task { pressed_at, .. } => self.release_task(pressed_at, now_ms),
        }
        InputResult::Handled
    }

    fn release_icons(&mut self, event: DragEvent, pressed: Option<usize>, toggled: bool) {
        if event == (DragEvent::Released { dragged: true }) {
            if let Err(e) = self.icons.drop() {
                warn!("icon drop: {}", e);
                self.icons.revert_drag();
            }
            return;
        }
        // A plain click selects the icon alone
        if let (Some(index), false) = (pressed, toggled) {
            if let Err(e) = self.icons.clicked_selection(index) {
                warn!("icon click: {}", e);
            }
        }
    }

    /// A quick release without a drag is a click on the entry; afterwards
    /// only window entries stay active
    fn release_task(&mut self, pressed_at: f64, now_ms: f64) {
        let event = self.task_drag.pointer_up();
        let Some(index) = self.task_grab.owner() else { return };
        self.task_grab.stop_drag();

        let dragged = event == (DragEvent::Released { dragged: true });
        if !dragged && now_ms - pressed_at < self.config.drag.click_window_ms {
            if let Err(e) = self.click_task(index) {
                warn!("task click: {}", e);
            }
        }

        let is_window = self.tasks.get(index).is_some_and(|t| t.is_window);
        if let Err(e) = self.tasks.set_active(index, is_window) {
            warn!("task release: {}", e);
        }
    }

    // =========================================================================
    // Double click
    // =========================================================================

    /// Title bar double-click toggles maximize/restore
    pub fn double_click(&mut self, pos: Vec2) -> InputResult {
        match self.hit_test(pos) {
            PointerTarget::TitleBar { window_id } => match self.windows.toggle_maximize(window_id) {
                Ok(()) => InputResult::Handled,
                Err(e) => {
                    warn!("double click: {}", e);
                    InputResult::Unhandled
                }
            },
            _ => InputResult::Unhandled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Size;
    use crate::scene::{AppInfo, Surface};
    use crate::window::WindowStatus;

    fn app(title: &str, x: f32, y: f32) -> AppInfo {
        AppInfo {
            title: title.to_string(),
            description: String::new(),
            icon: format!("/icons/apps/{}.svg", title),
            size: Size::new(400.0, 300.0),
            position: Some(Vec2::new(x, y)),
        }
    }

    #[test]
    fn test_hit_test_priority() {
        let mut scene = Scene::default();
        scene.add_icon("Home", "/h.svg").unwrap();
        let id = scene.launch(&app("kate", 0.0, 0.0));

        assert_eq!(scene.hit_test(Vec2::new(50.0, 740.0)), PointerTarget::Task { index: 0 });
        assert_eq!(scene.hit_test(Vec2::new(20.0, 740.0)), PointerTarget::Launcher);
        assert_eq!(scene.hit_test(Vec2::new(980.0, 740.0)), PointerTarget::Panel);
        // Window covers the icon
        assert_eq!(scene.hit_test(Vec2::new(50.0, 10.0)), PointerTarget::TitleBar { window_id: id });
        assert_eq!(scene.hit_test(Vec2::new(50.0, 50.0)), PointerTarget::Window { window_id: id });
        assert_eq!(scene.hit_test(Vec2::new(500.0, 500.0)), PointerTarget::Workspace);

        scene.windows.minimize(id).unwrap();
        assert_eq!(scene.hit_test(Vec2::new(50.0, 50.0)), PointerTarget::Icon { index: 0 });
    }

    #[test]
    fn test_task_gap_hits_taskbar() {
        let mut scene = Scene::default();
        scene.pin_task("a", "", "/a.svg");
        scene.pin_task("b", "", "/b.svg");
        // Entry 0 spans 44..96, the gap 96..98
        assert_eq!(scene.hit_test(Vec2::new(97.0, 740.0)), PointerTarget::Taskbar);
        assert_eq!(scene.hit_test(Vec2::new(99.0, 740.0)), PointerTarget::Task { index: 1 });
    }

    #[test]
    fn test_content_press_forwards_local_coordinates() {
        let mut scene = Scene::default();
        let id = scene.launch(&app("kate", 100.0, 100.0));
        let result = scene.pointer_down(Vec2::new(150.0, 200.0), Modifiers::NONE, 0.0);
        assert_eq!(
            result,
            InputResult::Forward {
                window_id: id,
                local_x: 50.0,
                local_y: 100.0
            }
        );
        assert!(!scene.is_capturing());
    }

    #[test]
    fn test_pointer_up_without_gesture_is_unhandled() {
        let mut scene = Scene::default();
        assert_eq!(scene.pointer_up(0.0), InputResult::Unhandled);
    }

    #[test]
    fn test_unmounted_surface_ignores_press() {
        let mut scene = Scene::default();
        scene.add_icon("Home", "/h.svg").unwrap();
        scene.unmount(Surface::Workspace);

        assert_eq!(scene.pointer_down(Vec2::new(10.0, 10.0), Modifiers::NONE, 0.0), InputResult::Unhandled);
        assert!(!scene.is_capturing());

        scene.mount(Surface::Workspace);
        assert!(scene.pointer_down(Vec2::new(10.0, 10.0), Modifiers::NONE, 0.0).is_handled());
        assert!(scene.is_capturing());
    }

    #[test]
    fn test_unmount_mid_gesture_returns_to_idle() {
        let mut scene = Scene::default();
        scene.add_icon("Home", "/h.svg").unwrap();
        scene.pointer_down(Vec2::new(10.0, 10.0), Modifiers::NONE, 0.0);
        scene.pointer_move(Vec2::new(300.0, 300.0));

        scene.unmount(Surface::Workspace);
        assert!(!scene.is_capturing());
        assert_eq!(scene.icons().icons()[0].pos, Vec2::ZERO);
    }

    #[test]
    fn test_maximized_window_does_not_drag() {
        let mut scene = Scene::default();
        let id = scene.launch(&app("kate", 100.0, 100.0));
        assert!(scene.double_click(Vec2::new(150.0, 110.0)).is_handled());
        assert_eq!(scene.windows().get(id).unwrap().status, WindowStatus::Maximized);

        scene.pointer_down(Vec2::new(500.0, 10.0), Modifiers::NONE, 0.0);
        scene.pointer_move(Vec2::new(600.0, 200.0));
        assert_eq!(scene.windows().get(id).unwrap().position, Vec2::ZERO);
        scene.pointer_up(10.0);
        assert!(!scene.is_capturing());
    }

    #[test]
    fn test_hover_tooltips() {
        let mut scene = Scene::default();
        scene.pin_task("kate", "Advanced Text Editor", "/k.svg");

        scene.pointer_move(Vec2::new(50.0, 740.0));
        assert!(scene.tasks().get(0).unwrap().shows_tooltip());

        scene.pointer_move(Vec2::new(20.0, 740.0));
        assert!(!scene.tasks().get(0).unwrap().tooltip_visible);
        assert!(scene.launcher().tooltip_visible());

        scene.pointer_move(Vec2::new(1000.0, 740.0));
        assert!(scene.clock.tooltip_visible());
    }

    #[test]
    fn test_launcher_toggle_and_outside_close() {
        let mut scene = Scene::default();
        scene.pointer_down(Vec2::new(20.0, 740.0), Modifiers::NONE, 0.0);
        assert!(scene.launcher().is_open());
        assert_eq!(scene.hit_test(Vec2::new(100.0, 300.0)), PointerTarget::Menu);

        scene.pointer_down(Vec2::new(900.0, 100.0), Modifiers::NONE, 10.0);
        assert!(!scene.launcher().is_open());
    }
}
