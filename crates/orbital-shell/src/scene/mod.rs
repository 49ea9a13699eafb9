//! Scene state authority
//!
//! [`Scene`] owns every piece of mutable shell state: icons, windows, tasks,
//! panel flags and the per-surface drag controllers. Renderers read it through
//! [`Scene::frame`]; all changes go through its operations.
//!
//! This module is split into focused submodules:
//! - `input`: hit testing and pointer routing
//! - `frame`: serialisable snapshot for the renderer
//! - `seed`: the default desktop

mod input;
mod frame;
mod seed;

use log::{debug, warn};
use serde::Deserialize;
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::icons::IconLayer;
use crate::input::{DragController, DragState};
use crate::math::{Rect, Size, Vec2};
use crate::panel::{Clock, ClockFaces, Launcher, PanelLayout};
use crate::taskbar::{Task, TaskBar};
use crate::window::{WindowConfig, WindowId, WindowManager};

pub use frame::{FrameSnapshot, GhostIcon, IconView, RubberBand, TaskView, WindowView};

/// An application that can be launched into a window
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppInfo {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub size: Size,
    /// Initial position (None = auto-cascade)
    pub position: Option<Vec2>,
}

/// A pointer surface with its own drag controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Surface {
    /// Desktop icons and the rubber band
    Workspace,
    Windows,
    Taskbar,
}

/// Gesture in progress, keyed by the surface that received the press
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Gesture {
    /// Icon press; the icon is the `icon_grab` owner
    Icons {
        /// Ctrl-press toggled the icon into or out of the selection
        toggled: bool,
        /// Last cumulative delta applied to the selection
        last_delta: Vec2,
    },
    RubberBand { from: Vec2, to: Vec2 },
    /// Title bar press; the window is the `window_grab` owner
    Window,
    /// Taskbar entry press; the task is the `task_grab` owner
    Task {
        pressed_at: f64,
        ghost: Option<Vec2>,
    },
}

/// The whole desktop shell
#[derive(Clone, Debug)]
pub struct Scene {
    pub(crate) config: ShellConfig,
    pub(crate) icons: IconLayer,
    pub(crate) windows: WindowManager,
    pub(crate) tasks: TaskBar,
    pub(crate) launcher: Launcher,
    pub(crate) clock: Clock,
    pub(crate) layout: PanelLayout,
    /// Window whose last drag decides whether the bottom panel floats
    pub(crate) float_window: Option<WindowId>,
    pub(crate) gesture: Option<Gesture>,
    pub(crate) icon_drag: DragController,
    pub(crate) window_drag: DragController,
    pub(crate) task_drag: DragController,
    pub(crate) icon_grab: DragState<usize>,
    pub(crate) window_grab: DragState<WindowId>,
    pub(crate) task_grab: DragState<usize>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl Scene {
    /// Create an empty scene with every surface mounted
    pub fn new(config: ShellConfig) -> Self {
        let mut scene = Self {
            icons: IconLayer::from_config(&config),
            windows: WindowManager::from_config(&config),
            tasks: TaskBar::new(config.taskbar),
            launcher: Launcher::default(),
            clock: Clock::default(),
            layout: PanelLayout::compute(config.display, &config.panel),
            float_window: None,
            gesture: None,
            icon_drag: DragController::new(config.drag.delay),
            window_drag: DragController::new(config.drag.delay),
            task_drag: DragController::new(config.drag.delay),
            icon_grab: DragState::default(),
            window_grab: DragState::default(),
            task_grab: DragState::default(),
            config,
        };
        scene.mount(Surface::Workspace);
        scene.mount(Surface::Windows);
        scene.mount(Surface::Taskbar);
        scene
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    #[inline]
    pub fn icons(&self) -> &IconLayer {
        &self.icons
    }

    #[inline]
    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    #[inline]
    pub fn tasks(&self) -> &TaskBar {
        &self.tasks
    }

    #[inline]
    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    #[inline]
    pub fn layout(&self) -> &PanelLayout {
        &self.layout
    }

    /// Bottom panel renders above windows
    ///
    /// Follows the last dragged window, so it clears once that window is
    /// closed, minimized or maximized.
    pub fn panel_float(&self) -> bool {
        self.float_window
            .is_some_and(|id| self.windows.floats_panel(id))
    }

    /// Rubber band corners while a band selection is in progress
    pub fn rubber_band(&self) -> Option<(Vec2, Vec2)> {
        match self.gesture {
            Some(Gesture::RubberBand { from, to }) => Some((from, to)),
            _ => None,
        }
    }

    /// Position of the icon following the pointer during a task drag
    pub fn ghost_icon(&self) -> Option<Vec2> {
        match self.gesture {
            Some(Gesture::Task { ghost, .. }) => ghost,
            _ => None,
        }
    }

    /// Whether global move/up listeners must stay bound
    pub fn is_capturing(&self) -> bool {
        self.icon_drag.is_listening() || self.window_drag.is_listening() || self.task_drag.is_listening()
    }

    /// Format the clock faces for a point in time
    pub fn clock_faces(&self, now: time::OffsetDateTime) -> ShellResult<ClockFaces> {
        self.clock.faces(now)
    }

    // =========================================================================
    // Surfaces
    // =========================================================================

    fn controller_mut(&mut self, surface: Surface) -> &mut DragController {
        match surface {
            Surface::Workspace => &mut self.icon_drag,
            Surface::Windows => &mut self.window_drag,
            Surface::Taskbar => &mut self.task_drag,
        }
    }

    /// Attach a surface; presses on it are ignored until it is mounted
    pub fn mount(&mut self, surface: Surface) {
        self.controller_mut(surface).mount();
    }

    /// Detach a surface, ending any gesture it owns
    pub fn unmount(&mut self, surface: Surface) {
        let owns_gesture = matches!(
            (surface, self.gesture),
            (Surface::Workspace, Some(Gesture::Icons { .. } | Gesture::RubberBand { .. }))
                | (Surface::Windows, Some(Gesture::Window))
                | (Surface::Taskbar, Some(Gesture::Task { .. }))
        );
        if owns_gesture {
            self.cancel_gesture();
        }
        self.controller_mut(surface).unmount();
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adopt a new display size
    pub fn resize(&mut self, display: Size) {
        if matches!(self.gesture, Some(Gesture::Icons { .. })) {
            self.cancel_gesture();
        }
        self.config.display = display;
        self.layout = PanelLayout::compute(display, &self.config.panel);
        let grid = self.icons.grid();
        self.icons.set_bounds(grid.bounds(self.config.workspace_area()));
        self.windows.set_display(display);
        debug!("display resized to {}x{}", display.width, display.height);
    }

    /// Override the taskbar rectangle measured by the host
    pub fn set_taskbar_rect(&mut self, rect: Rect) {
        self.layout.taskbar = rect;
    }

    /// Add a desktop icon on the first free cell
    pub fn add_icon(&mut self, title: &str, icon_path: &str) -> ShellResult<usize> {
        self.icons.add(title, icon_path)
    }

    /// Remove a desktop icon; an icon gesture in progress is cancelled first
    pub fn remove_icon(&mut self, index: usize) -> ShellResult<()> {
        if matches!(self.gesture, Some(Gesture::Icons { .. } | Gesture::RubberBand { .. })) {
            self.cancel_gesture();
        }
        self.icons.remove(index).map(|_| ())
    }

    /// Open a window for an app and link it to a taskbar entry
    ///
    /// A pinned entry with the same title and no window is reused; otherwise
    /// a new entry is appended.
    pub fn launch(&mut self, app: &AppInfo) -> WindowId {
        let config = WindowConfig {
            title: app.title.clone(),
            icon: app.icon.clone(),
            position: app.position,
            size: app.size,
        };
        let id = self.windows.create(config);

        let existing = self
            .tasks
            .tasks()
            .iter()
            .position(|t| !t.is_window && t.title == app.title);
        let index = match existing {
            Some(index) => index,
            None => self.tasks.push(Task::pinned(&app.title, &app.description, &app.icon)),
        };
        if let Err(e) = self
            .tasks
            .link_window(index, id)
            .and_then(|_| self.tasks.set_active(index, true))
        {
            warn!("launch: {}", e);
        }
        debug!("launched '{}' as window {}", app.title, id);
        id
    }

    /// Close a window and clear its taskbar link
    pub fn close_window(&mut self, id: WindowId) -> ShellResult<()> {
        if self.window_grab.is_owned_by(id) {
            self.cancel_gesture();
        }
        self.windows.close(id)?;
        if self.float_window == Some(id) {
            self.float_window = None;
        }
        if let Some(index) = self.tasks.task_for_window(id) {
            self.tasks.unlink_window(index)?;
        }
        Ok(())
    }

    /// Add a taskbar entry with no window
    pub fn pin_task(&mut self, title: &str, description: &str, icon: &str) -> usize {
        self.tasks.push(Task::pinned(title, description, icon))
    }

    /// Taskbar entry click: forwarded to the linked window, if any
    pub fn click_task(&mut self, index: usize) -> ShellResult<()> {
        let task = self
            .tasks
            .get(index)
            .ok_or(ShellError::InvalidTask(index))?;
        match task.window_id {
            Some(id) => self.windows.click_task_icon(id),
            None => {
                debug!("task {} has no window", index);
                Ok(())
            }
        }
    }

    /// End the current gesture and return every controller to idle
    pub fn teardown(&mut self) {
        self.cancel_gesture();
        self.icon_drag.teardown();
        self.window_drag.teardown();
        self.task_drag.teardown();
    }

    /// Drop the current gesture without completing it
    pub(crate) fn cancel_gesture(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Icons { .. }) => {
                self.icons.revert_drag();
                self.icon_drag.teardown();
            }
            Some(Gesture::RubberBand { .. }) => self.icon_drag.teardown(),
            Some(Gesture::Window) => self.window_drag.teardown(),
            Some(Gesture::Task { .. }) => {
                if let Some(index) = self.task_grab.owner() {
                    let is_window = self.tasks.get(index).is_some_and(|t| t.is_window);
                    if self.tasks.set_active(index, is_window).is_err() {
                        warn!("task {} vanished during a gesture", index);
                    }
                }
                self.task_drag.teardown();
            }
            None => {}
        }
        self.icon_grab.stop_drag();
        self.window_grab.stop_drag();
        self.task_grab.stop_drag();
    }
}
