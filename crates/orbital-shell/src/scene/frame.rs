//! Serialisable snapshot of the scene for the renderer

use serde::Serialize;
use crate::math::Vec2;
use crate::panel::PanelLayout;
use crate::window::{WindowId, WindowStatus};
use super::Scene;

/// Per-icon render data
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconView {
    pub title: String,
    pub icon_path: String,
    pub x: f32,
    pub y: f32,
    pub selected: bool,
}

/// Per-window render data
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowView {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z: u32,
    pub status: WindowStatus,
    pub focused: bool,
    /// Minimized windows stay in the DOM but ignore the pointer
    pub interactive: bool,
}

/// Per-task render data; `x` is the taskbar ordinal
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub x: usize,
    pub active: bool,
    pub is_window: bool,
    pub tooltip_visible: bool,
}

/// Rubber band corners in workspace coordinates
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RubberBand {
    pub from: Vec2,
    pub to: Vec2,
}

/// Icon following the pointer during a task drag
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GhostIcon {
    pub icon: String,
    pub x: f32,
    pub y: f32,
}

/// Everything the renderer needs for one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub icons: Vec<IconView>,
    /// Back to front
    pub windows: Vec<WindowView>,
    /// Creation order; render position comes from `x`
    pub tasks: Vec<TaskView>,
    pub panel_float: bool,
    pub rubber_band: Option<RubberBand>,
    pub ghost_icon: Option<GhostIcon>,
    pub launcher_open: bool,
    pub launcher_tooltip: bool,
    pub clock_tooltip: bool,
    pub layout: PanelLayout,
}

impl Scene {
    /// Build the render snapshot
    pub fn frame(&self) -> FrameSnapshot {
        let focused = self.windows.focused();

        let icons = self
            .icons
            .icons()
            .iter()
            .map(|icon| IconView {
                title: icon.title.clone(),
                icon_path: icon.icon_path.clone(),
                x: icon.pos.x,
                y: icon.pos.y,
                selected: icon.selected,
            })
            .collect();

        let windows = self
            .windows
            .windows_by_z()
            .into_iter()
            .map(|w| WindowView {
                id: w.id,
                title: w.title.clone(),
                icon: w.icon.clone(),
                x: w.position.x,
                y: w.position.y,
                width: w.size.width,
                height: w.size.height,
                z: w.z,
                status: w.status,
                focused: focused == Some(w.id),
                interactive: w.is_interactive(),
            })
            .collect();

        let tasks = self
            .tasks
            .tasks()
            .iter()
            .map(|t| TaskView {
                title: t.title.clone(),
                description: t.description.clone(),
                icon: t.icon.clone(),
                x: t.ordinal,
                active: t.active,
                is_window: t.is_window,
                tooltip_visible: t.shows_tooltip(),
            })
            .collect();

        let ghost_icon = self.ghost_icon().and_then(|pos| {
            let index = self.task_grab.owner()?;
            let task = self.tasks.get(index)?;
            Some(GhostIcon {
                icon: task.icon.clone(),
                x: pos.x,
                y: pos.y,
            })
        });

        FrameSnapshot {
            icons,
            windows,
            tasks,
            panel_float: self.panel_float(),
            rubber_band: self.rubber_band().map(|(from, to)| RubberBand { from, to }),
            ghost_icon,
            launcher_open: self.launcher.is_open(),
            launcher_tooltip: self.launcher.tooltip_visible(),
            clock_tooltip: self.clock.tooltip_visible(),
            layout: self.layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    #[test]
    fn test_frame_json_shape() {
        let mut scene = Scene::default();
        scene.add_icon("Home", "/icons/home.svg").unwrap();
        scene.pin_task("Kate", "Advanced Text Editor", "/icons/apps/kate.svg");

        let json = serde_json::to_value(scene.frame()).unwrap();
        assert_eq!(json["icons"][0]["iconPath"], "/icons/home.svg");
        assert_eq!(json["tasks"][0]["x"], 0);
        assert_eq!(json["tasks"][0]["isWindow"], false);
        assert_eq!(json["panelFloat"], false);
        assert!(json["rubberBand"].is_null());
        assert!(json["ghostIcon"].is_null());
    }

    #[test]
    fn test_frame_rubber_band() {
        let mut scene = Scene::default();
        scene.pointer_down(Vec2::new(500.0, 300.0), Modifiers::NONE, 0.0);
        scene.pointer_move(Vec2::new(400.0, 350.0));

        let frame = scene.frame();
        assert_eq!(
            frame.rubber_band,
            Some(RubberBand {
                from: Vec2::new(500.0, 300.0),
                to: Vec2::new(400.0, 350.0)
            })
        );

        scene.pointer_up(10.0);
        assert_eq!(scene.frame().rubber_band, None);
    }
}
