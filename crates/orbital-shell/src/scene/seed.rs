//! Default desktop contents

use log::info;
use crate::config::ShellConfig;
use crate::error::ShellResult;
use crate::icons::DesktopFile;
use crate::math::{Size, Vec2};
use super::{AppInfo, Scene};

fn system_settings() -> AppInfo {
    AppInfo {
        title: "System Settings".to_string(),
        description: "Configuration tools for your computer".to_string(),
        icon: "/icons/apps/systemsettings.svg".to_string(),
        size: Size::new(931.0, 675.0),
        position: Some(Vec2::new(80.0, 35.0)),
    }
}

fn ark() -> AppInfo {
    AppInfo {
        title: "Ark".to_string(),
        description: "Archiving Tool".to_string(),
        icon: "/icons/apps/ark.svg".to_string(),
        size: Size::new(640.0, 480.0),
        position: None,
    }
}

fn kate() -> AppInfo {
    AppInfo {
        title: "Kate".to_string(),
        description: "Advanced Text Editor".to_string(),
        icon: "/icons/apps/kate.svg".to_string(),
        size: Size::new(800.0, 600.0),
        position: None,
    }
}

impl Scene {
    /// Scene with the stock desktop: Home and Trash icons, System Settings
    /// and Ark running, Kate pinned
    pub fn with_default_desktop(config: ShellConfig) -> ShellResult<Self> {
        let mut scene = Scene::new(config);

        for file in DesktopFile::defaults() {
            scene.add_icon(&file.name, &file.icon)?;
        }

        for app in [system_settings(), ark(), kate()] {
            scene.pin_task(&app.title, &app.description, &app.icon);
        }
        let ark_id = scene.launch(&ark());
        scene.launch(&system_settings());

        // Ark runs in the background
        if let Some(index) = scene.tasks.task_for_window(ark_id) {
            scene.tasks.set_active(index, false)?;
        }
        scene.tasks.normalize();

        info!(
            "default desktop: {} icons, {} windows, {} tasks",
            scene.icons.len(),
            scene.windows.count(),
            scene.tasks.len()
        );
        Ok(scene)
    }
}
