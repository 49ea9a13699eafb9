//! Icon and desktop file records

use serde::Serialize;
use crate::math::Vec2;

/// A desktop icon
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub title: String,
    pub icon_path: String,
    /// Top-left corner in workspace pixels
    pub pos: Vec2,
    pub selected: bool,
}

impl Icon {
    /// Create an unselected icon at the origin
    pub fn new(title: impl Into<String>, icon_path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon_path: icon_path.into(),
            pos: Vec2::ZERO,
            selected: false,
        }
    }
}

/// What a desktop entry points at
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FileKind {
    Folder,
    Link { url: String },
}

/// A file shown on the desktop
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DesktopFile {
    pub name: String,
    pub icon: String,
    pub kind: FileKind,
}

impl DesktopFile {
    /// Create a folder entry
    pub fn folder(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            kind: FileKind::Folder,
        }
    }

    /// Create a link entry
    pub fn link(name: &str, icon: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            kind: FileKind::Link { url: url.to_string() },
        }
    }

    /// Files every fresh desktop starts with
    pub fn defaults() -> Vec<DesktopFile> {
        vec![
            DesktopFile::folder("Home", "/icons/places/folder-activities.svg"),
            DesktopFile::link("Trash", "/icons/places/user-trash.svg", "~/.local/share/Trash"),
        ]
    }
}
