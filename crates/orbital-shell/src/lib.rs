//! Desktop Shell for the Orbital web desktop
//!
//! This crate provides the state engines behind a browser-rendered desktop:
//! - Desktop icons on a snapping grid (placement, collision resolution, group drag)
//! - A delay-gated drag controller shared by every pointer surface
//! - Windows with a normal/maximized/minimized state machine and display clamping
//! - A taskbar whose entries reorder while dragged
//! - A bottom panel with launcher and clock
//!
//! ## Architecture
//!
//! - [`math`]: Geometry types (`Vec2`, `Size`, `Rect`) and grid conversion
//! - [`input`]: Drag controller, drag ownership and pointer targets
//! - [`icons`]: Icon placement engine and occupancy cache
//! - [`window`]: Window lifecycle, status and positioning
//! - [`taskbar`]: Task ordering engine
//! - [`panel`]: Launcher, clock and panel layout
//! - [`scene`]: The single owner of all mutable state and the pointer router
//!
//! ## Example
//!
//! ```rust
//! use orbital_shell::{Modifiers, Scene, ShellConfig, Vec2};
//!
//! let mut scene = Scene::new(ShellConfig::default());
//! let home = scene.add_icon("Home", "/icons/places/folder.svg").unwrap();
//!
//! // Drag the icon two cells to the right and drop it
//! scene.pointer_down(Vec2::new(10.0, 10.0), Modifiers::NONE, 0.0);
//! scene.pointer_move(Vec2::new(230.0, 10.0));
//! scene.pointer_up(300.0);
//!
//! assert_eq!(scene.icons().get(home).unwrap().pos, Vec2::new(216.0, 0.0));
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod input;
pub mod icons;
pub mod window;
pub mod taskbar;
pub mod panel;
pub mod scene;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use math::{GridBounds, GridCell, GridMetrics, Rect, Size, Vec2};
pub use input::{AllowDrag, DragController, DragEvent, DragPhase, DragState, InputResult, Modifiers, PointerTarget};
pub use icons::{DesktopFile, Icon, IconLayer, Occupancy};
pub use window::{OriginInfo, Window, WindowConfig, WindowId, WindowManager, WindowRegion, WindowStatus};
pub use taskbar::{Task, TaskBar};
pub use panel::{Clock, ClockFaces, Launcher, PanelLayout};
pub use scene::{AppInfo, FrameSnapshot, Scene, Surface};
