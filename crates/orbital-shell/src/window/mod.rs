//! Window management module
//!
//! Provides window lifecycle, the normal/maximized/minimized state machine,
//! display clamping, focus and hit testing.

mod window;
mod config;
mod manager;

pub use window::{OriginInfo, Window, WindowRegion, WindowStatus};
pub use config::WindowConfig;
pub use manager::WindowManager;

/// Unique window identifier
pub type WindowId = u64;
