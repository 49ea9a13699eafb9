//! Bottom panel: launcher button, taskbar area and clock

mod clock;
mod launcher;
mod layout;

pub use clock::{Clock, ClockFaces};
pub use launcher::Launcher;
pub use layout::PanelLayout;
