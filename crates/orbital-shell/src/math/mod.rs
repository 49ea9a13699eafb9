//! Core geometry types for the shell
//!
//! Pixel positions are workspace-local (origin at the top-left corner of the
//! display). Grid cells are derived from positions through [`GridMetrics`].

mod vec2;
mod size;
mod rect;
mod grid;

pub use vec2::Vec2;
pub use size::Size;
pub use rect::Rect;
pub use grid::{GridBounds, GridCell, GridMetrics};
