//! Taskbar entries and their ordering
//!
//! A task's `ordinal` is its slot on the taskbar, not a pixel position.
//! Ordinals are always a permutation of `0..len`.

mod task;
mod bar;

pub use task::Task;
pub use bar::TaskBar;
