//! Error types for shell operations
//!
//! Errors are local and synchronous: an operation that returns `Err` has left
//! the scene state exactly as it found it.

use thiserror::Error;
use crate::window::WindowId;

/// Errors raised by the shell engines
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShellError {
    /// No free cell is left in the bounded icon grid.
    #[error("no free grid cell in a {cols}x{rows} grid")]
    GridFull { cols: i32, rows: i32 },

    /// The icon index does not refer to a live icon.
    #[error("no icon at index {0}")]
    InvalidIcon(usize),

    /// The window id does not refer to an open window.
    #[error("no window with id {0}")]
    InvalidWindow(WindowId),

    /// The task index does not refer to a taskbar entry.
    #[error("no task at index {0}")]
    InvalidTask(usize),

    /// A taskbar ordinal outside `0..len`.
    #[error("ordinal {ordinal} out of range for {len} tasks")]
    InvalidOrdinal { ordinal: usize, len: usize },

    /// A clock face could not be produced from a timestamp.
    #[error("clock error: {0}")]
    Clock(String),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used across the crate
pub type ShellResult<T> = Result<T, ShellError>;
