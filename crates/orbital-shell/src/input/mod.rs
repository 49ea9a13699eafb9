//! Pointer drag handling
//!
//! [`DragController`] runs the press/move/release lifecycle of one drag
//! source and reports cumulative deltas. [`DragState`] records who owns the
//! current gesture and where it was grabbed.

mod controller;
mod drag;
mod result;

pub use controller::{AllowDrag, DragController, DragEvent, DragPhase};
pub use drag::DragState;
pub use result::{InputResult, Modifiers, PointerTarget};
