//! Desktop icons
//!
//! Icons live in an ordered collection; an icon's identity is its index.
//! [`IconLayer`] keeps an [`Occupancy`] cache next to the collection so that
//! placement never has to scan every icon to find out whether a cell is taken.

mod icon;
mod occupancy;
mod layer;

pub use icon::{DesktopFile, FileKind, Icon};
pub use occupancy::Occupancy;
pub use layer::IconLayer;
