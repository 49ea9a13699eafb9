//! Grid occupancy cache
//!
//! Derived from the icon collection and never authoritative: it can always be
//! rebuilt from icon positions.

use std::collections::HashMap;
use crate::math::{GridCell, GridMetrics};
use super::Icon;

/// Map from grid cell to the index of the icon occupying it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Occupancy {
    cells: HashMap<GridCell, usize>,
}

impl Occupancy {
    /// Build the map from icon positions; on a collision the lower index keeps the cell
    pub fn rebuild(icons: &[Icon], grid: &GridMetrics) -> Self {
        let mut cells = HashMap::with_capacity(icons.len());
        for (index, icon) in icons.iter().enumerate() {
            cells.entry(grid.to_grid(icon.pos)).or_insert(index);
        }
        Self { cells }
    }

    /// Icon occupying a cell
    #[inline]
    pub fn get(&self, cell: GridCell) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    /// Whether no icon occupies the cell
    #[inline]
    pub fn is_free(&self, cell: GridCell) -> bool {
        !self.cells.contains_key(&cell)
    }

    /// Cell claimed by an icon
    pub fn cell_of(&self, index: usize) -> Option<GridCell> {
        self.cells
            .iter()
            .find_map(|(cell, &owner)| (owner == index).then_some(*cell))
    }

    /// Claim a cell for an icon
    pub fn claim(&mut self, cell: GridCell, index: usize) {
        self.cells.insert(cell, index);
    }

    /// Release whatever cell an icon holds
    pub fn release(&mut self, index: usize) -> Option<GridCell> {
        let cell = self.cell_of(index)?;
        self.cells.remove(&cell);
        Some(cell)
    }

    /// Number of occupied cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell is occupied
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;

    fn grid() -> GridMetrics {
        GridMetrics::new(103.0, 93.0, 5.0)
    }

    fn icon_at(x: f32, y: f32) -> Icon {
        let mut icon = Icon::new("i", "/i.svg");
        icon.pos = Vec2::new(x, y);
        icon
    }

    #[test]
    fn test_rebuild_maps_positions_to_cells() {
        let icons = vec![icon_at(0.0, 0.0), icon_at(108.0, 0.0), icon_at(0.0, 98.0)];
        let occ = Occupancy::rebuild(&icons, &grid());
        assert_eq!(occ.len(), 3);
        assert_eq!(occ.get(GridCell::new(1, 0)), Some(1));
        assert_eq!(occ.get(GridCell::new(0, 1)), Some(2));
        assert!(occ.is_free(GridCell::new(1, 1)));
    }

    #[test]
    fn test_rebuild_collision_keeps_lower_index() {
        let icons = vec![icon_at(0.0, 0.0), icon_at(10.0, 10.0)];
        let occ = Occupancy::rebuild(&icons, &grid());
        assert_eq!(occ.len(), 1);
        assert_eq!(occ.get(GridCell::new(0, 0)), Some(0));
    }

    #[test]
    fn test_claim_and_release() {
        let mut occ = Occupancy::default();
        occ.claim(GridCell::new(2, 3), 4);
        assert_eq!(occ.cell_of(4), Some(GridCell::new(2, 3)));

        assert_eq!(occ.release(4), Some(GridCell::new(2, 3)));
        assert!(occ.is_empty());
        assert_eq!(occ.release(4), None);
    }
}
