//! Icon grid geometry
//!
//! Conversion between pixel positions and grid cells. Both directions use the
//! same pitch (`cell size + margin`). `to_grid` rounds half away from zero on
//! both axes; every caller in the crate goes through it so placement, occupancy
//! and hit testing agree on which cell a position belongs to.

use serde::{Deserialize, Serialize};
use super::{Rect, Size, Vec2};

/// A cell of the icon grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    /// Create a new cell
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// Exclusive upper bounds of the usable grid (`cols x rows`)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub cols: i32,
    pub rows: i32,
}

impl GridBounds {
    /// Create new bounds
    #[inline]
    pub const fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Check whether a cell lies inside the bounds
    #[inline]
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.col >= 0 && cell.col < self.cols && cell.row >= 0 && cell.row < self.rows
    }

    /// Number of cells
    #[inline]
    pub fn capacity(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    /// Iterate all cells in column-major order (columns outer, rows inner)
    pub fn cells(self) -> impl Iterator<Item = GridCell> {
        (0..self.cols).flat_map(move |col| (0..self.rows).map(move |row| GridCell::new(col, row)))
    }

    /// Iterate the cells strictly after `cell` in column-major order
    pub fn cells_after(self, cell: GridCell) -> impl Iterator<Item = GridCell> {
        self.cells()
            .skip_while(move |c| (c.col, c.row) <= (cell.col, cell.row))
    }
}

/// Pixel metrics of one grid cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Size of the icon box
    pub cell: Size,
    /// Gap added after each cell on both axes
    pub margin: f32,
}

impl GridMetrics {
    /// Create metrics from a cell size and margin
    #[inline]
    pub const fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            cell: Size::new(width, height),
            margin,
        }
    }

    /// Distance between the origins of two neighbouring cells
    #[inline]
    pub fn pitch(&self) -> Vec2 {
        Vec2::new(self.cell.width + self.margin, self.cell.height + self.margin)
    }

    /// Cell a pixel position belongs to
    pub fn to_grid(&self, pos: Vec2) -> GridCell {
        let pitch = self.pitch();
        GridCell::new(
            (pos.x / pitch.x).round() as i32,
            (pos.y / pitch.y).round() as i32,
        )
    }

    /// Top-left pixel position of a cell
    #[inline]
    pub fn to_pos(&self, cell: GridCell) -> Vec2 {
        let pitch = self.pitch();
        Vec2::new(cell.col as f32 * pitch.x, cell.row as f32 * pitch.y)
    }

    /// Box an icon occupies when placed at `pos`
    #[inline]
    pub fn icon_rect(&self, pos: Vec2) -> Rect {
        Rect::from_pos_size(pos, self.cell)
    }

    /// Number of whole cells that fit in the workspace area
    pub fn bounds(&self, area: Size) -> GridBounds {
        let pitch = self.pitch();
        if pitch.x <= 0.0 || pitch.y <= 0.0 || area.is_empty() {
            return GridBounds::default();
        }
        GridBounds::new(
            (area.width / pitch.x).floor() as i32,
            (area.height / pitch.y).floor() as i32,
        )
    }
}
