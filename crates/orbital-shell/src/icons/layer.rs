//! Icon placement engine
//!
//! Owns the icon collection and its occupancy cache. With snapping enabled
//! every settled icon sits on its own cell and no two icons share a cell.
//! Settled icons are inside the grid bounds unless the bounds shrank below the
//! icon count, in which case the icons that no longer fit keep their cells.
//! `drag` moves icons freely; overlap and bounds are resolved only when the
//! drag is dropped.

use log::{debug, warn};
use crate::config::ShellConfig;
use crate::error::{ShellError, ShellResult};
use crate::math::{GridBounds, GridCell, GridMetrics, Rect, Vec2};
use super::{Icon, Occupancy};

/// Ordered icon collection with grid placement
#[derive(Clone, Debug)]
pub struct IconLayer {
    icons: Vec<Icon>,
    /// Cells of settled icons; not updated while a drag is in flight
    occupancy: Occupancy,
    grid: GridMetrics,
    bounds: GridBounds,
    snap: bool,
}

impl IconLayer {
    /// Create an empty layer
    pub fn new(grid: GridMetrics, bounds: GridBounds, snap: bool) -> Self {
        Self {
            icons: Vec::new(),
            occupancy: Occupancy::default(),
            grid,
            bounds,
            snap,
        }
    }

    /// Create an empty layer sized for the configured display
    pub fn from_config(config: &ShellConfig) -> Self {
        let grid = config.icon.grid();
        Self::new(grid, grid.bounds(config.workspace_area()), config.snap_to_grid)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[inline]
    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Icon> {
        self.icons.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    #[inline]
    pub fn grid(&self) -> GridMetrics {
        self.grid
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    #[inline]
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    #[inline]
    pub fn snap_enabled(&self) -> bool {
        self.snap
    }

    /// Cell an icon is settled on
    pub fn cell_of(&self, index: usize) -> Option<GridCell> {
        self.occupancy.cell_of(index)
    }

    /// Indices of selected icons in collection order
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.icons
            .iter()
            .enumerate()
            .filter_map(|(i, icon)| icon.selected.then_some(i))
    }

    pub fn selected_count(&self) -> usize {
        self.icons.iter().filter(|icon| icon.selected).count()
    }

    /// First icon whose box contains the point
    pub fn get_clicked(&self, pos: Vec2) -> Option<usize> {
        self.icons
            .iter()
            .position(|icon| self.grid.icon_rect(icon.pos).contains(pos))
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Change grid bounds after a display resize
    ///
    /// With snapping on, icons left outside the new bounds move to the nearest
    /// free cells inside them. If they do not all fit, nothing moves.
    pub fn set_bounds(&mut self, bounds: GridBounds) {
        self.bounds = bounds;
        if !self.snap {
            return;
        }
        if let Err(e) = self.settle(|cell| bounds.contains(cell)) {
            warn!("resize: icons outside the grid stay put: {}", e);
        }
    }

    /// Turn snapping on or off
    ///
    /// Turning it on settles every icon, in collection order, on the nearest
    /// free cell. On `GridFull` snapping stays off and no icon moves.
    pub fn set_snap(&mut self, snap: bool) -> ShellResult<()> {
        if snap && !self.snap {
            self.settle(|_| false)?;
        }
        self.snap = snap;
        Ok(())
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Place a new icon on the first free cell in column-major order
    pub fn add(&mut self, title: impl Into<String>, icon_path: impl Into<String>) -> ShellResult<usize> {
        let cell = self.first_free_cell()?;
        let mut icon = Icon::new(title, icon_path);
        icon.pos = self.grid.to_pos(cell);

        let index = self.icons.len();
        debug!("icon {} '{}' placed at {:?}", index, icon.title, cell);
        self.icons.push(icon);
        self.occupancy.claim(cell, index);
        Ok(index)
    }

    /// Remove an icon; other icons keep their positions
    pub fn remove(&mut self, index: usize) -> ShellResult<Icon> {
        if index >= self.icons.len() {
            warn!("remove: no icon at index {}", index);
            return Err(ShellError::InvalidIcon(index));
        }
        let icon = self.icons.remove(index);
        // Indices after `index` shifted
        self.rebuild();
        Ok(icon)
    }

    /// Re-lay out every icon in collection order into consecutive cells
    pub fn arrange(&mut self) -> ShellResult<()> {
        if self.icons.len() > self.bounds.capacity() {
            return Err(self.grid_full());
        }
        let mut occupancy = Occupancy::default();
        for (index, (icon, cell)) in self.icons.iter_mut().zip(self.bounds.cells()).enumerate() {
            icon.pos = self.grid.to_pos(cell);
            occupancy.claim(cell, index);
        }
        self.occupancy = occupancy;
        Ok(())
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn select(&mut self, index: usize, selected: bool) -> ShellResult<()> {
        let icon = self.icons.get_mut(index).ok_or(ShellError::InvalidIcon(index))?;
        icon.selected = selected;
        Ok(())
    }

    /// Flip one icon's selection, returning the new state
    pub fn toggle(&mut self, index: usize) -> ShellResult<bool> {
        let icon = self.icons.get_mut(index).ok_or(ShellError::InvalidIcon(index))?;
        icon.selected = !icon.selected;
        Ok(icon.selected)
    }

    pub fn select_all(&mut self) {
        for icon in &mut self.icons {
            icon.selected = true;
        }
    }

    pub fn cancel_select(&mut self) {
        for icon in &mut self.icons {
            icon.selected = false;
        }
    }

    /// Click without drag: the icon becomes the only selected one
    pub fn clicked_selection(&mut self, index: usize) -> ShellResult<()> {
        if index >= self.icons.len() {
            return Err(ShellError::InvalidIcon(index));
        }
        for (i, icon) in self.icons.iter_mut().enumerate() {
            icon.selected = i == index;
        }
        Ok(())
    }

    /// Rubber band: select exactly the icons whose box intersects `rect`
    pub fn select_in_rect(&mut self, rect: Rect) {
        let grid = self.grid;
        for icon in &mut self.icons {
            icon.selected = grid.icon_rect(icon.pos).intersects(&rect);
        }
    }

    // =========================================================================
    // Drag and drop
    // =========================================================================

    /// Move every selected icon by an incremental delta
    pub fn drag(&mut self, delta: Vec2) {
        for icon in self.icons.iter_mut().filter(|icon| icon.selected) {
            icon.pos += delta;
        }
    }

    /// Settle selected icons on their nearest free cells
    ///
    /// Icons are processed in collection order. Each icon gives up its own
    /// cell before searching, so it may land back where it started. On
    /// `GridFull` nothing is written.
    pub fn drop(&mut self) -> ShellResult<()> {
        if !self.snap {
            self.rebuild();
            return Ok(());
        }

        let mut occupancy = self.occupancy.clone();
        let mut placed = Vec::new();
        for index in self.selected() {
            occupancy.release(index);
            let cell = Self::closest_free(&occupancy, self.grid, self.bounds, self.icons[index].pos)
                .ok_or_else(|| self.grid_full())?;
            occupancy.claim(cell, index);
            placed.push((index, cell));
        }

        for (index, cell) in placed {
            self.icons[index].pos = self.grid.to_pos(cell);
            debug!("icon {} dropped at {:?}", index, cell);
        }
        self.occupancy = occupancy;
        Ok(())
    }

    /// Alias of [`drop`](Self::drop)
    #[inline]
    pub fn snap_to_grid(&mut self) -> ShellResult<()> {
        self.drop()
    }

    /// Send selected icons back to the cells they were settled on before the drag
    pub fn revert_drag(&mut self) {
        let grid = self.grid;
        for index in self.selected().collect::<Vec<_>>() {
            if let Some(cell) = self.occupancy.cell_of(index) {
                self.icons[index].pos = grid.to_pos(cell);
            }
        }
    }

    // =========================================================================
    // Placement search
    // =========================================================================

    /// Nearest free in-bounds cell to a pixel position
    pub fn find_closest_pos(&self, pos: Vec2) -> ShellResult<GridCell> {
        Self::closest_free(&self.occupancy, self.grid, self.bounds, pos).ok_or_else(|| self.grid_full())
    }

    /// First free cell in column-major order
    pub fn first_free_cell(&self) -> ShellResult<GridCell> {
        self.bounds
            .cells()
            .find(|cell| self.occupancy.is_free(*cell))
            .ok_or_else(|| self.grid_full())
    }

    /// Next free cell after the one icon `index` is settled on
    pub fn next_free_after(&self, index: usize) -> ShellResult<GridCell> {
        let start = self.cell_of(index).ok_or(ShellError::InvalidIcon(index))?;
        self.bounds
            .cells_after(start)
            .find(|cell| self.occupancy.is_free(*cell))
            .ok_or_else(|| self.grid_full())
    }

    fn closest_free(occupancy: &Occupancy, grid: GridMetrics, bounds: GridBounds, pos: Vec2) -> Option<GridCell> {
        let own = grid.to_grid(pos);
        if bounds.contains(own) && occupancy.is_free(own) {
            return Some(own);
        }

        // Strict comparison keeps the first cell in scan order on ties
        let mut best: Option<(GridCell, f32)> = None;
        for cell in bounds.cells().filter(|cell| occupancy.is_free(*cell)) {
            let dist = grid.to_pos(cell).distance_squared(pos);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((cell, dist));
            }
        }
        best.map(|(cell, _)| cell)
    }

    /// Re-place icons whose claimed cell fails `keep`, in collection order
    ///
    /// Kept icons claim their cells first. All or nothing: on `GridFull` the
    /// layer is left untouched.
    fn settle(&mut self, keep: impl Fn(GridCell) -> bool) -> ShellResult<()> {
        let mut occupancy = Occupancy::default();
        let mut pending = Vec::new();
        for index in 0..self.icons.len() {
            match self.occupancy.cell_of(index) {
                Some(cell) if keep(cell) && occupancy.is_free(cell) => occupancy.claim(cell, index),
                _ => pending.push(index),
            }
        }

        let mut placed = Vec::with_capacity(pending.len());
        for index in pending {
            let cell = Self::closest_free(&occupancy, self.grid, self.bounds, self.icons[index].pos)
                .ok_or_else(|| self.grid_full())?;
            occupancy.claim(cell, index);
            placed.push((index, cell));
        }

        for (index, cell) in placed {
            self.icons[index].pos = self.grid.to_pos(cell);
            debug!("icon {} settled at {:?}", index, cell);
        }
        self.occupancy = occupancy;
        Ok(())
    }

    fn rebuild(&mut self) {
        self.occupancy = Occupancy::rebuild(&self.icons, &self.grid);
    }

    fn grid_full(&self) -> ShellError {
        warn!("no free cell in {}x{} icon grid", self.bounds.cols, self.bounds.rows);
        ShellError::GridFull {
            cols: self.bounds.cols,
            rows: self.bounds.rows,
        }
    }
}
