//! Grid layout calculation
//!
//! This module handles the geometric layout of the page grid on a sheet:
//! the fixed pages-per-sheet table and cell rectangles.

use crate::types::PagesPerSheet;

use super::{Grid, GridLayout, GridPosition, Rect};

// =============================================================================
// Grid Resolution
// =============================================================================

impl Grid {
    /// Resolve the grid for a pages-per-sheet count.
    pub fn resolve(pages_per_sheet: PagesPerSheet) -> Self {
        let (cols, rows) = pages_per_sheet.grid_dimensions();
        Grid { cols, rows }
    }

    /// Total number of cells in the grid
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Row/column of a cell position index
    pub fn position(&self, index: usize) -> GridPosition {
        GridPosition::new(index / self.cols, index % self.cols)
    }

    /// Cell position index of a row/column
    pub fn index(&self, pos: GridPosition) -> usize {
        pos.row * self.cols + pos.col
    }
}

/// Create a grid layout for the given pages-per-sheet count and sheet size.
///
/// # Arguments
/// * `pages_per_sheet` - How many source pages share one sheet
/// * `sheet_width_pt` - Output sheet width in points
/// * `sheet_height_pt` - Output sheet height in points
pub fn create_grid_layout(
    pages_per_sheet: PagesPerSheet,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
) -> GridLayout {
    let grid = Grid::resolve(pages_per_sheet);

    GridLayout {
        grid,
        sheet_width_pt,
        sheet_height_pt,
        cell_width_pt: sheet_width_pt / grid.cols as f32,
        cell_height_pt: sheet_height_pt / grid.rows as f32,
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

/// Calculate the bounds of the cell at a position index.
///
/// Rows run top to bottom while PDF y grows upward, so row 0 sits
/// against the top edge of the sheet.
pub fn cell_bounds(layout: &GridLayout, position: usize) -> Rect {
    let pos = layout.grid.position(position);

    let cell_x = pos.col as f32 * layout.cell_width_pt;
    let cell_y = layout.sheet_height_pt - (pos.row + 1) as f32 * layout.cell_height_pt;

    Rect::new(
        cell_x,
        cell_y,
        layout.cell_width_pt,
        layout.cell_height_pt,
    )
}

// =============================================================================
// Tests
// =============================================================================
