//! Layout calculation modules for imposition
//!
//! This module handles all the geometric calculations for page imposition:
//! - Grid layout (pages-per-sheet table, cell rectangles)
//! - Page assignment (which source page goes in which cell)
//! - Content placement (uniform scaling and centering)

mod booklet;
mod grid;
mod placement;
mod sequential;
mod types;

pub use booklet::*;
pub use grid::*;
pub use placement::*;
pub use sequential::*;
pub use types::*;

use crate::types::{ImposeMode, PagesPerSheet};

/// Plan every output sheet for a document of `total_pages` pages.
pub fn plan_sheets(
    total_pages: usize,
    pages_per_sheet: PagesPerSheet,
    mode: ImposeMode,
) -> Vec<SheetPlan> {
    match mode {
        ImposeMode::Sequential => sequential_sheets(total_pages, pages_per_sheet),
        ImposeMode::Foldable => booklet_sheets(total_pages, pages_per_sheet),
    }
}
