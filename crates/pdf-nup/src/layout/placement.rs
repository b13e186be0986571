//! Content placement within cells
//!
//! Source pages are scaled uniformly to the largest size that fits both
//! cell dimensions and centered in the cell. Pages are never cropped or
//! distorted.

use super::{Fit, GridLayout, Placement, Rect, SheetPlan, cell_bounds};

/// Fit a page box into a cell.
///
/// The page box must have positive width and height; callers reject
/// degenerate pages before placement.
pub fn fit(cell: &Rect, page_box: &Rect) -> Fit {
    let scale = (cell.width / page_box.width).min(cell.height / page_box.height);

    let draw_width = page_box.width * scale;
    let draw_height = page_box.height * scale;

    Fit {
        scale,
        offset_x: cell.x + (cell.width - draw_width) / 2.0,
        offset_y: cell.y + (cell.height - draw_height) / 2.0,
    }
}

/// Place one source page into the cell at `position`.
pub fn place_page(
    layout: &GridLayout,
    position: usize,
    source_page: usize,
    page_box: &Rect,
) -> Placement {
    let cell = cell_bounds(layout, position);

    Placement {
        source_page,
        position,
        fit: fit(&cell, page_box),
    }
}

/// Calculate placements for every occupied cell of a sheet, in cell order.
///
/// # Arguments
/// * `layout` - The grid layout
/// * `plan` - Page assignment for the sheet
/// * `page_boxes` - Bounding box of each source page
pub fn calculate_placements(
    layout: &GridLayout,
    plan: &SheetPlan,
    page_boxes: &[Rect],
) -> Vec<Placement> {
    plan.occupied()
        .filter_map(|(position, source_page)| {
            page_boxes
                .get(source_page)
                .map(|page_box| place_page(layout, position, source_page, page_box))
        })
        .collect()
}
