//! Sequential page assignment
//!
//! Pages fill cells left to right, top to bottom, sheet after sheet.
//! The last sheet may be partially filled; its trailing cells stay empty.

use crate::types::PagesPerSheet;

use super::{SheetPlan, SheetSide};

/// Number of sheets needed for `total_pages` at `pages_per_sheet`.
pub fn sequential_sheet_count(total_pages: usize, pages_per_sheet: PagesPerSheet) -> usize {
    total_pages.div_ceil(pages_per_sheet.count())
}

/// Source page for a cell, or None once the document is exhausted.
pub fn sequential_source_index(
    sheet: usize,
    position: usize,
    pages_per_sheet: PagesPerSheet,
    total_pages: usize,
) -> Option<usize> {
    let index = sheet * pages_per_sheet.count() + position;
    (index < total_pages).then_some(index)
}

/// Assign source pages to sheets in reading order.
pub fn sequential_sheets(total_pages: usize, pages_per_sheet: PagesPerSheet) -> Vec<SheetPlan> {
    let per_sheet = pages_per_sheet.count();

    (0..sequential_sheet_count(total_pages, pages_per_sheet))
        .map(|sheet| SheetPlan {
            side: SheetSide::Single,
            index: sheet,
            cells: (0..per_sheet)
                .map(|position| {
                    sequential_source_index(sheet, position, pages_per_sheet, total_pages)
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seven_pages_four_up() {
        let sheets = sequential_sheets(7, PagesPerSheet::Four);

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].cells, vec![Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(sheets[1].cells, vec![Some(4), Some(5), Some(6), None]);
        assert!(sheets.iter().all(|s| s.side == SheetSide::Single));
    }

    #[test]
    fn test_exact_multiple_has_no_empty_cells() {
        let sheets = sequential_sheets(16, PagesPerSheet::Eight);
        assert_eq!(sheets.len(), 2);
        assert!(sheets.iter().all(|s| s.empty_cells() == 0));
    }

    #[test]
    fn test_single_page() {
        let sheets = sequential_sheets(1, PagesPerSheet::Sixteen);
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].cells[0], Some(0));
        assert_eq!(sheets[0].empty_cells(), 15);
    }

    #[test]
    fn test_zero_pages_zero_sheets() {
        assert!(sequential_sheets(0, PagesPerSheet::Two).is_empty());
    }

    #[test]
    fn test_every_page_once_in_increasing_order() {
        for pps in PagesPerSheet::ALL {
            for total in 0..40 {
                let sheets = sequential_sheets(total, pps);
                assert_eq!(sheets.len(), total.div_ceil(pps.count()));

                let order: Vec<usize> = sheets.iter().flat_map(|s| s.occupied()).map(|(_, p)| p).collect();
                assert_eq!(order, (0..total).collect::<Vec<_>>(), "{:?} {}", pps, total);
            }
        }
    }

    #[test]
    fn test_source_index_past_end() {
        assert_eq!(sequential_source_index(1, 3, PagesPerSheet::Four, 7), None);
        assert_eq!(sequential_source_index(1, 2, PagesPerSheet::Four, 7), Some(6));
    }
}
