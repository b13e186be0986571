//! Foldable booklet page assignment
//!
//! Each sheet pair takes a batch of `2 * pages_per_sheet` consecutive
//! source pages. The front sheet receives the odd pages of the batch
//! (1, 3, 5, ... counting from one) in natural cell order. The back sheet
//! receives the even pages, with columns mirrored within each row so that
//! after the sheet is flipped for duplex printing every even page lands
//! directly behind the odd page before it.
//!
//! All front sheets are emitted first, then all back sheets.
//!
//! ```text
//!  4-up batch of pages 1..8
//!
//!   front         back
//!  +---+---+    +---+---+
//!  | 1 | 3 |    | 4 | 2 |
//!  +---+---+    +---+---+
//!  | 5 | 7 |    | 8 | 6 |
//!  +---+---+    +---+---+
//! ```

use crate::types::PagesPerSheet;

use super::{Grid, SheetPlan, SheetSide};

/// Number of front/back sheet pairs for `total_pages`.
pub fn sheet_pair_count(total_pages: usize, pages_per_sheet: PagesPerSheet) -> usize {
    total_pages.div_ceil(2 * pages_per_sheet.count())
}

/// Mirror a cell position horizontally within its row.
pub fn mirrored_position(position: usize, cols: usize) -> usize {
    let row = position / cols;
    let col = position % cols;
    row * cols + (cols - 1 - col)
}

/// Source page for a front-side cell, or None once the document is exhausted.
pub fn front_source_index(
    pair: usize,
    position: usize,
    pages_per_sheet: PagesPerSheet,
    total_pages: usize,
) -> Option<usize> {
    let index = pair * 2 * pages_per_sheet.count() + 2 * position;
    (index < total_pages).then_some(index)
}

/// Source page for a back-side cell, or None once the document is exhausted.
pub fn back_source_index(
    pair: usize,
    position: usize,
    pages_per_sheet: PagesPerSheet,
    total_pages: usize,
) -> Option<usize> {
    let cols = Grid::resolve(pages_per_sheet).cols;
    let reversed = mirrored_position(position, cols);
    let index = pair * 2 * pages_per_sheet.count() + 2 * reversed + 1;
    (index < total_pages).then_some(index)
}

/// Assign source pages to front sheets followed by back sheets.
pub fn booklet_sheets(total_pages: usize, pages_per_sheet: PagesPerSheet) -> Vec<SheetPlan> {
    let pairs = sheet_pair_count(total_pages, pages_per_sheet);
    let per_sheet = pages_per_sheet.count();

    let fronts = (0..pairs).map(|pair| SheetPlan {
        side: SheetSide::Front,
        index: pair,
        cells: (0..per_sheet)
            .map(|position| front_source_index(pair, position, pages_per_sheet, total_pages))
            .collect(),
    });

    let backs = (0..pairs).map(|pair| SheetPlan {
        side: SheetSide::Back,
        index: pair,
        cells: (0..per_sheet)
            .map(|position| back_source_index(pair, position, pages_per_sheet, total_pages))
            .collect(),
    });

    fronts.chain(backs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_position() {
        // Single column: nothing to mirror
        assert_eq!(mirrored_position(0, 1), 0);
        assert_eq!(mirrored_position(1, 1), 1);

        // Two columns: swap within each row
        assert_eq!(mirrored_position(0, 2), 1);
        assert_eq!(mirrored_position(1, 2), 0);
        assert_eq!(mirrored_position(6, 2), 7);

        // Four columns
        assert_eq!(mirrored_position(4, 4), 7);
        assert_eq!(mirrored_position(5, 4), 6);
        assert_eq!(mirrored_position(15, 4), 12);
    }

    #[test]
    fn test_mirror_is_an_involution() {
        for pps in PagesPerSheet::ALL {
            let cols = Grid::resolve(pps).cols;
            for p in 0..pps.count() {
                assert_eq!(mirrored_position(mirrored_position(p, cols), cols), p);
            }
        }
    }

    #[test]
    fn test_eight_pages_two_up() {
        let sheets = booklet_sheets(8, PagesPerSheet::Two);

        assert_eq!(sheets.len(), 4);
        assert_eq!(sheets[0].side, SheetSide::Front);
        assert_eq!(sheets[0].cells, vec![Some(0), Some(2)]);
        assert_eq!(sheets[1].side, SheetSide::Front);
        assert_eq!(sheets[1].cells, vec![Some(4), Some(6)]);
        assert_eq!(sheets[2].side, SheetSide::Back);
        assert_eq!(sheets[2].cells, vec![Some(1), Some(3)]);
        assert_eq!(sheets[3].side, SheetSide::Back);
        assert_eq!(sheets[3].cells, vec![Some(5), Some(7)]);
    }

    #[test]
    fn test_four_up_back_columns_are_swapped() {
        let sheets = booklet_sheets(8, PagesPerSheet::Four);

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].cells, vec![Some(0), Some(2), Some(4), Some(6)]);
        assert_eq!(sheets[1].cells, vec![Some(3), Some(1), Some(7), Some(5)]);
    }

    #[test]
    fn test_back_page_sits_behind_its_front_page() {
        // After a horizontal flip, back cell j lies behind front cell mirror(j)
        for pps in PagesPerSheet::ALL {
            let cols = Grid::resolve(pps).cols;
            let total = 2 * pps.count();
            for j in 0..pps.count() {
                let front = front_source_index(0, mirrored_position(j, cols), pps, total);
                let back = back_source_index(0, j, pps, total);
                assert_eq!(back, front.map(|f| f + 1), "{:?} cell {}", pps, j);
            }
        }
    }

    #[test]
    fn test_partial_last_batch() {
        let sheets = booklet_sheets(5, PagesPerSheet::Two);

        assert_eq!(sheets.len(), 4);
        assert_eq!(sheets[1].cells, vec![Some(4), None]);
        assert_eq!(sheets[3].cells, vec![None, None]);
    }

    #[test]
    fn test_every_page_exactly_once() {
        for pps in PagesPerSheet::ALL {
            for total in 0..70 {
                let sheets = booklet_sheets(total, pps);
                assert_eq!(sheets.len(), 2 * total.div_ceil(2 * pps.count()));

                let mut seen: Vec<usize> =
                    sheets.iter().flat_map(|s| s.occupied()).map(|(_, p)| p).collect();
                seen.sort_unstable();
                assert_eq!(seen, (0..total).collect::<Vec<_>>(), "{:?} {}", pps, total);
            }
        }
    }

    #[test]
    fn test_fronts_precede_backs() {
        let sheets = booklet_sheets(40, PagesPerSheet::Four);
        let first_back = sheets
            .iter()
            .position(|s| s.side == SheetSide::Back)
            .unwrap();
        assert_eq!(first_back, sheet_pair_count(40, PagesPerSheet::Four));
        assert!(sheets[first_back..].iter().all(|s| s.side == SheetSide::Back));
    }
}
