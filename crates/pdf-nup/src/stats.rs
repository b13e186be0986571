use crate::layout::{Grid, plan_sheets, sheet_pair_count};
use crate::options::ImpositionOptions;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for the imposition
pub fn calculate_statistics(
    document: &Document,
    options: &ImpositionOptions,
) -> Result<ImpositionStatistics> {
    statistics_for_page_count(document.get_pages().len(), options)
}

/// Statistics for a document of `source_pages` pages, without loading it
pub fn statistics_for_page_count(
    source_pages: usize,
    options: &ImpositionOptions,
) -> Result<ImpositionStatistics> {
    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    let grid = Grid::resolve(options.pages_per_sheet);
    let plans = plan_sheets(source_pages, options.pages_per_sheet, options.mode);

    let sheet_pairs = match options.mode {
        ImposeMode::Sequential => None,
        ImposeMode::Foldable => Some(sheet_pair_count(source_pages, options.pages_per_sheet)),
    };

    Ok(ImpositionStatistics {
        source_pages,
        output_sheets: plans.len(),
        sheet_pairs,
        empty_cells: plans.iter().map(|plan| plan.empty_cells()).sum(),
        columns: grid.cols,
        rows: grid.rows,
    })
}
