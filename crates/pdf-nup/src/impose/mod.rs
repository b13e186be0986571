//! N-up imposition - arranging several source pages on each output sheet
//!
//! This module orchestrates the imposition process:
//! 1. Read and validate source page boxes
//! 2. Resolve the grid and plan every sheet (sequential or foldable)
//! 3. Fit each placed page into its cell
//! 4. Render the sheets to the output PDF

mod io;
mod sheet;

pub use io::{load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};

use crate::constants::{OUTPUT_FILENAME, OUTPUT_PDF_VERSION, PDF_CONTENT_TYPE};
use crate::layout::{Rect, create_grid_layout, plan_sheets};
use crate::options::ImpositionOptions;
use crate::render::{finalize_document, get_page_box};
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use sheet::SheetRenderer;

/// Imposed PDF ready to hand back to a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImposedPdf {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: &'static str,
}

/// Main imposition function
pub async fn impose(source: &Document, options: &ImpositionOptions) -> Result<Document> {
    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_sync(&source, &options)).await?
}

/// Parse PDF bytes, impose them and serialize the result.
pub async fn impose_bytes(bytes: Vec<u8>, options: &ImpositionOptions) -> Result<ImposedPdf> {
    let options = options.clone();

    tokio::task::spawn_blocking(move || {
        let source = Document::load_mem(&bytes)?;
        let mut output = impose_sync(&source, &options)?;

        let mut writer = Vec::new();
        output.save_to(&mut writer)?;

        Ok::<_, ImposeError>(ImposedPdf {
            bytes: writer,
            content_type: PDF_CONTENT_TYPE,
            filename: OUTPUT_FILENAME,
        })
    })
    .await?
}

/// Blocking imposition of one source document.
pub fn impose_sync(source: &Document, options: &ImpositionOptions) -> Result<Document> {
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    let total_pages = page_ids.len();

    if total_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    let page_boxes = read_page_boxes(source, &page_ids)?;

    let (sheet_width_pt, sheet_height_pt) = options.paper_size.dimensions_pt();
    let layout = create_grid_layout(options.pages_per_sheet, sheet_width_pt, sheet_height_pt);
    let plans = plan_sheets(total_pages, options.pages_per_sheet, options.mode);

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut renderer = SheetRenderer::new(source, &page_ids, &page_boxes, &layout, pages_tree_id);

    let mut page_refs = Vec::with_capacity(plans.len());
    for plan in &plans {
        let page_id = renderer.render(&mut output, plan)?;
        page_refs.push(Object::Reference(page_id));
    }

    finalize_document(&mut output, pages_tree_id, page_refs);

    log::info!(
        "imposed {} pages onto {} {} sheets ({}-up, {})",
        total_pages,
        plans.len(),
        options.paper_size.name(),
        options.pages_per_sheet.count(),
        options.mode.name()
    );

    Ok(output)
}

/// Read every page box up front so a malformed page fails the whole
/// call before any sheet is built.
fn read_page_boxes(source: &Document, page_ids: &[ObjectId]) -> Result<Vec<Rect>> {
    page_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let page_box = get_page_box(source, id)?;
            if !page_box.is_drawable() {
                return Err(ImposeError::MalformedPage {
                    index,
                    width: page_box.width,
                    height: page_box.height,
                });
            }
            Ok(page_box)
        })
        .collect()
}
