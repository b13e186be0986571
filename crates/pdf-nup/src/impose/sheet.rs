//! Sheet rendering for imposition

use crate::layout::{GridLayout, Rect, SheetPlan, calculate_placements};
use crate::render::{SheetCanvas, add_sheet_page, create_page_xobject};
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::collections::HashMap;

/// Renders planned sheets into an output document.
///
/// Each source page is imported as a Form XObject once per call and
/// reused by every sheet that draws it.
pub(crate) struct SheetRenderer<'a> {
    source: &'a Document,
    page_ids: &'a [ObjectId],
    page_boxes: &'a [Rect],
    layout: &'a GridLayout,
    pages_tree_id: ObjectId,
    /// Source page index -> imported XObject
    xobjects: HashMap<usize, ObjectId>,
    /// Source object -> copied output object
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> SheetRenderer<'a> {
    pub(crate) fn new(
        source: &'a Document,
        page_ids: &'a [ObjectId],
        page_boxes: &'a [Rect],
        layout: &'a GridLayout,
        pages_tree_id: ObjectId,
    ) -> Self {
        Self {
            source,
            page_ids,
            page_boxes,
            layout,
            pages_tree_id,
            xobjects: HashMap::new(),
            copied: HashMap::new(),
        }
    }

    /// Render one sheet and return its page id.
    pub(crate) fn render(&mut self, output: &mut Document, plan: &SheetPlan) -> Result<ObjectId> {
        let placements = calculate_placements(self.layout, plan, self.page_boxes);
        let mut canvas = SheetCanvas::new();

        for placement in &placements {
            let xobject_id = self.xobject_for(output, placement.source_page)?;
            let name = format!("P{}", placement.source_page);
            canvas.place_xobject(&name, xobject_id, &placement.fit);
        }

        log::debug!(
            "{:?} sheet {}: {} placements, {} empty cells",
            plan.side,
            plan.index,
            placements.len(),
            plan.empty_cells()
        );

        add_sheet_page(
            output,
            canvas,
            self.layout.sheet_width_pt,
            self.layout.sheet_height_pt,
            self.pages_tree_id,
        )
    }

    fn xobject_for(&mut self, output: &mut Document, source_page: usize) -> Result<ObjectId> {
        if let Some(&id) = self.xobjects.get(&source_page) {
            return Ok(id);
        }

        // Plans only reference pages below the document's page count, and
        // one box was read per page
        debug_assert!(source_page < self.page_ids.len());
        debug_assert_eq!(self.page_ids.len(), self.page_boxes.len());
        let page_id = self.page_ids[source_page];
        let page_box = self.page_boxes[source_page];

        let id = create_page_xobject(output, self.source, page_id, &page_box, &mut self.copied)?;
        self.xobjects.insert(source_page, id);
        Ok(id)
    }
}
