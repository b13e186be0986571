//! Output sheet rendering for imposition
//!
//! [`SheetCanvas`] is the drawing surface for one output sheet. It records
//! content-stream operations; [`add_sheet_page`] turns the recorded
//! operations into a page of the output document.

use crate::layout::Fit;
use crate::types::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

// =============================================================================
// Drawing Surface
// =============================================================================

/// Content-stream builder for one output sheet
#[derive(Default)]
pub struct SheetCanvas {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

impl SheetCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the graphics state (`q`)
    pub fn save_state(&mut self) {
        self.operations.push(Operation::new("q", vec![]));
    }

    /// Pop the graphics state (`Q`)
    pub fn restore_state(&mut self) {
        self.operations.push(Operation::new("Q", vec![]));
    }

    /// Concatenate a translation onto the current transform
    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.concat_matrix([1.0, 0.0, 0.0, 1.0, tx, ty]);
    }

    /// Concatenate a uniform scale onto the current transform
    pub fn scale(&mut self, factor: f32) {
        self.concat_matrix([factor, 0.0, 0.0, factor, 0.0, 0.0]);
    }

    fn concat_matrix(&mut self, matrix: [f32; 6]) {
        self.operations.push(Operation::new(
            "cm",
            matrix.into_iter().map(Object::Real).collect(),
        ));
    }

    /// Register an XObject under `name` and paint it (`Do`)
    pub fn draw_xobject(&mut self, name: &str, xobject_id: ObjectId) {
        self.xobjects
            .set(name.as_bytes(), Object::Reference(xobject_id));
        self.operations.push(Operation::new(
            "Do",
            vec![Object::Name(name.as_bytes().to_vec())],
        ));
    }

    /// Draw an XObject at a fitted position. The state is saved and
    /// restored around the draw so the transform stays local to it.
    pub fn place_xobject(&mut self, name: &str, xobject_id: ObjectId, fit: &Fit) {
        self.save_state();
        self.translate(fit.offset_x, fit.offset_y);
        self.scale(fit.scale);
        self.draw_xobject(name, xobject_id);
        self.restore_state();
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Encode the recorded operations, returning them with the XObject
    /// resources they reference.
    pub fn finish(self) -> Result<(Vec<u8>, Dictionary)> {
        let content = Content {
            operations: self.operations,
        };
        Ok((content.encode()?, self.xobjects))
    }
}

// =============================================================================
// Page Assembly
// =============================================================================

/// Add a sheet as a page of the output document.
///
/// # Arguments
/// * `output` - The output document
/// * `canvas` - Drawing operations for the sheet
/// * `sheet_width_pt` - Output page width in points
/// * `sheet_height_pt` - Output page height in points
/// * `parent_pages_id` - The parent Pages object ID
pub fn add_sheet_page(
    output: &mut Document,
    canvas: SheetCanvas,
    sheet_width_pt: f32,
    sheet_height_pt: f32,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let (content, xobjects) = canvas.finish()?;

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet_width_pt),
            Object::Real(sheet_height_pt),
        ]),
    );

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content_id = output.add_object(Stream::new(Dictionary::new(), content));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Create pages tree and catalog, finalize document structure
pub fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
