//! Source pages as Form XObjects
//!
//! Each source page is turned into a form that can be drawn on any sheet
//! with an arbitrary transform. Objects the page depends on (fonts,
//! images, nested forms) are copied into the output document.

use super::decode::decode_stream;
use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MAX_PAGE_TREE_DEPTH};
use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Nested `Contents` arrays followed before the rest is ignored
const MAX_CONTENT_NESTING: usize = 4;

// =============================================================================
// XObject Creation
// =============================================================================

/// Import a source page into `output` as a Form XObject.
///
/// The form's BBox is the page's visible box and its Matrix moves that
/// box's lower-left corner to the origin, so drawing the form at scale `s`
/// covers exactly `page_box.width * s` by `page_box.height * s`.
///
/// `cache` maps source objects to their copies and should be shared by
/// every page imported into the same output document.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    page_box: &Rect,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let mut content = Vec::new();
    if let Ok(contents) = page_dict.get(b"Contents") {
        append_content(source, contents, &mut content, 0)?;
    }

    let mut form = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        (
            "BBox",
            reals(&[page_box.x, page_box.y, page_box.right(), page_box.top()]),
        ),
        (
            "Matrix",
            reals(&[1.0, 0.0, 0.0, 1.0, -page_box.x, -page_box.y]),
        ),
    ]);

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources") {
        form.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(form, content)))
}

fn reals(values: &[f32]) -> Object {
    Object::Array(values.iter().copied().map(Object::Real).collect())
}

/// Append decoded page content to `out`. `Contents` may be a stream, a
/// reference to one, or an array of either; separate streams are joined
/// with a newline so operators at their edges stay apart.
fn append_content(doc: &Document, obj: &Object, out: &mut Vec<u8>, depth: usize) -> Result<()> {
    if depth > MAX_CONTENT_NESTING {
        return Ok(());
    }

    match obj {
        Object::Reference(id) => append_content(doc, doc.get_object(*id)?, out, depth + 1),
        Object::Array(items) => items
            .iter()
            .try_for_each(|item| append_content(doc, item, out, depth + 1)),
        Object::Stream(stream) => {
            if !out.is_empty() {
                out.push(b'\n');
            }
            out.extend_from_slice(&decode_stream(doc, stream)?);
            Ok(())
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Copy `obj` into `output`, following references into `source`.
///
/// Every referenced object is copied at most once per `cache`; repeated
/// and cyclic references resolve to the same output object.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    Ok(match obj {
        Object::Reference(id) => Object::Reference(copy_reference(output, source, *id, cache)?),
        Object::Dictionary(dict) => {
            Object::Dictionary(copy_dictionary(output, source, dict, cache)?)
        }
        Object::Array(items) => Object::Array(
            items
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect::<Result<_>>()?,
        ),
        Object::Stream(stream) => {
            let dict = copy_dictionary(output, source, &stream.dict, cache)?;
            let mut copy = Stream::new(dict, stream.content.clone());
            copy.allows_compression = stream.allows_compression;
            Object::Stream(copy)
        }
        other => other.clone(),
    })
}

fn copy_reference(
    output: &mut Document,
    source: &Document,
    id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    if let Some(&copied) = cache.get(&id) {
        return Ok(copied);
    }

    // Reserved before recursing so a cycle back to `id` finds it
    let new_id = output.new_object_id();
    cache.insert(id, new_id);

    let copied = copy_object_deep(output, source, source.get_object(id)?, cache)?;
    output.objects.insert(new_id, copied);
    Ok(new_id)
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    dict.iter()
        .map(|(key, value)| Ok((key.clone(), copy_object_deep(output, source, value, cache)?)))
        .collect()
}

// =============================================================================
// Page Boxes
// =============================================================================

/// Get a source page's bounding box in points.
///
/// The CropBox, clipped to the MediaBox, wins over the MediaBox; both may
/// be inherited from the page tree. Pages with neither fall back to US
/// Letter.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    // Surface a dangling page reference as an error
    doc.get_dictionary(page_id)?;

    let page_box = |key: &[u8]| {
        inherited_attribute(doc, page_id, key).and_then(|obj| box_rect(doc, obj))
    };

    let found = match (page_box(b"CropBox".as_slice()), page_box(b"MediaBox".as_slice())) {
        (Some(crop), Some(media)) => Some(crop.intersect(&media)),
        (crop, media) => crop.or(media),
    };

    Ok(found.unwrap_or_else(|| {
        log::warn!(
            "page {:?} has no MediaBox or CropBox, assuming {}x{} pt",
            page_id,
            DEFAULT_PAGE_DIMENSIONS.0,
            DEFAULT_PAGE_DIMENSIONS.1
        );
        Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }))
}

/// Look up a page attribute on the page or its page-tree ancestors.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent_id).ok()?;
    }

    None
}

/// Parse a `[x1 y1 x2 y2]` box array, following references.
fn box_rect(doc: &Document, obj: &Object) -> Option<Rect> {
    let coords: Vec<f32> = resolve(doc, obj)
        .as_array()
        .ok()?
        .iter()
        .map(|item| resolve(doc, item).as_float().ok())
        .collect::<Option<_>>()?;

    match coords[..] {
        [x1, y1, x2, y2] => Some(Rect::from_corners(x1, y1, x2, y2)),
        _ => None,
    }
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}
