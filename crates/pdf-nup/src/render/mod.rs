//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Reading source page boxes
//! - Creating XObjects from source pages
//! - Decoding filtered content streams
//! - Drawing placements onto output sheets
//! - Deep copying PDF objects

mod decode;
mod page;
mod xobject;

pub use page::*;
pub use xobject::{copy_object_deep, create_page_xobject, get_page_box};
