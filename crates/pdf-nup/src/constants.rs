//! Units, fallback sizes and output metadata

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Size assumed for source pages with no MediaBox or CropBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Output
// =============================================================================

/// PDF version written to imposed documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

/// Content type of imposed output
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Suggested download name for imposed output
pub const OUTPUT_FILENAME: &str = "Pages_Per_Sheet.pdf";

// =============================================================================
// Page Tree
// =============================================================================

/// Ancestors searched for inherited page attributes before giving up.
/// Guards against cyclic Parent links in damaged files.
pub const MAX_PAGE_TREE_DEPTH: usize = 64;
