use crate::constants::mm_to_pt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Cannot decode page content: {0}")]
    ContentDecode(String),
    #[error("Source page {index} has a degenerate bounding box ({width} x {height})")]
    MalformedPage { index: usize, width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Output sheet sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
}

impl PaperSize {
    /// Resolve a paper name, case-insensitively. Unknown names fall back to A4.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "A3" => PaperSize::A3,
            "LETTER" => PaperSize::Letter,
            "LEGAL" => PaperSize::Legal,
            _ => PaperSize::A4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
            PaperSize::Letter => "Letter",
            PaperSize::Legal => "Legal",
        }
    }

    /// Portrait sheet dimensions (width, height) in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (mm_to_pt(210.0), mm_to_pt(297.0)),
            PaperSize::A3 => (mm_to_pt(297.0), mm_to_pt(420.0)),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
        }
    }
}

/// How source pages are distributed over output sheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImposeMode {
    /// Pages in reading order, sheet after sheet
    #[default]
    Sequential,
    /// Duplex booklet: all front sheets (odd pages), then all back sheets
    /// (even pages, columns mirrored)
    Foldable,
}

impl ImposeMode {
    /// Any name starting with "fold" (any case) selects foldable mode,
    /// everything else is sequential.
    pub fn from_name(name: &str) -> Self {
        if name.trim().to_ascii_lowercase().starts_with("fold") {
            ImposeMode::Foldable
        } else {
            ImposeMode::Sequential
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ImposeMode::Sequential => "sequential",
            ImposeMode::Foldable => "foldable",
        }
    }
}

/// Supported N-up counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagesPerSheet {
    Two,
    #[default]
    Four,
    Eight,
    Sixteen,
}

impl PagesPerSheet {
    pub const ALL: [PagesPerSheet; 4] = [
        PagesPerSheet::Two,
        PagesPerSheet::Four,
        PagesPerSheet::Eight,
        PagesPerSheet::Sixteen,
    ];

    pub fn count(self) -> usize {
        match self {
            PagesPerSheet::Two => 2,
            PagesPerSheet::Four => 4,
            PagesPerSheet::Eight => 8,
            PagesPerSheet::Sixteen => 16,
        }
    }

    /// Grid (columns, rows). 8-up and 16-up are layout conventions, so this
    /// is a fixed table rather than a formula.
    pub fn grid_dimensions(self) -> (usize, usize) {
        match self {
            PagesPerSheet::Two => (1, 2),
            PagesPerSheet::Four => (2, 2),
            PagesPerSheet::Eight => (2, 4),
            PagesPerSheet::Sixteen => (4, 4),
        }
    }
}

impl TryFrom<usize> for PagesPerSheet {
    type Error = ImposeError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            2 => Ok(PagesPerSheet::Two),
            4 => Ok(PagesPerSheet::Four),
            8 => Ok(PagesPerSheet::Eight),
            16 => Ok(PagesPerSheet::Sixteen),
            other => Err(ImposeError::Config(format!(
                "pages per sheet must be 2, 4, 8 or 16 (got {})",
                other
            ))),
        }
    }
}

impl From<PagesPerSheet> for usize {
    fn from(value: PagesPerSheet) -> Self {
        value.count()
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Total number of output sheets (fronts and backs both count in foldable mode)
    pub output_sheets: usize,
    /// Front/back sheet pairs (foldable mode only)
    pub sheet_pairs: Option<usize>,
    /// Cells left empty on the final, partially filled sheets
    pub empty_cells: usize,
    /// Grid columns per sheet
    pub columns: usize,
    /// Grid rows per sheet
    pub rows: usize,
}
