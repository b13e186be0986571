//! Geometry and sheet-plan types shared by the layout modules
//!
//! Page assignment produces [`SheetPlan`]s; placement turns their occupied
//! cells into [`Placement`]s that the renderer draws.

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Sequential mode: single-sided sheet
    Single,
    /// Foldable mode: front of a sheet pair (odd pages)
    Front,
    /// Foldable mode: back of a sheet pair (even pages, mirrored columns)
    Back,
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl GridPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rows and columns of the page grid on one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

/// Grid resolved against a concrete sheet size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub grid: Grid,
    /// Width of the whole sheet in points
    pub sheet_width_pt: f32,
    /// Height of the whole sheet in points
    pub sheet_height_pt: f32,
    /// Width of each cell in points
    pub cell_width_pt: f32,
    /// Height of each cell in points
    pub cell_height_pt: f32,
}

/// Axis-aligned rectangle in points. `(x, y)` is the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from two opposite corners given in any order
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }

    /// Overlap of two rects. Disjoint rects give a zero-sized result.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Rect::new(
            x,
            y,
            (self.right().min(other.right()) - x).max(0.0),
            (self.top().min(other.top()) - y).max(0.0),
        )
    }

    /// Both dimensions strictly positive
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Uniform scale plus translation that fits a page box into a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Final placement of a source page on an output sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Source page index (0-based)
    pub source_page: usize,
    /// Cell position index (row * cols + col)
    pub position: usize,
    pub fit: Fit,
}

/// Page assignment for one output sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    pub side: SheetSide,
    /// Sheet index within its pass (sheet-pair index in foldable mode)
    pub index: usize,
    /// Source page for each cell, in cell order (None = empty cell)
    pub cells: Vec<Option<usize>>,
}

impl SheetPlan {
    /// Occupied cells as (position, source page), in cell order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(position, source)| source.map(|page| (position, page)))
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}
