use serde::{Deserialize, Serialize};

/// A rectangle of grid cells combined into one, stored as top-left anchor
/// plus spans. Covers the closed rectangle
/// `[start_row, start_row + row_span - 1] × [start_col, start_col + col_span - 1]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeRegion {
    pub start_row: u32,
    pub start_col: u32,
    /// Number of rows covered, ≥ 1.
    pub row_span: u32,
    /// Number of columns covered, ≥ 1.
    pub col_span: u32,
}

impl MergeRegion {
    /// Region covering the normalized rectangle `rect`.
    pub fn from_rect(rect: GridRect) -> Self {
        MergeRegion {
            start_row: rect.start_row,
            start_col: rect.start_col,
            row_span: rect.end_row - rect.start_row + 1,
            col_span: rect.end_col - rect.start_col + 1,
        }
    }

    /// The auto merge for a comment row: one row, all columns.
    pub fn full_row(row: u32, col_count: u32) -> Self {
        MergeRegion {
            start_row: row,
            start_col: 0,
            row_span: 1,
            col_span: col_count,
        }
    }

    /// Last covered row index (inclusive).
    pub fn end_row(&self) -> u32 {
        self.start_row + self.row_span - 1
    }

    /// Last covered column index (inclusive).
    pub fn end_col(&self) -> u32 {
        self.start_col + self.col_span - 1
    }

    /// Whether this region geometrically intersects the rectangle.
    pub fn intersects(&self, rect: GridRect) -> bool {
        !(rect.end_row < self.start_row
            || rect.start_row > self.end_row()
            || rect.end_col < self.start_col
            || rect.start_col > self.end_col())
    }

    /// Whether this region shares at least one cell with another region.
    pub fn overlaps(&self, other: &MergeRegion) -> bool {
        !(other.end_row() < self.start_row
            || other.start_row > self.end_row()
            || other.end_col() < self.start_col
            || other.start_col > self.end_col())
    }

    /// Whether the region is a single-row merge spanning the entire
    /// current column width at `row` (the shape of an auto comment merge).
    pub fn is_full_row_at(&self, row: u32, col_count: u32) -> bool {
        self.row_span == 1
            && self.start_row == row
            && self.start_col == 0
            && self.col_span == col_count
    }
}

/// A normalized selection rectangle in grid coordinates
/// (`start_row ≤ end_row`, `start_col ≤ end_col`, all inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl GridRect {
    /// Build a rectangle from two corner cells, normalizing min/max.
    pub fn new(a_row: u32, a_col: u32, b_row: u32, b_col: u32) -> Self {
        GridRect {
            start_row: a_row.min(b_row),
            start_col: a_col.min(b_col),
            end_row: a_row.max(b_row),
            end_col: a_col.max(b_col),
        }
    }

    /// A single-cell rectangle.
    pub fn cell(row: u32, col: u32) -> Self {
        Self::new(row, col, row, col)
    }

    /// A full-height range of rows.
    pub fn rows(start_row: u32, end_row: u32) -> Self {
        Self::new(start_row, 0, end_row, u32::MAX)
    }

    /// A full-width range of columns.
    pub fn cols(start_col: u32, end_col: u32) -> Self {
        Self::new(0, start_col, u32::MAX, end_col)
    }

    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_col == self.end_col
    }

    /// Number of rows covered.
    pub fn row_count(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// Number of columns covered.
    pub fn col_count(&self) -> u32 {
        self.end_col - self.start_col + 1
    }
}
