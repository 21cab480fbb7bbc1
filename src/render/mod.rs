//! Read-only projections of a template: the fillable web form and the
//! spreadsheet export plan.
//!
//! Both projections are pure functions of the document (plus submitted
//! data, for exports); neither mutates it. The spreadsheet projection
//! prepends a fixed preamble above the grid, so grid row coordinates
//! must be translated before they are usable as sheet coordinates.

mod export;
mod form;

pub use export::*;
pub use form::*;

/// Sheet row (0-based) of the report title.
pub const TITLE_ROW: u32 = 0;
/// Sheet row of the municipality/date line.
pub const META_ROW: u32 = 1;
/// Sheet row of the column header band. Row 2 is left blank.
pub const HEADER_ROW: u32 = 3;
/// First sheet row carrying template grid data.
pub const DATA_START_ROW: u32 = 4;

/// Translate a template grid row into its sheet row.
pub fn grid_to_sheet_row(grid_row: u32) -> u32 {
    grid_row + DATA_START_ROW
}

/// Translate a sheet row back into a grid row, `None` for preamble rows.
pub fn sheet_to_grid_row(sheet_row: u32) -> Option<u32> {
    sheet_row.checked_sub(DATA_START_ROW)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn grid_rows_land_below_the_preamble() {
        assert_eq!(grid_to_sheet_row(0), 4);
        assert_eq!(grid_to_sheet_row(7), 11);
    }

    #[test]
    fn preamble_rows_have_no_grid_counterpart() {
        for sheet_row in [TITLE_ROW, META_ROW, 2, HEADER_ROW] {
            assert_eq!(sheet_to_grid_row(sheet_row), None);
        }
        assert_eq!(sheet_to_grid_row(DATA_START_ROW), Some(0));
        assert_eq!(sheet_to_grid_row(9), Some(5));
    }
}
