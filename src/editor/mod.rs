//! The template constructor's mutation surface.
//!
//! `GridEditor` owns one [`TemplateDocument`] for the duration of an
//! administrative editing session. Every operation is atomic: it either
//! fully succeeds, or refuses with an [`EditError`] and leaves the
//! document untouched. Refusal messages are user-facing.

use std::collections::BTreeMap;

use crate::types::{DataType, GridRect, Header, MergeRegion, Row, RowKind, TemplateDocument};

/// Row count used by `generate` when given a non-positive count.
pub const DEFAULT_ROW_COUNT: u32 = 5;
/// Column count used by `generate` when given a non-positive count.
pub const DEFAULT_COL_COUNT: u32 = 4;

/// Why an editor operation was refused. The document is unchanged
/// whenever one of these is returned.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("select at least two cells to merge")]
    SingleCellMerge,

    #[error("the selection intersects an already merged region; unmerge it first")]
    MergeOverlap,

    #[error("the selection reaches outside the table")]
    SelectionOutOfBounds,

    #[error("no merged cells in the selected range")]
    NothingToUnmerge,

    #[error("column name cannot be empty")]
    EmptyHeaderName,

    #[error("column name \"{0}\" is already used")]
    DuplicateHeaderName(String),

    #[error("cannot delete every row")]
    CannotDeleteAllRows,

    #[error("cannot delete every column")]
    CannotDeleteAllColumns,

    #[error("no column at index {0}")]
    HeaderIndexOutOfRange(usize),

    #[error("no row at index {0}")]
    RowIndexOutOfRange(usize),
}

/// Single-session editor for one template document.
#[derive(Debug)]
pub struct GridEditor {
    document: TemplateDocument,
}

impl GridEditor {
    /// Start editing an existing document.
    pub fn new(document: TemplateDocument) -> Self {
        GridEditor { document }
    }

    /// Start a session on the built-in default document.
    pub fn with_default() -> Self {
        GridEditor {
            document: TemplateDocument::default(),
        }
    }

    /// Read access to the document being edited.
    pub fn document(&self) -> &TemplateDocument {
        &self.document
    }

    /// Finish the session and take the document.
    pub fn into_document(self) -> TemplateDocument {
        self.document
    }

    /// Rename the template.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.document.name = name.into();
    }

    /// Rebuild the grid to the requested size.
    ///
    /// Headers are resized in place (default text columns appended, or
    /// the list truncated); all rows are rebuilt empty with the last row
    /// a comment; existing merges are discarded and replaced by the sole
    /// comment-row merge. Non-positive counts fall back to
    /// [`DEFAULT_ROW_COUNT`] / [`DEFAULT_COL_COUNT`].
    pub fn generate(&mut self, row_count: i64, col_count: i64) {
        let row_count = u32::try_from(row_count)
            .ok()
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_ROW_COUNT);
        let col_count = u32::try_from(col_count)
            .ok()
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_COL_COUNT);

        let doc = &mut self.document;
        let target = usize::try_from(col_count).unwrap_or(usize::MAX);
        if target <= doc.headers.len() {
            doc.headers.truncate(target);
        } else {
            for position in doc.headers.len()..target {
                let name = fresh_column_name(&doc.headers, position + 1);
                doc.headers.push(Header::text(name));
            }
        }

        let header_names: Vec<String> = doc.headers.iter().map(|h| h.name.clone()).collect();
        let comment_row = row_count - 1;
        doc.rows.clear();
        for row in 0..row_count {
            if row == comment_row {
                doc.rows.push(Row::empty_comment());
            } else {
                doc.rows
                    .push(Row::empty_data(header_names.iter().map(String::as_str)));
            }
        }

        doc.merges = vec![MergeRegion::full_row(comment_row, col_count)];
        log::debug!("generated {row_count}x{col_count} grid for template \"{}\"", doc.name);
    }

    /// Set every cell value (including comment texts) to the empty
    /// string; headers, row kinds, and merges are unchanged.
    pub fn clear_contents(&mut self) {
        for row in &mut self.document.rows {
            row.clear();
        }
    }

    /// Replace the whole document with the built-in default.
    pub fn reset_to_default(&mut self) {
        self.document = TemplateDocument::default();
    }

    /// Rename a column, migrating every row's cell entry to the new key.
    ///
    /// Refused when the new name trims to empty or duplicates another
    /// column's name.
    pub fn rename_header(&mut self, index: usize, new_name: &str) -> Result<(), EditError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(EditError::EmptyHeaderName);
        }
        let old_name = self
            .document
            .headers
            .get(index)
            .map(|h| h.name.clone())
            .ok_or(EditError::HeaderIndexOutOfRange(index))?;
        if trimmed == old_name {
            return Ok(());
        }
        if self.document.headers.iter().any(|h| h.name == trimmed) {
            return Err(EditError::DuplicateHeaderName(trimmed.to_string()));
        }

        if let Some(header) = self.document.headers.get_mut(index) {
            header.name = trimmed.to_string();
        }
        for row in &mut self.document.rows {
            row.rename_cell_key(&old_name, trimmed);
        }
        Ok(())
    }

    /// Change a column's value type. No cascading effects.
    pub fn set_header_type(&mut self, index: usize, data_type: DataType) -> Result<(), EditError> {
        let header = self
            .document
            .headers
            .get_mut(index)
            .ok_or(EditError::HeaderIndexOutOfRange(index))?;
        header.data_type = data_type;
        Ok(())
    }

    /// Toggle a column's read-only flag. No cascading effects.
    pub fn set_header_read_only(&mut self, index: usize, read_only: bool) -> Result<(), EditError> {
        let header = self
            .document
            .headers
            .get_mut(index)
            .ok_or(EditError::HeaderIndexOutOfRange(index))?;
        header.read_only = read_only;
        Ok(())
    }

    /// Change a row's kind.
    ///
    /// The row's auto comment merge (single-row, full current width) is
    /// removed in either direction; switching to `Comment` additionally
    /// removes any other merge touching the row and adds a fresh
    /// full-width merge, so merge regions stay pairwise disjoint.
    pub fn set_row_kind(&mut self, row_index: usize, kind: RowKind) -> Result<(), EditError> {
        let col_count = self.document.column_count();
        let grid_row = u32::try_from(row_index).map_err(|_| EditError::RowIndexOutOfRange(row_index))?;
        let row = self
            .document
            .rows
            .get_mut(row_index)
            .ok_or(EditError::RowIndexOutOfRange(row_index))?;

        match kind {
            RowKind::Comment => {
                if let Row::Data { cells } = row {
                    let text = cells
                        .get(crate::schema::COMMENT_KEY)
                        .cloned()
                        .unwrap_or_default();
                    *row = Row::Comment { text };
                }
                let row_rect = GridRect::rows(grid_row, grid_row);
                self.document.merges.retain(|m| !m.intersects(row_rect));
                self.document
                    .merges
                    .push(MergeRegion::full_row(grid_row, col_count));
            }
            RowKind::Data => {
                if row.is_comment() {
                    let header_names: Vec<String> = self
                        .document
                        .headers
                        .iter()
                        .map(|h| h.name.clone())
                        .collect();
                    if let Some(row) = self.document.rows.get_mut(row_index) {
                        *row = Row::Data {
                            cells: header_names
                                .into_iter()
                                .map(|name| (name, String::new()))
                                .collect::<BTreeMap<_, _>>(),
                        };
                    }
                }
                self.document
                    .merges
                    .retain(|m| !m.is_full_row_at(grid_row, col_count));
            }
        }
        Ok(())
    }

    /// Merge the selected rectangle into one region.
    ///
    /// Refused for a single cell, for a selection outside the grid, and
    /// when the rectangle intersects any existing region (all-or-nothing:
    /// no partial overlap, no splitting).
    pub fn merge_range(&mut self, rect: GridRect) -> Result<(), EditError> {
        if rect.is_single_cell() {
            return Err(EditError::SingleCellMerge);
        }
        if rect.end_row >= self.document.row_count() || rect.end_col >= self.document.column_count()
        {
            return Err(EditError::SelectionOutOfBounds);
        }
        if self.document.merges.iter().any(|m| m.intersects(rect)) {
            return Err(EditError::MergeOverlap);
        }
        self.document.merges.push(MergeRegion::from_rect(rect));
        Ok(())
    }

    /// Remove every merge region intersecting the rectangle.
    ///
    /// A region only partially inside the selection is removed in full,
    /// not trimmed. Refused (and a no-op) when nothing intersects.
    pub fn unmerge_range(&mut self, rect: GridRect) -> Result<(), EditError> {
        let before = self.document.merges.len();
        self.document.merges.retain(|m| !m.intersects(rect));
        if self.document.merges.len() == before {
            return Err(EditError::NothingToUnmerge);
        }
        Ok(())
    }

    /// Delete a contiguous range of rows (inclusive, order-insensitive).
    ///
    /// Refused when the range misses the grid or would leave zero rows.
    /// On success all merge regions are discarded; surviving regions are
    /// never renumbered.
    pub fn delete_rows(&mut self, start_row: u32, end_row: u32) -> Result<(), EditError> {
        let (start, end) = (start_row.min(end_row), start_row.max(end_row));
        let row_count = self.document.rows.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        if start >= row_count {
            return Err(EditError::RowIndexOutOfRange(start));
        }
        let end = usize::try_from(end).unwrap_or(usize::MAX).min(row_count - 1);
        let deleted = end - start + 1;
        if deleted >= row_count {
            return Err(EditError::CannotDeleteAllRows);
        }

        self.document.rows.drain(start..=end);
        self.document.merges.clear();
        Ok(())
    }

    /// Delete a contiguous range of columns (inclusive, order-insensitive).
    ///
    /// Every row's cell map is rebuilt to contain exactly the surviving
    /// header names. Refused when the range misses the grid or would
    /// leave zero columns. On success all merge regions are discarded.
    pub fn delete_cols(&mut self, start_col: u32, end_col: u32) -> Result<(), EditError> {
        let (start, end) = (start_col.min(end_col), start_col.max(end_col));
        let col_count = self.document.headers.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX);
        if start >= col_count {
            return Err(EditError::HeaderIndexOutOfRange(start));
        }
        let end = usize::try_from(end).unwrap_or(usize::MAX).min(col_count - 1);
        let deleted = end - start + 1;
        if deleted >= col_count {
            return Err(EditError::CannotDeleteAllColumns);
        }

        self.document.headers.drain(start..=end);
        let surviving: Vec<String> = self
            .document
            .headers
            .iter()
            .map(|h| h.name.clone())
            .collect();
        for row in &mut self.document.rows {
            row.retain_cells(surviving.iter().map(String::as_str));
        }
        self.document.merges.clear();
        Ok(())
    }
}

/// Default name for an appended column («Столбец N»), advancing N past
/// any name already taken so header names stay unique.
fn fresh_column_name(headers: &[Header], seed: usize) -> String {
    let mut n = seed;
    loop {
        let name = format!("Столбец {n}");
        if !headers.iter().any(|h| h.name == name) {
            return name;
        }
        n += 1;
    }
}
