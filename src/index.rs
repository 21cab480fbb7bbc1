//! Derived merge lookup for a grid.
//!
//! Merge regions are stored as a plain list of rectangles on the
//! document; every renderer needs the inverse view — "is this cell the
//! top-left anchor of a region, and with what spans, or is it swallowed
//! by one?". [`MergeIndex`] computes that view once per grid size and is
//! recomputed on demand after every document mutation; it owns no state
//! of its own.

use std::collections::{HashMap, HashSet};

use crate::types::MergeRegion;

/// Spans of a merge region, recorded at its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row_span: u32,
    pub col_span: u32,
}

/// Anchor/suppressed lookup derived from a merge list and the grid size.
#[derive(Debug, Clone, Default)]
pub struct MergeIndex {
    anchors: HashMap<(u32, u32), Span>,
    suppressed: HashSet<(u32, u32)>,
}

impl MergeIndex {
    /// Build the index for a `row_count × col_count` grid.
    ///
    /// Regions whose rectangle does not fit inside the grid are silently
    /// dropped: the editor cannot produce them, but a document loaded
    /// from storage can. A region colliding with an already-indexed one
    /// is dropped the same way, so the derived view is always disjoint
    /// even for untrusted input.
    pub fn build(row_count: u32, col_count: u32, merges: &[MergeRegion]) -> Self {
        let mut index = MergeIndex::default();

        for region in merges {
            if region.row_span == 0 || region.col_span == 0 {
                log::debug!("dropping degenerate merge region {region:?}");
                continue;
            }
            // Widened so stored geometry near u32::MAX cannot overflow.
            let end_row = u64::from(region.start_row) + u64::from(region.row_span) - 1;
            let end_col = u64::from(region.start_col) + u64::from(region.col_span) - 1;
            if end_row >= u64::from(row_count) || end_col >= u64::from(col_count) {
                log::debug!(
                    "dropping out-of-range merge region {region:?} for {row_count}x{col_count} grid"
                );
                continue;
            }
            if index.occupies_any(region) {
                log::debug!("dropping merge region {region:?} colliding with an earlier one");
                continue;
            }

            index.anchors.insert(
                (region.start_row, region.start_col),
                Span {
                    row_span: region.row_span,
                    col_span: region.col_span,
                },
            );
            for row in region.start_row..=region.end_row() {
                for col in region.start_col..=region.end_col() {
                    if row == region.start_row && col == region.start_col {
                        continue;
                    }
                    index.suppressed.insert((row, col));
                }
            }
        }

        index
    }

    fn occupies_any(&self, region: &MergeRegion) -> bool {
        for row in region.start_row..=region.end_row() {
            for col in region.start_col..=region.end_col() {
                if self.anchors.contains_key(&(row, col)) || self.suppressed.contains(&(row, col)) {
                    return true;
                }
            }
        }
        false
    }

    /// Spans recorded at an anchor cell, `None` for plain cells.
    pub fn anchor(&self, row: u32, col: u32) -> Option<Span> {
        self.anchors.get(&(row, col)).copied()
    }

    /// Whether a non-anchor cell is swallowed by a merge region.
    pub fn is_suppressed(&self, row: u32, col: u32) -> bool {
        self.suppressed.contains(&(row, col))
    }

    /// Number of anchor cells.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Number of suppressed cells.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }

    /// Iterate over anchors as `((row, col), span)`.
    pub fn anchors(&self) -> impl Iterator<Item = (&(u32, u32), &Span)> {
        self.anchors.iter()
    }

    /// Iterate over suppressed cells.
    pub fn suppressed(&self) -> impl Iterator<Item = &(u32, u32)> {
        self.suppressed.iter()
    }
}
