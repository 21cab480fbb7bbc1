//! Structural acceptance check run on a candidate template at save time.
//!
//! The candidate is treated as untrusted wire input even though it is
//! normally authored by the editor. The check covers shape and typing
//! only: non-overlap and in-bounds placement of merges are editor
//! invariants and are deliberately not re-verified here (documents that
//! bypass the editor get their out-of-range merges dropped at index
//! build time instead).

use crate::schema::{TemplatePayload, ROW_KIND_COMMENT, ROW_KIND_DATA};

/// Why a candidate template was rejected. The `Display` text is the
/// user-facing rejection reason; nothing is persisted on rejection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("template name cannot be empty")]
    EmptyName,

    #[error("template must have at least one column")]
    NoHeaders,

    #[error("column {index} has an empty name")]
    EmptyHeaderName { index: usize },

    #[error("column {index} has unknown type \"{found}\" (expected \"text\" or \"number\")")]
    UnknownHeaderType { index: usize, found: String },

    #[error("column name \"{name}\" is used more than once")]
    DuplicateHeaderName { name: String },

    #[error("template must have at least one row")]
    NoRows,

    #[error("row {index} has unknown kind \"{found}\" (expected \"normal\" or \"comment\")")]
    UnknownRowKind { index: usize, found: String },

    #[error("merge region {index} is missing startRow/startCol")]
    MergeMissingAnchor { index: usize },

    #[error("merge region {index} has bad coordinates or size")]
    MergeBadGeometry { index: usize },

    #[error("merge regions overlap")]
    OverlappingMerges,
}

/// Validate a save request (name + template body).
///
/// First failure wins; on success the payload is safe to hand to a
/// [`crate::store::TemplateStore`].
pub fn validate(payload: &TemplatePayload) -> Result<(), ValidationError> {
    if payload.template_name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if payload.headers.is_empty() {
        return Err(ValidationError::NoHeaders);
    }
    for (index, header) in payload.headers.iter().enumerate() {
        if header.name.trim().is_empty() {
            return Err(ValidationError::EmptyHeaderName { index });
        }
        let kind = header.kind.as_deref().unwrap_or("text");
        if kind != "text" && kind != "number" {
            return Err(ValidationError::UnknownHeaderType {
                index,
                found: kind.to_string(),
            });
        }
    }

    if payload.structure.rows.is_empty() {
        return Err(ValidationError::NoRows);
    }
    for (index, row) in payload.structure.rows.iter().enumerate() {
        let kind = row.kind();
        if kind != ROW_KIND_DATA && kind != ROW_KIND_COMMENT {
            return Err(ValidationError::UnknownRowKind {
                index,
                found: kind.to_string(),
            });
        }
    }

    for (index, merge) in payload.structure.merges.iter().enumerate() {
        let (Some(start_row), Some(start_col)) = (merge.start_row, merge.start_col) else {
            return Err(ValidationError::MergeMissingAnchor { index });
        };
        if start_row < 0 || start_col < 0 || merge.row_span < 1 || merge.col_span < 1 {
            return Err(ValidationError::MergeBadGeometry { index });
        }
    }

    Ok(())
}
