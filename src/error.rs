//! Structured error types for gridform.
//!
//! Every user-facing refusal carries its reason in the error's `Display`;
//! nothing in the core panics or partially applies a change.

use crate::editor::EditError;
use crate::submission::SubmissionError;
use crate::validator::ValidationError;

/// All errors that can occur while editing, validating, or projecting a template.
#[derive(Debug, thiserror::Error)]
pub enum GridformError {
    /// An editor operation was refused; the document is unchanged.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// A candidate template failed the structural acceptance check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submitted table failed the per-cell value check.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// JSON (de)serialization of the wire shape failed.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure reported by a template store implementation.
    #[error("template store: {0}")]
    Store(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridformError>;
