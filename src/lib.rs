//! gridform - grid template engine for data-collection portals
//!
//! Administrators design a report table (column headers with types and
//! read-only flags, data and comment rows, rectangular merged regions),
//! publish it, and respondents fill the projected form; accepted
//! submissions export to a spreadsheet plan. The crate covers:
//! - The template document model and its JSON wire shape
//! - The editor with all structural operations (generate, merge/unmerge,
//!   row/column deletion, header edits, row-kind switches)
//! - Save-time structural validation and submission value validation
//! - Form and spreadsheet projections
//! - A storage seam with an active/inactive template lifecycle
//!
//! # Usage
//!
//! ```
//! use gridform::editor::GridEditor;
//! use gridform::render::FormLayout;
//!
//! let mut editor = GridEditor::with_default();
//! editor.set_name("Отчёт за квартал");
//! editor.generate(8, 5);
//!
//! let form = FormLayout::build(editor.document());
//! assert_eq!(form.columns.len(), 5);
//! ```

pub mod editor;
pub mod error;
pub mod index;
pub mod render;
pub mod schema;
pub mod store;
pub mod submission;
pub mod validator;

pub mod types;

pub use error::{GridformError, Result};
pub use types::*;

/// Parse a save request from its JSON wire shape.
///
/// # Errors
/// Returns an error when the body is not valid JSON or does not match
/// the payload shape.
pub fn parse_payload(body: &str) -> Result<schema::TemplatePayload> {
    Ok(serde_json::from_str(body)?)
}

/// Serialize a document into its persisted JSON wire shape.
///
/// # Errors
/// Returns an error when serialization fails.
pub fn document_to_json(document: &TemplateDocument) -> Result<String> {
    Ok(serde_json::to_string(&document.to_schema())?)
}

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
