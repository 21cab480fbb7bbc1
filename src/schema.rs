//! Persisted wire shape for templates.
//!
//! This is the JSON exchanged with the store, the form renderer, and the
//! export collaborator:
//!
//! ```json
//! {
//!   "headers": [ { "name": "...", "type": "text", "readonly": false } ],
//!   "structure": {
//!     "rows": [ { "rowType": "normal", "cells": { "...": "..." } } ],
//!     "merges": [ { "startRow": 0, "startCol": 0, "rowSpan": 1, "colSpan": 2 } ]
//!   }
//! }
//! ```
//!
//! Deserialization is deliberately tolerant (missing fields default, a row
//! may be a bare cell map in the legacy shape); strict acceptance happens
//! in [`crate::validator`], and normalization into the typed model happens
//! in [`crate::types::TemplateDocument::from_schema`].

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Conventional key of the indicator-name column.
pub const INDICATOR_KEY: &str = "Показатели";
/// Conventional key of the unit-of-measure column.
pub const UNIT_KEY: &str = "Единица измерения";
/// Sentinel cell key under which a comment row stores its text.
pub const COMMENT_KEY: &str = "Комментарий";

/// Wire row kind for data rows.
pub const ROW_KIND_DATA: &str = "normal";
/// Wire row kind for comment rows.
pub const ROW_KIND_COMMENT: &str = "comment";

/// Accept `true`/`false`, numbers, and strings the way loose JSON
/// producers send flags (`1`, `"1"`, `0`, `""`).
fn de_truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty() && s != "0",
        _ => false,
    })
}

/// A column definition as persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    #[serde(default)]
    pub name: String,
    /// "text" or "number"; anything else is rejected at save time and
    /// coerced to text on load.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_truthy")]
    pub readonly: bool,
}

/// The current row shape: an explicit kind plus a cell map.
///
/// Unknown fields are denied so the untagged [`RowSchema`] can tell this
/// apart from a legacy bare cell map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShapedRowSchema {
    #[serde(rename = "rowType", default = "default_row_kind")]
    pub row_type: String,
    #[serde(default)]
    pub cells: BTreeMap<String, String>,
}

/// One persisted row: either the current `{rowType, cells}` shape or the
/// legacy shape where the row is directly a cell map (treated as a data row).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RowSchema {
    Shaped(ShapedRowSchema),
    Legacy(BTreeMap<String, String>),
}

fn default_row_kind() -> String {
    ROW_KIND_DATA.to_string()
}

impl RowSchema {
    /// A row in the current shape.
    pub fn shaped(row_type: impl Into<String>, cells: BTreeMap<String, String>) -> Self {
        RowSchema::Shaped(ShapedRowSchema {
            row_type: row_type.into(),
            cells,
        })
    }

    /// The row kind string, `"normal"` for legacy rows.
    pub fn kind(&self) -> &str {
        match self {
            RowSchema::Shaped(row) => &row.row_type,
            RowSchema::Legacy(_) => ROW_KIND_DATA,
        }
    }

    /// The cell map regardless of shape.
    pub fn cells(&self) -> &BTreeMap<String, String> {
        match self {
            RowSchema::Shaped(row) => &row.cells,
            RowSchema::Legacy(cells) => cells,
        }
    }
}

/// A persisted merge region. Anchor coordinates are optional so the
/// validator can report them missing; spans default to 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergeSchema {
    #[serde(default)]
    pub start_row: Option<i64>,
    #[serde(default)]
    pub start_col: Option<i64>,
    #[serde(default = "default_span")]
    pub row_span: i64,
    #[serde(default = "default_span")]
    pub col_span: i64,
}

fn default_span() -> i64 {
    1
}

/// The `structure` subtree: rows plus merges.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StructureSchema {
    #[serde(default)]
    pub rows: Vec<RowSchema>,
    #[serde(default)]
    pub merges: Vec<MergeSchema>,
}

/// A full persisted template body (`headers` + `structure`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TemplateSchema {
    #[serde(default)]
    pub headers: Vec<HeaderSchema>,
    #[serde(default)]
    pub structure: StructureSchema,
}

/// The save request sent by the constructor UI: a name, an activation
/// flag, and the template body.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TemplatePayload {
    #[serde(default)]
    pub template_name: String,
    #[serde(default, deserialize_with = "de_truthy")]
    pub make_active: bool,
    #[serde(default)]
    pub headers: Vec<HeaderSchema>,
    #[serde(default)]
    pub structure: StructureSchema,
}

impl TemplatePayload {
    /// The template body carried by this payload.
    pub fn schema(&self) -> TemplateSchema {
        TemplateSchema {
            headers: self.headers.clone(),
            structure: self.structure.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn shaped_row_parses() {
        let json = r#"{"rowType":"comment","cells":{"Комментарий":"итог"}}"#;
        let row: RowSchema = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind(), ROW_KIND_COMMENT);
        assert_eq!(row.cells().get(COMMENT_KEY).map(String::as_str), Some("итог"));
    }

    #[test]
    fn legacy_row_is_treated_as_data() {
        let json = r#"{"Показатели":"Население","2022":"120"}"#;
        let row: RowSchema = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind(), ROW_KIND_DATA);
        assert_eq!(row.cells().len(), 2);
    }

    #[test]
    fn shaped_row_without_kind_defaults_to_data() {
        let json = r#"{"cells":{"A":"1"}}"#;
        let row: RowSchema = serde_json::from_str(json).unwrap();
        assert_eq!(row.kind(), ROW_KIND_DATA);
        assert_eq!(row.cells().get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn merge_spans_default_to_one() {
        let json = r#"{"startRow":2,"startCol":0}"#;
        let merge: MergeSchema = serde_json::from_str(json).unwrap();
        assert_eq!(merge.start_row, Some(2));
        assert_eq!(merge.row_span, 1);
        assert_eq!(merge.col_span, 1);
    }

    #[test]
    fn truthy_flags_accept_numbers_and_strings() {
        let payload: TemplatePayload =
            serde_json::from_str(r#"{"template_name":"T","make_active":1}"#).unwrap();
        assert!(payload.make_active);

        let payload: TemplatePayload =
            serde_json::from_str(r#"{"template_name":"T","make_active":"0"}"#).unwrap();
        assert!(!payload.make_active);

        let header: HeaderSchema =
            serde_json::from_str(r#"{"name":"A","type":"text","readonly":true}"#).unwrap();
        assert!(header.readonly);
    }
}
