use std::collections::BTreeMap;
use std::collections::HashSet;

use crate::index::MergeIndex;
use crate::schema::{
    self, HeaderSchema, MergeSchema, RowSchema, StructureSchema, TemplateSchema,
};
use crate::validator::ValidationError;

use super::{DataType, Header, MergeRegion, Row};

/// A report-table template: ordered column headers, ordered rows, and a
/// set of non-overlapping rectangular merge regions.
///
/// The document is a value type; all mutation goes through
/// [`crate::editor::GridEditor`], which maintains the invariants (unique
/// non-empty header names, cell keys ⊆ header names, pairwise-disjoint
/// merges, comment rows covered by their full-width merge, ≥1 header and
/// ≥1 row).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    pub(crate) name: String,
    pub(crate) headers: Vec<Header>,
    pub(crate) rows: Vec<Row>,
    pub(crate) merges: Vec<MergeRegion>,
}

impl TemplateDocument {
    /// Build a document from parts, checking the structural invariants.
    ///
    /// Intended for documents assembled outside the editor (tests,
    /// migrations). Checks: ≥1 header, ≥1 row, unique non-empty header
    /// names, pairwise non-overlapping merges.
    pub fn new(
        name: impl Into<String>,
        headers: Vec<Header>,
        rows: Vec<Row>,
        merges: Vec<MergeRegion>,
    ) -> Result<Self, ValidationError> {
        if headers.is_empty() {
            return Err(ValidationError::NoHeaders);
        }
        if rows.is_empty() {
            return Err(ValidationError::NoRows);
        }
        let mut seen = HashSet::new();
        for (index, header) in headers.iter().enumerate() {
            if header.name.trim().is_empty() {
                return Err(ValidationError::EmptyHeaderName { index });
            }
            if !seen.insert(header.name.as_str()) {
                return Err(ValidationError::DuplicateHeaderName {
                    name: header.name.clone(),
                });
            }
        }
        for (i, a) in merges.iter().enumerate() {
            for b in merges.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(ValidationError::OverlappingMerges);
                }
            }
        }
        Ok(TemplateDocument {
            name: name.into(),
            headers,
            rows,
            merges,
        })
    }

    /// Load a document from the persisted wire shape.
    ///
    /// Tolerant, matching how stored templates are read back: legacy bare
    /// cell maps become data rows, unknown header types become text, and
    /// merges with bad geometry are skipped. Returns `None` when the
    /// stored shape has no headers or no rows; callers substitute
    /// [`TemplateDocument::default`].
    pub fn from_schema(name: impl Into<String>, schema: &TemplateSchema) -> Option<Self> {
        if schema.headers.is_empty() || schema.structure.rows.is_empty() {
            return None;
        }

        let headers: Vec<Header> = schema
            .headers
            .iter()
            .map(|h| Header {
                name: h.name.trim().to_string(),
                data_type: DataType::from_wire(h.kind.as_deref().unwrap_or("text")),
                read_only: h.readonly,
            })
            .collect();

        let rows: Vec<Row> = schema
            .structure
            .rows
            .iter()
            .map(|row| {
                if row.kind() == schema::ROW_KIND_COMMENT {
                    Row::Comment {
                        text: row.cells().get(schema::COMMENT_KEY).cloned().unwrap_or_default(),
                    }
                } else {
                    Row::Data {
                        cells: row.cells().clone(),
                    }
                }
            })
            .collect();

        let merges: Vec<MergeRegion> = schema
            .structure
            .merges
            .iter()
            .filter_map(|m| {
                let start_row = u32::try_from(m.start_row?).ok()?;
                let start_col = u32::try_from(m.start_col?).ok()?;
                let row_span = u32::try_from(m.row_span).ok().filter(|s| *s >= 1)?;
                let col_span = u32::try_from(m.col_span).ok().filter(|s| *s >= 1)?;
                Some(MergeRegion {
                    start_row,
                    start_col,
                    row_span,
                    col_span,
                })
            })
            .collect();

        Some(TemplateDocument {
            name: name.into(),
            headers,
            rows,
            merges,
        })
    }

    /// Project the document back into the persisted wire shape.
    pub fn to_schema(&self) -> TemplateSchema {
        let headers = self
            .headers
            .iter()
            .map(|h| HeaderSchema {
                name: h.name.clone(),
                kind: Some(h.data_type.as_wire().to_string()),
                readonly: h.read_only,
            })
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| match row {
                Row::Data { cells } => RowSchema::shaped(schema::ROW_KIND_DATA, cells.clone()),
                Row::Comment { text } => {
                    let mut cells = BTreeMap::new();
                    cells.insert(schema::COMMENT_KEY.to_string(), text.clone());
                    RowSchema::shaped(schema::ROW_KIND_COMMENT, cells)
                }
            })
            .collect();

        let merges = self
            .merges
            .iter()
            .map(|m| MergeSchema {
                start_row: Some(i64::from(m.start_row)),
                start_col: Some(i64::from(m.start_col)),
                row_span: i64::from(m.row_span),
                col_span: i64::from(m.col_span),
            })
            .collect();

        TemplateSchema {
            headers,
            structure: StructureSchema { rows, merges },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn merges(&self) -> &[MergeRegion] {
        &self.merges
    }

    /// Number of rows as a grid coordinate.
    pub fn row_count(&self) -> u32 {
        u32::try_from(self.rows.len()).unwrap_or(u32::MAX)
    }

    /// Number of columns as a grid coordinate.
    pub fn column_count(&self) -> u32 {
        u32::try_from(self.headers.len()).unwrap_or(u32::MAX)
    }

    /// Header lookup by name.
    pub fn header_by_name(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|h| h.name == name)
    }

    /// Build the derived anchor/suppressed lookup for the current grid.
    pub fn merge_index(&self) -> MergeIndex {
        MergeIndex::build(self.row_count(), self.column_count(), &self.merges)
    }
}

impl Default for TemplateDocument {
    /// The built-in default document: indicator and unit columns
    /// (read-only text), four year columns (number), five rows with the
    /// last one a comment row carrying its full-width merge.
    fn default() -> Self {
        let headers = vec![
            Header::text_read_only(schema::INDICATOR_KEY),
            Header::text_read_only(schema::UNIT_KEY),
            Header::number("2022"),
            Header::number("2023"),
            Header::number("2024"),
            Header::number("2025"),
        ];
        let header_names: Vec<&str> = headers.iter().map(|h| h.name.as_str()).collect();

        let mut rows = Vec::with_capacity(5);
        for _ in 0..4 {
            rows.push(Row::empty_data(header_names.iter().copied()));
        }
        rows.push(Row::empty_comment());

        let col_count = u32::try_from(headers.len()).unwrap_or(u32::MAX);
        let merges = vec![MergeRegion::full_row(4, col_count)];

        TemplateDocument {
            name: "Новый шаблон".to_string(),
            headers,
            rows,
            merges,
        }
    }
}
