//! Form projection: the fillable grid a respondent sees.
//!
//! Each visible cell becomes a named input field; cells swallowed by a
//! merge region emit nothing, and the region's anchor carries its spans
//! so the rendered table keeps the template's geometry. Comment rows
//! become one full-width text field regardless of stored merges.

use serde::Serialize;

use crate::schema::COMMENT_KEY;
use crate::types::{DataType, Row, TemplateDocument};

/// One input field of the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Grid row the field belongs to.
    pub row: u32,
    /// Grid column of the field's anchor cell.
    pub col: u32,
    /// Header name the field is bound to.
    pub header: String,
    /// Submission field name, `cell[row][header]`.
    pub name: String,
    /// Pre-filled value from the template.
    pub value: String,
    pub row_span: u32,
    pub col_span: u32,
    /// Read-only fields render as plain labels.
    pub read_only: bool,
    /// Numeric fields get the number input widget.
    pub numeric: bool,
}

/// The full-width free-text field of a comment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentField {
    pub row: u32,
    /// Submission field name, bound to the comment column key.
    pub name: String,
    pub value: String,
    pub col_span: u32,
}

/// One rendered row: either a run of cell fields or a single comment field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "rowType")]
pub enum FormRow {
    #[serde(rename = "normal")]
    Data { fields: Vec<FormField> },
    #[serde(rename = "comment")]
    Comment { field: CommentField },
}

/// Complete form projection of one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    pub template_name: String,
    /// Column header captions, in grid order.
    pub columns: Vec<String>,
    pub rows: Vec<FormRow>,
}

/// Submission field name for one cell.
pub fn field_name(row: u32, header: &str) -> String {
    format!("cell[{row}][{header}]")
}

impl FormLayout {
    /// Project a template into its form layout.
    pub fn build(template: &TemplateDocument) -> Self {
        let index = template.merge_index();
        let col_count = template.column_count();
        let mut rows = Vec::with_capacity(template.rows().len());

        for (row_index, row) in template.rows().iter().enumerate() {
            let grid_row = u32::try_from(row_index).unwrap_or(u32::MAX);
            match row {
                Row::Comment { text } => {
                    rows.push(FormRow::Comment {
                        field: CommentField {
                            row: grid_row,
                            name: field_name(grid_row, COMMENT_KEY),
                            value: text.clone(),
                            col_span: col_count,
                        },
                    });
                }
                Row::Data { cells } => {
                    let mut fields = Vec::new();
                    for (col_index, header) in template.headers().iter().enumerate() {
                        let grid_col = u32::try_from(col_index).unwrap_or(u32::MAX);
                        if index.is_suppressed(grid_row, grid_col) {
                            continue;
                        }
                        let (row_span, col_span) = index
                            .anchor(grid_row, grid_col)
                            .map_or((1, 1), |span| (span.row_span, span.col_span));
                        fields.push(FormField {
                            row: grid_row,
                            col: grid_col,
                            header: header.name.clone(),
                            name: field_name(grid_row, &header.name),
                            value: cells.get(&header.name).cloned().unwrap_or_default(),
                            row_span,
                            col_span,
                            read_only: header.read_only,
                            numeric: header.data_type == DataType::Number,
                        });
                    }
                    rows.push(FormRow::Data { fields });
                }
            }
        }

        FormLayout {
            template_name: template.name().to_string(),
            columns: template.headers().iter().map(|h| h.name.clone()).collect(),
            rows,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{GridRect, Header, MergeRegion, TemplateDocument};

    fn template() -> TemplateDocument {
        TemplateDocument::new(
            "Отчёт",
            vec![
                Header::text_read_only("Показатели"),
                Header::number("2024"),
                Header::number("2025"),
            ],
            vec![
                Row::empty_data(["Показатели", "2024", "2025"]),
                Row::empty_data(["Показатели", "2024", "2025"]),
                Row::Comment {
                    text: "итоги".to_string(),
                },
            ],
            vec![
                MergeRegion::from_rect(GridRect::new(0, 1, 0, 2)),
                MergeRegion::full_row(2, 3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn suppressed_cells_emit_no_field() {
        let layout = FormLayout::build(&template());

        let FormRow::Data { fields } = &layout.rows[0] else {
            panic!("row 0 should be a data row");
        };
        // Merged (0,1)-(0,2): cell (0,2) is swallowed.
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].col, 1);
        assert_eq!(fields[1].col_span, 2);
        assert_eq!(fields[1].row_span, 1);
    }

    #[test]
    fn field_names_follow_cell_convention() {
        let layout = FormLayout::build(&template());

        let FormRow::Data { fields } = &layout.rows[1] else {
            panic!("row 1 should be a data row");
        };
        assert_eq!(fields[0].name, "cell[1][Показатели]");
        assert_eq!(fields[1].name, "cell[1][2024]");
        assert!(fields[0].read_only);
        assert!(!fields[0].numeric);
        assert!(fields[1].numeric);
    }

    #[test]
    fn comment_row_becomes_one_full_width_field() {
        let layout = FormLayout::build(&template());

        let FormRow::Comment { field } = &layout.rows[2] else {
            panic!("row 2 should be a comment row");
        };
        assert_eq!(field.col_span, 3);
        assert_eq!(field.value, "итоги");
        assert_eq!(field.name, "cell[2][Комментарий]");
    }

    #[test]
    fn untouched_grid_emits_one_field_per_cell() {
        let template = TemplateDocument::new(
            "Т",
            vec![Header::text("А"), Header::text("Б")],
            vec![Row::empty_data(["А", "Б"]), Row::empty_data(["А", "Б"])],
            vec![],
        )
        .unwrap();
        let layout = FormLayout::build(&template);

        let total: usize = layout
            .rows
            .iter()
            .map(|row| match row {
                FormRow::Data { fields } => fields.len(),
                FormRow::Comment { .. } => 1,
            })
            .sum();
        assert_eq!(total, 4);
    }
}
