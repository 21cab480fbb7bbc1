//! Spreadsheet projection: a writer-agnostic plan of the exported sheet.
//!
//! The plan is plain data (cells, merge rectangles, column widths) in
//! sheet coordinates; the actual workbook writer lives with the caller.
//! Above the grid the sheet carries a fixed preamble: the template name
//! as a title, a municipality/date line, a blank spacer row, and the
//! column header band. Submitted values take priority over the
//! template's stored defaults.

use serde::Serialize;

use super::{grid_to_sheet_row, HEADER_ROW, META_ROW, TITLE_ROW};
use crate::submission::FilledData;
use crate::types::{DataType, MergeRegion, Row, TemplateDocument};

/// Report metadata printed on the meta line of the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportMeta {
    /// Municipality the submission came from.
    pub municipality: String,
    /// Submission date, preformatted.
    pub date: String,
}

/// What a planned cell is, for the writer to pick styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellRole {
    Title,
    Meta,
    Header,
    Data,
    Comment,
}

/// One cell of the planned sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetCell {
    pub row: u32,
    pub col: u32,
    pub value: String,
    pub role: CellRole,
    /// Whether the writer should emit a numeric cell. Only set for data
    /// cells of number columns whose value parses.
    pub numeric: bool,
}

/// Complete plan of an exported sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPlan {
    pub cells: Vec<SheetCell>,
    /// Merge rectangles in sheet coordinates.
    pub merges: Vec<MergeRegion>,
    pub column_count: u32,
    /// Character width per column, derived from header captions.
    pub column_widths: Vec<u32>,
}

const MIN_COLUMN_WIDTH: u32 = 12;

impl SheetPlan {
    /// Plan the sheet for one template plus (possibly empty) submitted data.
    pub fn build(template: &TemplateDocument, data: &FilledData, meta: &ExportMeta) -> Self {
        let col_count = template.column_count();
        let mut cells = Vec::new();
        let mut merges = Vec::new();

        cells.push(SheetCell {
            row: TITLE_ROW,
            col: 0,
            value: template.name().to_string(),
            role: CellRole::Title,
            numeric: false,
        });
        cells.push(SheetCell {
            row: META_ROW,
            col: 0,
            value: format!("МО: {}   Дата: {}", meta.municipality, meta.date),
            role: CellRole::Meta,
            numeric: false,
        });
        if col_count > 1 {
            merges.push(MergeRegion::full_row(TITLE_ROW, col_count));
            merges.push(MergeRegion::full_row(META_ROW, col_count));
        }

        for (col_index, header) in template.headers().iter().enumerate() {
            cells.push(SheetCell {
                row: HEADER_ROW,
                col: u32::try_from(col_index).unwrap_or(u32::MAX),
                value: header.name.clone(),
                role: CellRole::Header,
                numeric: false,
            });
        }

        for (row_index, row) in template.rows().iter().enumerate() {
            let grid_row = u32::try_from(row_index).unwrap_or(u32::MAX);
            let sheet_row = grid_to_sheet_row(grid_row);
            match row {
                Row::Comment { text } => {
                    let value = data
                        .value(row_index, crate::schema::COMMENT_KEY)
                        .unwrap_or(text);
                    cells.push(SheetCell {
                        row: sheet_row,
                        col: 0,
                        value: value.to_string(),
                        role: CellRole::Comment,
                        numeric: false,
                    });
                    if col_count > 1 {
                        merges.push(MergeRegion::full_row(sheet_row, col_count));
                    }
                }
                Row::Data { cells: defaults } => {
                    for (col_index, header) in template.headers().iter().enumerate() {
                        let value = data
                            .value(row_index, &header.name)
                            .map(str::to_string)
                            .or_else(|| defaults.get(&header.name).cloned())
                            .unwrap_or_default();
                        let numeric = header.data_type == DataType::Number
                            && value.parse::<f64>().is_ok();
                        cells.push(SheetCell {
                            row: sheet_row,
                            col: u32::try_from(col_index).unwrap_or(u32::MAX),
                            value,
                            role: CellRole::Data,
                            numeric,
                        });
                    }
                }
            }
        }

        // Template merges move below the preamble. Ones touching a
        // comment row are dropped: the comment row already carries its
        // own full-width sheet merge.
        for region in template.merges() {
            let touches_comment = (region.start_row..=region.end_row()).any(|grid_row| {
                usize::try_from(grid_row)
                    .ok()
                    .and_then(|i| template.rows().get(i))
                    .is_some_and(Row::is_comment)
            });
            if touches_comment {
                continue;
            }
            merges.push(MergeRegion {
                start_row: grid_to_sheet_row(region.start_row),
                start_col: region.start_col,
                row_span: region.row_span,
                col_span: region.col_span,
            });
        }

        let column_widths = template
            .headers()
            .iter()
            .map(|h| u32::try_from(h.name.chars().count()).unwrap_or(u32::MAX).max(MIN_COLUMN_WIDTH))
            .collect();

        SheetPlan {
            cells,
            merges,
            column_count: col_count,
            column_widths,
        }
    }

    /// Look up a planned cell by sheet coordinates.
    pub fn cell(&self, row: u32, col: u32) -> Option<&SheetCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use crate::types::{GridRect, Header, TemplateDocument};

    fn template() -> TemplateDocument {
        let mut rows = vec![
            Row::empty_data(["Показатели", "2024"]),
            Row::empty_data(["Показатели", "2024"]),
            Row::Comment {
                text: "примечание".to_string(),
            },
        ];
        if let Row::Data { cells } = &mut rows[0] {
            cells.insert("Показатели".to_string(), "Численность".to_string());
            cells.insert("2024".to_string(), "100".to_string());
        }
        TemplateDocument::new(
            "Сводный отчёт",
            vec![Header::text_read_only("Показатели"), Header::number("2024")],
            rows,
            vec![
                MergeRegion::from_rect(GridRect::new(0, 0, 1, 0)),
                MergeRegion::full_row(2, 2),
            ],
        )
        .unwrap()
    }

    fn meta() -> ExportMeta {
        ExportMeta {
            municipality: "г. Пример".to_string(),
            date: "2024-01-15".to_string(),
        }
    }

    #[test]
    fn preamble_occupies_fixed_rows() {
        let plan = SheetPlan::build(&template(), &FilledData::default(), &meta());

        assert_eq!(plan.cell(0, 0).unwrap().value, "Сводный отчёт");
        assert_eq!(
            plan.cell(1, 0).unwrap().value,
            "МО: г. Пример   Дата: 2024-01-15"
        );
        assert!(plan.cell(2, 0).is_none());
        assert_eq!(plan.cell(3, 0).unwrap().value, "Показатели");
        assert_eq!(plan.cell(3, 1).unwrap().value, "2024");
        assert_eq!(plan.cell(4, 0).unwrap().value, "Численность");
    }

    #[test]
    fn submitted_values_override_template_defaults() {
        let mut data = FilledData::default();
        data.cells
            .entry(0)
            .or_default()
            .insert("2024".to_string(), "250.5".to_string());
        let plan = SheetPlan::build(&template(), &data, &meta());

        let cell = plan.cell(4, 1).unwrap();
        assert_eq!(cell.value, "250.5");
        assert!(cell.numeric);
        // Untouched cell keeps the template default.
        assert_eq!(plan.cell(4, 0).unwrap().value, "Численность");
    }

    #[test]
    fn template_merges_are_translated_below_the_preamble() {
        let plan = SheetPlan::build(&template(), &FilledData::default(), &meta());

        assert!(plan.merges.contains(&MergeRegion {
            start_row: 4,
            start_col: 0,
            row_span: 2,
            col_span: 1,
        }));
    }

    #[test]
    fn comment_row_merge_comes_from_the_row_not_the_template() {
        let plan = SheetPlan::build(&template(), &FilledData::default(), &meta());

        // The stored full-row merge at grid row 2 is skipped; the comment
        // row itself contributes the sheet merge at row 6.
        let at_comment: Vec<_> = plan.merges.iter().filter(|m| m.start_row == 6).collect();
        assert_eq!(at_comment.len(), 1);
        assert_eq!(at_comment[0].col_span, 2);
    }

    #[test]
    fn non_numeric_value_in_number_column_exports_as_text() {
        let mut data = FilledData::default();
        data.cells
            .entry(1)
            .or_default()
            .insert("2024".to_string(), "н/д".to_string());
        let plan = SheetPlan::build(&template(), &data, &meta());

        assert!(!plan.cell(5, 1).unwrap().numeric);
    }

    #[test]
    fn column_widths_track_long_captions() {
        let plan = SheetPlan::build(&template(), &FilledData::default(), &meta());
        assert_eq!(plan.column_widths, vec![12, 12]);

        let wide = TemplateDocument::new(
            "Т",
            vec![Header::text("Очень длинное название колонки")],
            vec![Row::empty_data(["Очень длинное название колонки"])],
            vec![],
        )
        .unwrap();
        let plan = SheetPlan::build(&wide, &FilledData::default(), &meta());
        assert_eq!(plan.column_widths, vec![30]);
    }
}
