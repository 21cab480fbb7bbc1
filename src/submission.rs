//! Validation of filled-in data submitted against a template.
//!
//! Respondents fill a form projected from a template; what comes back is
//! a sparse map of row index to cell values. Comment rows and text
//! columns accept anything. Number columns must hold something that
//! parses as a finite number after normalization; the decimal comma is
//! accepted and rewritten to a dot in place, so accepted data is already
//! normalized when it reaches storage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DataType, TemplateDocument};

/// Submitted values: row index → header name → raw value.
///
/// Sparse on both levels; absent entries mean the respondent left the
/// template's default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilledData {
    pub cells: BTreeMap<usize, BTreeMap<String, String>>,
}

impl FilledData {
    /// Look up one submitted value.
    pub fn value(&self, row: usize, header: &str) -> Option<&str> {
        self.cells
            .get(&row)
            .and_then(|cells| cells.get(header))
            .map(String::as_str)
    }
}

/// The submission was rejected; lists every offending cell as
/// `(row index, header name)`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{} cell(s) contain invalid values", .invalid.len())]
pub struct SubmissionError {
    pub invalid: Vec<(usize, String)>,
}

/// Check a submission against its template and normalize it in place.
///
/// Every value is trimmed. Values bound to number columns of data rows
/// must then be non-empty and numeric; a decimal comma is rewritten to a
/// dot before parsing, and the rewritten form is what stays in the map.
/// All offending cells are collected before rejecting, so the caller can
/// report them all at once.
pub fn validate_filled(
    template: &TemplateDocument,
    data: &mut FilledData,
) -> Result<(), SubmissionError> {
    let mut invalid = Vec::new();

    for (&row_index, cells) in &mut data.cells {
        let is_comment = template
            .rows()
            .get(row_index)
            .is_some_and(crate::types::Row::is_comment);

        for (header_name, value) in cells.iter_mut() {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
            if is_comment {
                continue;
            }
            let numeric = template
                .header_by_name(header_name)
                .is_some_and(|h| h.data_type == DataType::Number);
            if !numeric {
                continue;
            }

            let normalized = value.replace(',', ".");
            match normalized.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => {
                    if normalized != *value {
                        *value = normalized;
                    }
                }
                _ => invalid.push((row_index, header_name.clone())),
            }
        }
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        log::debug!(
            "rejecting submission for template \"{}\": {} invalid cell(s)",
            template.name(),
            invalid.len()
        );
        Err(SubmissionError { invalid })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::types::{Header, Row, TemplateDocument};

    fn template() -> TemplateDocument {
        TemplateDocument::new(
            "Отчёт",
            vec![
                Header::text_read_only("Показатели"),
                Header::text("Единица измерения"),
                Header::number("2024"),
            ],
            vec![
                Row::empty_data(["Показатели", "Единица измерения", "2024"]),
                Row::empty_comment(),
            ],
            vec![],
        )
        .unwrap()
    }

    fn filled(row: usize, header: &str, value: &str) -> FilledData {
        let mut data = FilledData::default();
        data.cells
            .entry(row)
            .or_default()
            .insert(header.to_string(), value.to_string());
        data
    }

    #[test_case("12.5", "12.5"; "dot decimal kept")]
    #[test_case("12,5", "12.5"; "comma rewritten to dot")]
    #[test_case(" 7 ", "7"; "surrounding whitespace trimmed")]
    #[test_case("-3", "-3"; "negative accepted")]
    fn number_cell_accepted_and_normalized(raw: &str, stored: &str) {
        let template = template();
        let mut data = filled(0, "2024", raw);

        validate_filled(&template, &mut data).unwrap();
        assert_eq!(data.value(0, "2024"), Some(stored));
    }

    #[test_case(""; "empty")]
    #[test_case("abc"; "not a number")]
    #[test_case("1,2,3"; "two commas")]
    #[test_case("NaN"; "nan rejected")]
    #[test_case("inf"; "infinity rejected")]
    fn number_cell_rejected(raw: &str) {
        let template = template();
        let mut data = filled(0, "2024", raw);

        let err = validate_filled(&template, &mut data).unwrap_err();
        assert_eq!(err.invalid, vec![(0, "2024".to_string())]);
    }

    #[test]
    fn text_cell_accepts_anything() {
        let template = template();
        let mut data = filled(0, "Единица измерения", "тыс. руб.");
        validate_filled(&template, &mut data).unwrap();
    }

    #[test]
    fn comment_row_exempt_from_number_rule() {
        let template = template();
        let mut data = filled(1, "2024", "свободный текст");
        validate_filled(&template, &mut data).unwrap();
    }

    #[test]
    fn all_offending_cells_reported() {
        let template = TemplateDocument::new(
            "Отчёт",
            vec![Header::number("2023"), Header::number("2024")],
            vec![Row::empty_data(["2023", "2024"])],
            vec![],
        )
        .unwrap();
        let mut data = filled(0, "2023", "abc");
        data.cells
            .entry(0)
            .or_default()
            .insert("2024".to_string(), "тоже нет".to_string());

        let err = validate_filled(&template, &mut data).unwrap_err();
        assert_eq!(
            err.invalid,
            vec![(0, "2023".to_string()), (0, "2024".to_string())]
        );
    }

    #[test]
    fn unknown_header_treated_as_text() {
        let template = template();
        let mut data = filled(0, "Нет такой колонки", "что угодно");
        validate_filled(&template, &mut data).unwrap();
    }
}
