use std::collections::BTreeMap;

/// The kind of a row, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Data,
    Comment,
}

/// One template row.
///
/// The wire shape stores a `rowType` string plus a cell map; in memory the
/// kind is a tagged variant so comment handling cannot depend on a magic
/// key being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// A regular data row: per-column default values keyed by header name.
    Data { cells: BTreeMap<String, String> },
    /// A free-text row spanning the full table width.
    Comment { text: String },
}

impl Row {
    /// An empty data row with one entry per given header name.
    pub fn empty_data<'a>(header_names: impl IntoIterator<Item = &'a str>) -> Self {
        Row::Data {
            cells: header_names
                .into_iter()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// An empty comment row.
    pub fn empty_comment() -> Self {
        Row::Comment {
            text: String::new(),
        }
    }

    pub fn kind(&self) -> RowKind {
        match self {
            Row::Data { .. } => RowKind::Data,
            Row::Comment { .. } => RowKind::Comment,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Row::Comment { .. })
    }

    /// Set every stored value to the empty string, keeping structure.
    pub fn clear(&mut self) {
        match self {
            Row::Data { cells } => {
                for value in cells.values_mut() {
                    value.clear();
                }
            }
            Row::Comment { text } => text.clear(),
        }
    }

    /// Move the value stored under `old_name` to `new_name` (data rows only).
    pub(crate) fn rename_cell_key(&mut self, old_name: &str, new_name: &str) {
        if let Row::Data { cells } = self {
            if let Some(value) = cells.remove(old_name) {
                cells.insert(new_name.to_string(), value);
            }
        }
    }

    /// Drop every cell whose key is not a surviving header name, and make
    /// sure each surviving name has an entry.
    pub(crate) fn retain_cells<'a>(&mut self, surviving: impl IntoIterator<Item = &'a str>) {
        if let Row::Data { cells } = self {
            let mut rebuilt = BTreeMap::new();
            for name in surviving {
                let value = cells.remove(name).unwrap_or_default();
                rebuilt.insert(name.to_string(), value);
            }
            *cells = rebuilt;
        }
    }
}
