use serde::{Deserialize, Serialize};

/// Value type of a column, constraining what users may enter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text, accepted as-is.
    #[default]
    Text,
    /// Numeric value; comma is accepted as the decimal separator on input.
    Number,
}

impl DataType {
    /// Parse a wire type string, coercing anything unknown to `Text`.
    ///
    /// Loading is tolerant; strict checking happens in the validator.
    pub fn from_wire(s: &str) -> Self {
        if s == "number" {
            DataType::Number
        } else {
            DataType::Text
        }
    }

    /// The wire representation ("text" / "number").
    pub fn as_wire(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
        }
    }
}

/// A column definition: display name, value type, and whether the
/// administrator pre-filled it (users cannot edit read-only columns).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Column name; unique and non-empty within a document.
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    #[serde(rename = "readonly")]
    pub read_only: bool,
}

impl Header {
    /// A default editable text column.
    pub fn text(name: impl Into<String>) -> Self {
        Header {
            name: name.into(),
            data_type: DataType::Text,
            read_only: false,
        }
    }

    /// A numeric, user-fillable column.
    pub fn number(name: impl Into<String>) -> Self {
        Header {
            name: name.into(),
            data_type: DataType::Number,
            read_only: false,
        }
    }

    /// A read-only text column (administrator-provided labels).
    pub fn text_read_only(name: impl Into<String>) -> Self {
        Header {
            name: name.into(),
            data_type: DataType::Text,
            read_only: true,
        }
    }
}
