//! CSV/JSON import file parsing.
//!
//! Both formats produce the same [`ParsedRow`] shape with 1-based row numbers
//! that line up: CSV rows count physical non-blank lines (header is row 1),
//! JSON elements are numbered `index + 2`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use utoipa::ToSchema;

use crate::shared::constants::{
    CATEGORY_OPTIONAL_FIELDS, CATEGORY_REQUIRED_FIELDS, PROFESSIONAL_OPTIONAL_FIELDS,
    PROFESSIONAL_REQUIRED_FIELDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImportFormat {
    #[default]
    Csv,
    Json,
}

impl ImportFormat {
    /// Pick the format from the uploaded file's extension
    pub fn from_file_name(file_name: &str) -> Result<Self, ParseError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(ImportFormat::Csv),
            Some("json") => Ok(ImportFormat::Json),
            _ => Err(ParseError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// Entity kind an import file populates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ImportTarget {
    #[serde(rename = "categories")]
    Category,
    #[serde(rename = "professionals")]
    Professional,
}

impl ImportTarget {
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            ImportTarget::Category => CATEGORY_REQUIRED_FIELDS,
            ImportTarget::Professional => PROFESSIONAL_REQUIRED_FIELDS,
        }
    }

    pub fn optional_fields(self) -> &'static [&'static str] {
        match self {
            ImportTarget::Category => CATEGORY_OPTIONAL_FIELDS,
            ImportTarget::Professional => PROFESSIONAL_OPTIONAL_FIELDS,
        }
    }

    /// Required columns followed by optional ones, in template order
    pub fn columns(self) -> Vec<&'static str> {
        self.required_fields()
            .iter()
            .chain(self.optional_fields())
            .copied()
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImportTarget::Category => "categories",
            ImportTarget::Professional => "professionals",
        }
    }
}

/// One untyped record from an import file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParsedRow {
    /// 1-based source row number used in error reports
    pub row: usize,
    /// Column name to raw value
    pub fields: BTreeMap<String, String>,
}

impl ParsedRow {
    /// Raw value of `field`, empty when the column is absent
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value of `field`, `None` when absent or blank
    pub fn value(&self, field: &str) -> Option<&str> {
        Some(self.get(field).trim()).filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Unsupported file type '{0}'. Upload a .csv or .json file")]
    UnsupportedFormat(String),

    #[error("File must be valid UTF-8 text")]
    NotUtf8,

    #[error("CSV file must contain a header row and at least one data row")]
    EmptyCsv,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON file must contain an array of records")]
    NotAnArray,

    #[error("JSON array must contain at least one record")]
    EmptyArray,

    #[error("Record at index {0} is not an object")]
    NotAnObject(usize),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

/// Parse raw upload bytes for `target`
pub fn parse_bytes(
    bytes: &[u8],
    format: ImportFormat,
    target: ImportTarget,
) -> Result<Vec<ParsedRow>, ParseError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::NotUtf8)?;
    parse_file(text.trim_start_matches('\u{feff}'), format, target)
}

/// Parse file text for `target`. Fails without producing rows when the file is
/// empty or lacks any required column.
pub fn parse_file(
    text: &str,
    format: ImportFormat,
    target: ImportTarget,
) -> Result<Vec<ParsedRow>, ParseError> {
    match format {
        ImportFormat::Csv => parse_csv(text, target),
        ImportFormat::Json => parse_json(text, target),
    }
}

fn missing_required(target: ImportTarget, present: impl Fn(&str) -> bool) -> Vec<String> {
    target
        .required_fields()
        .iter()
        .filter(|field| !present(field))
        .map(|field| field.to_string())
        .collect()
}

// Plain comma split: quoted fields are not supported, so a value containing a
// comma shifts every following column.
fn parse_csv(text: &str, target: ImportTarget) -> Result<Vec<ParsedRow>, ParseError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Err(ParseError::EmptyCsv);
    }

    let headers: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let missing = missing_required(target, |field| headers.iter().any(|h| h == field));
    if !missing.is_empty() {
        return Err(ParseError::MissingColumns(missing));
    }

    let rows = lines
        .iter()
        .enumerate()
        .skip(1)
        .map(|(index, line)| {
            let values: Vec<&str> = line.split(',').collect();
            let fields = headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect();
            ParsedRow {
                row: index + 1,
                fields,
            }
        })
        .collect();

    Ok(rows)
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn parse_json(text: &str, target: ImportTarget) -> Result<Vec<ParsedRow>, ParseError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ParseError::NotAnArray),
    };

    let Some(first) = items.first() else {
        return Err(ParseError::EmptyArray);
    };
    let first = first.as_object().ok_or(ParseError::NotAnObject(0))?;
    let missing = missing_required(target, |field| {
        first.keys().any(|k| k.trim().eq_ignore_ascii_case(field))
    });
    if !missing.is_empty() {
        return Err(ParseError::MissingFields(missing));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or(ParseError::NotAnObject(index))?;
            let fields = object
                .iter()
                .map(|(k, v)| (k.trim().to_lowercase(), json_to_text(v)))
                .collect();
            Ok(ParsedRow {
                row: index + 2,
                fields,
            })
        })
        .collect()
}
