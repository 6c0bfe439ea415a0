//! Dataset file parsing (CSV and JSON arrays).
//!
//! Uploaded datasets drive data-driven runs. The first CSV record is the
//! header row; data rows are padded with empty cells or truncated so every
//! row matches the header width. JSON datasets are arrays of flat objects;
//! the header set is the sorted union of all keys.

use crate::config::error::DatasetError;
use crate::config::parser::{get_file_type, ConfigFileType};
use crate::types::dataset::TestDataset;
use serde_json::Value;

/// Parse CSV content into a dataset.
///
/// Handles the minimal RFC subset the platform accepts: comma separators,
/// CRLF or LF record ends, and double-quoted fields with `""` escapes.
pub fn parse_csv(content: &str) -> Result<TestDataset, DatasetError> {
    let mut records = parse_csv_records(content)?;
    if records.is_empty() {
        return Ok(TestDataset::default());
    }

    let headers = records.remove(0);
    let width = headers.len();
    let rows = records
        .into_iter()
        .map(|mut row| {
            row.resize(width, String::new());
            row
        })
        .collect();

    Ok(TestDataset::new(headers, rows))
}

fn parse_csv_records(content: &str) -> Result<Vec<Vec<String>>, DatasetError> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
            continue;
        }

        match c {
            '"' if cell.is_empty() => in_quotes = true,
            ',' => record.push(std::mem::take(&mut cell)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                // A bare newline between records is not an empty record
                if !record.is_empty() || !cell.is_empty() {
                    record.push(std::mem::take(&mut cell));
                    records.push(std::mem::take(&mut record));
                }
            }
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(DatasetError::UnclosedQuote);
    }
    if !record.is_empty() || !cell.is_empty() {
        record.push(cell);
        records.push(record);
    }

    Ok(records)
}

/// Parse a JSON array-of-objects dataset.
///
/// Headers are the sorted union of all object keys; missing cells become
/// empty strings, non-string scalars and nested values are stringified.
pub fn parse_json(content: &str) -> Result<TestDataset, DatasetError> {
    let data: Value = serde_json::from_str(content)?;
    let items = data.as_array().ok_or(DatasetError::NotAnArray)?;
    if items.is_empty() {
        return Ok(TestDataset::default());
    }

    let mut headers: Vec<String> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or(DatasetError::RowNotAnObject(i + 1))?;
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort();

    let rows = items
        .iter()
        .map(|item| {
            let object = item.as_object().expect("checked above");
            headers
                .iter()
                .map(|header| match object.get(header) {
                    None | Some(Value::Null) => String::new(),
                    Some(Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    Ok(TestDataset::new(headers, rows))
}

/// Parse dataset content based on the path's file type
pub fn parse_dataset(content: &str, path: &str) -> Result<TestDataset, DatasetError> {
    match get_file_type(path) {
        ConfigFileType::Csv => parse_csv(content),
        ConfigFileType::Json => parse_json(content),
        _ => Err(DatasetError::UnsupportedFileType(path.to_string())),
    }
}
