//! JSON sources in either record or column orientation.
//!
//! Accepted layouts:
//! - `[{"col": value, ...}, ...]` (records)
//! - `{"col": {"0": value, "1": value}, ...}` (columns keyed by row label)
//! - `{"col": [value, value], ...}` (columns as arrays)
//! - `{"col": value, ...}` (a single record)

use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::polars_utils::text_frame;

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// Build a text frame from records over the union of their keys.
pub fn records_to_frame(records: &[Map<String, Value>]) -> Result<DataFrame> {
    let mut headers: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !headers.iter().any(|header| header == key) {
                headers.push(key.clone());
            }
        }
    }
    let rows: Vec<Vec<Option<String>>> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|header| record.get(header).and_then(scalar_text))
                .collect()
        })
        .collect();
    text_frame(&headers, &rows)
}

fn row_label_order(columns: &Map<String, Value>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for value in columns.values() {
        if let Value::Object(cells) = value {
            for key in cells.keys() {
                if !labels.iter().any(|label| label == key) {
                    labels.push(key.clone());
                }
            }
        }
    }
    if labels.iter().all(|label| label.parse::<u64>().is_ok()) {
        labels.sort_by_key(|label| label.parse::<u64>().unwrap_or(u64::MAX));
    }
    labels
}

fn columns_to_frame(columns: &Map<String, Value>, context: &str) -> Result<DataFrame> {
    let headers: Vec<String> = columns.keys().cloned().collect();
    let all_objects = columns.values().all(Value::is_object);
    let all_arrays = columns.values().all(Value::is_array);
    let rows: Vec<Vec<Option<String>>> = if all_objects {
        row_label_order(columns)
            .iter()
            .map(|label| {
                columns
                    .values()
                    .map(|cells| cells.get(label.as_str()).and_then(scalar_text))
                    .collect()
            })
            .collect()
    } else if all_arrays {
        let height = columns
            .values()
            .filter_map(Value::as_array)
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        (0..height)
            .map(|idx| {
                columns
                    .values()
                    .map(|cells| cells.get(idx).and_then(scalar_text))
                    .collect()
            })
            .collect()
    } else if columns
        .values()
        .all(|value| !value.is_object() && !value.is_array())
    {
        return records_to_frame(std::slice::from_ref(columns));
    } else {
        return Err(IngestError::JsonLayout(context.to_string()));
    };
    text_frame(&headers, &rows)
}

pub fn json_value_to_frame(value: &Value, context: &str) -> Result<DataFrame> {
    match value {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(record) => records.push(record.clone()),
                    _ => return Err(IngestError::JsonLayout(context.to_string())),
                }
            }
            records_to_frame(&records)
        }
        Value::Object(columns) => columns_to_frame(columns, context),
        _ => Err(IngestError::JsonLayout(context.to_string())),
    }
}

pub fn json_frame_from_str(text: &str, context: &str) -> Result<DataFrame> {
    let value: Value = serde_json::from_str(text).map_err(|source| IngestError::Json {
        context: context.to_string(),
        source,
    })?;
    json_value_to_frame(&value, context)
}

pub fn read_json_frame(path: &Path) -> Result<DataFrame> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    json_frame_from_str(&text, &path.display().to_string())
}
