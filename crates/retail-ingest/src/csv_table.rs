use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::polars_utils::text_frame;

/// Header row plus text cells; `None` marks an empty cell.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl CsvTable {
    pub fn to_frame(&self) -> Result<DataFrame> {
        text_frame(&self.headers, &self.rows)
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse CSV text from any reader. The first non-blank record is the header.
pub fn read_csv_from_reader<R: Read>(reader: R, context: &str) -> Result<CsvTable> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            context: context.to_string(),
            source,
        })?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match headers {
            None => headers = Some(record.iter().map(normalize_header).collect()),
            Some(_) => rows.push(record.iter().map(normalize_cell).collect()),
        }
    }
    let headers = headers.unwrap_or_default();
    debug!(
        source = context,
        columns = headers.len(),
        rows = rows.len(),
        "read csv"
    );
    Ok(CsvTable { headers, rows })
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from_reader(file, &path.display().to_string())
}

/// Read a CSV file straight into an all-text frame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    read_csv_table(path)?.to_frame()
}
