//! Typed frame construction from cleaned rows.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

use retail_model::{CellValue, EntitySchema, StorageKind};

/// Build a frame with one column per schema column, in canonical order.
///
/// Each row must hold one cell per schema column. A cell whose variant does
/// not match the column's storage kind becomes null.
pub fn assemble_frame(schema: &EntitySchema, rows: &[Vec<CellValue>]) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(schema.columns.len());
    for (col_idx, spec) in schema.columns.iter().enumerate() {
        let cells = rows.iter().map(|row| row.get(col_idx));
        let name = spec.name.into();
        let series = match spec.sql_type.storage() {
            StorageKind::Text => {
                let values: Vec<Option<String>> = cells
                    .map(|cell| cell.and_then(CellValue::as_text).map(str::to_string))
                    .collect();
                Series::new(name, values)
            }
            StorageKind::Integer => {
                let values: Vec<Option<i64>> =
                    cells.map(|cell| cell.and_then(CellValue::as_i64)).collect();
                Series::new(name, values)
            }
            StorageKind::Float => {
                let values: Vec<Option<f64>> =
                    cells.map(|cell| cell.and_then(CellValue::as_f64)).collect();
                Series::new(name, values)
            }
            StorageKind::Boolean => {
                let values: Vec<Option<bool>> =
                    cells.map(|cell| cell.and_then(CellValue::as_bool)).collect();
                Series::new(name, values)
            }
        };
        columns.push(series.into_column());
    }
    DataFrame::new(columns)
}
