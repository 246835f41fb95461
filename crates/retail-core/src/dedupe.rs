use std::collections::BTreeSet;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray, PolarsResult};

use retail_ingest::any_to_string;

fn column_value_string(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(series) => any_to_string(series.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Drop rows whose composite key was already seen, keeping the first.
///
/// Returns the composite keys of the dropped rows in input order, one trimmed
/// cell text per key column. Missing key columns are ignored.
pub fn dedupe_frame_by_keys<S: AsRef<str>>(
    df: &mut DataFrame,
    keys: &[S],
) -> PolarsResult<Vec<Vec<String>>> {
    if df.height() == 0 {
        return Ok(Vec::new());
    }
    let key_columns: Vec<&str> = keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| df.column(key).is_ok())
        .collect();
    if key_columns.is_empty() {
        return Ok(Vec::new());
    }
    let mut seen = BTreeSet::new();
    let mut keep = Vec::with_capacity(df.height());
    let mut dropped = Vec::new();
    for idx in 0..df.height() {
        let composite: Vec<String> = key_columns
            .iter()
            .map(|name| column_value_string(df, name, idx).trim().to_string())
            .collect();
        if seen.contains(&composite) {
            keep.push(false);
            dropped.push(composite);
        } else {
            seen.insert(composite);
            keep.push(true);
        }
    }
    if dropped.is_empty() {
        return Ok(dropped);
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    *df = df.filter(&mask)?;
    Ok(dropped)
}
