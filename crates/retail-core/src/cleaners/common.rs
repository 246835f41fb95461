use tracing::debug;

use retail_model::{CellValue, CleaningReport, Entity, RejectReason, schema_for};
use retail_transform::{is_null_sentinel, normalize_date};

use crate::dedupe::dedupe_frame_by_keys;
use crate::error::{CleaningError, Result};
use crate::frame::{CleanedFrame, EntityFrame};
use crate::frame_builder::assemble_frame;
use crate::raw::{RawColumn, RawTable};

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Rejection {
    pub reason: RejectReason,
    pub column: Option<&'static str>,
    pub value: String,
}

impl Rejection {
    pub fn new(reason: RejectReason, column: &'static str, value: impl Into<String>) -> Self {
        Self {
            reason,
            column: Some(column),
            value: value.into(),
        }
    }
}

pub(super) type RowResult = std::result::Result<Vec<CellValue>, Rejection>;
pub(super) type CellResult = std::result::Result<CellValue, Rejection>;

/// Reject the row when any required column holds an empty cell or a null sentinel.
pub(super) fn check_required(
    raw: &RawTable,
    row: usize,
    columns: &[RawColumn],
) -> std::result::Result<(), Rejection> {
    for column in columns.iter().filter(|column| column.required) {
        let value = raw.get(column.name, row).unwrap_or_default();
        if is_null_sentinel(value) {
            return Err(Rejection::new(RejectReason::NullValue, column.name, value));
        }
    }
    Ok(())
}

/// Cell text after [`check_required`] has passed.
pub(super) fn text<'a>(raw: &'a RawTable, row: usize, column: &str) -> &'a str {
    raw.get(column, row).unwrap_or_default()
}

/// Optional cell text with null sentinels mapped to `None`.
pub(super) fn optional_text<'a>(raw: &'a RawTable, row: usize, column: &str) -> Option<&'a str> {
    raw.get(column, row).filter(|value| !is_null_sentinel(value))
}

pub(super) fn date_cell(raw: &RawTable, row: usize, column: &'static str) -> CellResult {
    let value = text(raw, row, column);
    normalize_date(value)
        .map(CellValue::Text)
        .ok_or_else(|| Rejection::new(RejectReason::InvalidDate, column, value))
}

/// Run `clean_row` over every raw row, tallying rejections in a fresh report.
pub(super) fn collect_rows<F>(
    entity: Entity,
    raw: &RawTable,
    mut clean_row: F,
) -> (Vec<Vec<CellValue>>, CleaningReport)
where
    F: FnMut(usize) -> RowResult,
{
    let mut report = CleaningReport::new(entity, raw.height());
    let mut rows = Vec::with_capacity(raw.height());
    for idx in 0..raw.height() {
        match clean_row(idx) {
            Ok(row) => rows.push(row),
            Err(rejection) => {
                debug!(
                    row = idx,
                    rule = rejection.reason.code(),
                    column = rejection.column.unwrap_or_default(),
                    "row rejected"
                );
                report.record(rejection.reason, rejection.column, &rejection.value);
            }
        }
    }
    (rows, report)
}

/// Build the typed frame, drop duplicate natural keys and finalize the report.
pub(super) fn finish(
    entity: Entity,
    rows: &[Vec<CellValue>],
    mut report: CleaningReport,
) -> Result<CleanedFrame> {
    let schema = schema_for(entity);
    let mut data =
        assemble_frame(schema, rows).map_err(|source| CleaningError::Frame { entity, source })?;
    let keys = schema.dedupe_keys();
    let dropped = dedupe_frame_by_keys(&mut data, keys.as_slice())
        .map_err(|source| CleaningError::Frame { entity, source })?;
    let key_column = schema.natural_key.first().copied();
    for key in &dropped {
        report.record(RejectReason::Duplicate, key_column, &key.join(" | "));
    }
    report.output_rows = data.height();
    Ok(CleanedFrame {
        frame: EntityFrame::new(entity, data),
        report,
    })
}
