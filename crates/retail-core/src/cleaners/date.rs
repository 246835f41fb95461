use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason};
use retail_transform::{compose_datetime, format_datetime, parse_i64};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};

use super::common::{Rejection, RowResult, check_required, collect_rows, finish, text};

const TIME_PERIODS: &[&str] = &["Morning", "Midday", "Evening", "Late_Hours"];

const DATE_COLUMNS: &[RawColumn] = &[
    RawColumn::required("date_uuid"),
    RawColumn::required("timestamp"),
    RawColumn::required("year"),
    RawColumn::required("month"),
    RawColumn::required("day"),
    RawColumn::required("time_period"),
];

fn clean_date_row(raw: &RawTable, row: usize) -> RowResult {
    check_required(raw, row, DATE_COLUMNS)?;
    let month_raw = text(raw, row, "month");
    if month_raw.chars().any(|ch| ch.is_ascii_alphabetic()) {
        return Err(Rejection::new(RejectReason::InvalidDate, "month", month_raw));
    }
    let year = parse_i64(text(raw, row, "year"));
    let month = parse_i64(month_raw);
    let day = parse_i64(text(raw, row, "day"));
    let timestamp = text(raw, row, "timestamp");
    let date_time = match (year, month, day) {
        (Some(year), Some(month), Some(day)) => compose_datetime(year, month, day, timestamp)
            .map(|date_time| (year, month, day, date_time)),
        _ => None,
    };
    let Some((year, month, day, date_time)) = date_time else {
        let value = format!(
            "{}-{}-{} {timestamp}",
            text(raw, row, "year"),
            month_raw,
            text(raw, row, "day")
        );
        return Err(Rejection::new(RejectReason::InvalidDate, "date_time", value));
    };
    let time_period = text(raw, row, "time_period");
    if !TIME_PERIODS.contains(&time_period) {
        return Err(Rejection::new(
            RejectReason::InvalidTimePeriod,
            "time_period",
            time_period,
        ));
    }
    Ok(vec![
        CellValue::text(text(raw, row, "date_uuid")),
        CellValue::Text(format_datetime(date_time)),
        CellValue::text(time_period),
        CellValue::Int(year),
        CellValue::Int(month),
        CellValue::Int(day),
        CellValue::Text(date_time.format("%H:%M:%S").to_string()),
    ])
}

pub(super) fn clean_dates(df: &DataFrame) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::Date, df, DATE_COLUMNS)?;
    let (rows, report) = collect_rows(Entity::Date, &raw, |row| clean_date_row(&raw, row));
    finish(Entity::Date, &rows, report)
}
