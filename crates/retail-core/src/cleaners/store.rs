use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason};
use retail_transform::{normalize_coordinate, parse_i64, strip_non_digits};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};

use super::common::{
    Rejection, RowResult, check_required, collect_rows, date_cell, finish, optional_text, text,
};

const STORE_TYPES: &[&str] = &["Web Portal", "Local", "Super Store", "Mall Kiosk", "Outlet"];

const MAX_STAFF: i64 = i16::MAX as i64;

// The feed transposes the coordinate headers: `longitude` holds the latitude.
const STORE_COLUMNS: &[RawColumn] = &[
    RawColumn::required("store_code"),
    RawColumn::required("store_type"),
    RawColumn::required("opening_date"),
    RawColumn::required("staff_numbers"),
    RawColumn::required("address"),
    RawColumn::required("locality"),
    RawColumn::required("country_code"),
    RawColumn::required("continent"),
    RawColumn::optional("latitude"),
    RawColumn::optional("longitude"),
];

fn clean_store_row(raw: &RawTable, row: usize) -> RowResult {
    check_required(raw, row, STORE_COLUMNS)?;
    let store_type = text(raw, row, "store_type");
    if !STORE_TYPES.contains(&store_type) {
        return Err(Rejection::new(
            RejectReason::InvalidStoreType,
            "store_type",
            store_type,
        ));
    }
    let staff_raw = text(raw, row, "staff_numbers");
    let staff = parse_i64(&strip_non_digits(staff_raw))
        .filter(|count| (0..=MAX_STAFF).contains(count))
        .ok_or_else(|| {
            Rejection::new(RejectReason::InvalidStaffCount, "staff_numbers", staff_raw)
        })?;
    let opening_date = date_cell(raw, row, "opening_date")?;
    let latitude = optional_text(raw, row, "longitude").and_then(|v| normalize_coordinate(v, 90.0));
    let longitude =
        optional_text(raw, row, "latitude").and_then(|v| normalize_coordinate(v, 180.0));
    Ok(vec![
        CellValue::text(text(raw, row, "store_code")),
        CellValue::text(store_type),
        opening_date,
        CellValue::Int(staff),
        CellValue::text(text(raw, row, "address")),
        CellValue::text(text(raw, row, "locality")),
        CellValue::text(text(raw, row, "country_code")),
        CellValue::text(text(raw, row, "continent").replace("ee", "")),
        CellValue::from(latitude),
        CellValue::from(longitude),
    ])
}

pub(super) fn clean_stores(df: &DataFrame) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::Store, df, STORE_COLUMNS)?;
    let (rows, report) = collect_rows(Entity::Store, &raw, |row| clean_store_row(&raw, row));
    finish(Entity::Store, &rows, report)
}
