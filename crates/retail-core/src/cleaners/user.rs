use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason};
use retail_transform::{normalize_country_code, normalize_email, normalize_phone};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};

use super::common::{Rejection, RowResult, check_required, collect_rows, date_cell, finish, text};

const USER_COLUMNS: &[RawColumn] = &[
    RawColumn::required("first_name"),
    RawColumn::required("last_name"),
    RawColumn::required("date_of_birth"),
    RawColumn::required("company"),
    RawColumn::required("email_address"),
    RawColumn::required("address"),
    RawColumn::required("country"),
    RawColumn::required("country_code"),
    RawColumn::required("phone_number"),
    RawColumn::required("join_date"),
    RawColumn::required("user_uuid"),
];

fn clean_user_row(raw: &RawTable, row: usize) -> RowResult {
    check_required(raw, row, USER_COLUMNS)?;
    let country_code = normalize_country_code(text(raw, row, "country_code"));
    let date_of_birth = date_cell(raw, row, "date_of_birth")?;
    let join_date = date_cell(raw, row, "join_date")?;
    let email_raw = text(raw, row, "email_address");
    let email = normalize_email(email_raw).ok_or_else(|| {
        Rejection::new(RejectReason::InvalidEmail, "email_address", email_raw)
    })?;
    let phone_raw = text(raw, row, "phone_number");
    let phone = normalize_phone(phone_raw, &country_code).ok_or_else(|| {
        Rejection::new(RejectReason::InvalidPhone, "phone_number", phone_raw)
    })?;
    Ok(vec![
        CellValue::text(text(raw, row, "first_name")),
        CellValue::text(text(raw, row, "last_name")),
        date_of_birth,
        CellValue::text(text(raw, row, "company")),
        CellValue::Text(email),
        CellValue::text(text(raw, row, "address")),
        CellValue::text(text(raw, row, "country")),
        CellValue::Text(country_code),
        CellValue::Text(phone.number),
        CellValue::from(phone.extension),
        join_date,
        CellValue::text(text(raw, row, "user_uuid")),
    ])
}

pub(super) fn clean_users(df: &DataFrame) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::User, df, USER_COLUMNS)?;
    let (rows, report) = collect_rows(Entity::User, &raw, |row| clean_user_row(&raw, row));
    finish(Entity::User, &rows, report)
}
