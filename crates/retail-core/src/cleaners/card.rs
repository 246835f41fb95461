use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason};
use retail_transform::{normalize_card_number, normalize_expiry};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};

use super::common::{Rejection, RowResult, check_required, collect_rows, date_cell, finish, text};

const CARD_COLUMNS: &[RawColumn] = &[
    RawColumn::required("card_number"),
    RawColumn::required("expiry_date"),
    RawColumn::required("card_provider"),
    RawColumn::required("date_payment_confirmed"),
];

fn clean_card_row(raw: &RawTable, row: usize) -> RowResult {
    check_required(raw, row, CARD_COLUMNS)?;
    let provider = text(raw, row, "card_provider");
    let number_raw = text(raw, row, "card_number");
    let card_number = normalize_card_number(number_raw, provider).map_err(|_| {
        Rejection::new(RejectReason::InvalidCardNumber, "card_number", number_raw)
    })?;
    let expiry_raw = text(raw, row, "expiry_date");
    let expiry = normalize_expiry(expiry_raw)
        .ok_or_else(|| Rejection::new(RejectReason::InvalidExpiry, "expiry_date", expiry_raw))?;
    let confirmed = date_cell(raw, row, "date_payment_confirmed")?;
    Ok(vec![
        CellValue::Text(card_number),
        CellValue::Text(expiry),
        CellValue::text(provider),
        confirmed,
    ])
}

pub(super) fn clean_cards(df: &DataFrame) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::Card, df, CARD_COLUMNS)?;
    let (rows, report) = collect_rows(Entity::Card, &raw, |row| clean_card_row(&raw, row));
    finish(Entity::Card, &rows, report)
}
