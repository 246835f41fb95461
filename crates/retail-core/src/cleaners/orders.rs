use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason, schema_for};
use retail_transform::{card_digits, parse_i64};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};
use crate::references::ReferenceKeys;

use super::common::{Rejection, RowResult, check_required, collect_rows, finish, text};

const MAX_QUANTITY: i64 = i16::MAX as i64;

const ORDER_COLUMNS: &[RawColumn] = &[
    RawColumn::required("date_uuid"),
    RawColumn::required("user_uuid"),
    RawColumn::required("card_number"),
    RawColumn::required("store_code"),
    RawColumn::required("product_code"),
    RawColumn::required("product_quantity"),
];

fn clean_order_row(raw: &RawTable, row: usize, refs: &ReferenceKeys) -> RowResult {
    check_required(raw, row, ORDER_COLUMNS)?;
    let card_raw = text(raw, row, "card_number");
    let card_number = card_digits(card_raw).map_err(|_| {
        Rejection::new(RejectReason::InvalidCardNumber, "card_number", card_raw)
    })?;
    let quantity_raw = text(raw, row, "product_quantity");
    let quantity = parse_i64(quantity_raw)
        .filter(|quantity| (1..=MAX_QUANTITY).contains(quantity))
        .ok_or_else(|| {
            Rejection::new(RejectReason::InvalidQuantity, "product_quantity", quantity_raw)
        })?;
    for key in schema_for(Entity::Orders).foreign_keys {
        let value = if key.column == "card_number" {
            card_number.as_str()
        } else {
            text(raw, row, key.column)
        };
        if refs.contains(key.references, value) == Some(false) {
            return Err(Rejection::new(
                RejectReason::OrphanReference,
                key.column,
                value,
            ));
        }
    }
    Ok(vec![
        CellValue::text(text(raw, row, "date_uuid")),
        CellValue::text(text(raw, row, "user_uuid")),
        CellValue::Text(card_number),
        CellValue::text(text(raw, row, "store_code")),
        CellValue::text(text(raw, row, "product_code")),
        CellValue::Int(quantity),
    ])
}

/// Clean the orders fact table, rejecting rows whose keys are absent from `refs`.
pub(super) fn clean_orders(df: &DataFrame, refs: &ReferenceKeys) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::Orders, df, ORDER_COLUMNS)?;
    let (rows, report) =
        collect_rows(Entity::Orders, &raw, |row| clean_order_row(&raw, row, refs));
    finish(Entity::Orders, &rows, report)
}
