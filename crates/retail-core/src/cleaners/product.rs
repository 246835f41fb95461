use polars::prelude::DataFrame;

use retail_model::{CellValue, Entity, RejectReason};
use retail_transform::{WeightClass, parse_price, parse_weight_kg};

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::raw::{RawColumn, RawTable};

use super::common::{Rejection, RowResult, check_required, collect_rows, date_cell, finish, text};

const PRODUCT_COLUMNS: &[RawColumn] = &[
    RawColumn::required("product_name"),
    RawColumn::required("product_price"),
    RawColumn::required("weight").with_aliases(&["weight_kg"]),
    RawColumn::required("category"),
    RawColumn::required("int_article_no").with_aliases(&["EAN"]),
    RawColumn::required("date_added"),
    RawColumn::required("uuid"),
    RawColumn::required("still_available").with_aliases(&["removed"]),
    RawColumn::required("product_code"),
];

/// Map the feed's availability token; the misspelling is part of the source data.
fn parse_availability(value: &str) -> Option<bool> {
    let token = value.trim().to_ascii_lowercase();
    match token.as_str() {
        "still_avaliable" | "still_available" | "true" => Some(true),
        "removed" | "false" => Some(false),
        _ => None,
    }
}

fn clean_product_row(raw: &RawTable, row: usize) -> RowResult {
    check_required(raw, row, PRODUCT_COLUMNS)?;
    let price_raw = text(raw, row, "product_price");
    let price = parse_price(price_raw)
        .ok_or_else(|| Rejection::new(RejectReason::InvalidPrice, "product_price", price_raw))?;
    let weight_raw = text(raw, row, "weight");
    let weight_kg = parse_weight_kg(weight_raw)
        .ok_or_else(|| Rejection::new(RejectReason::InvalidWeight, "weight", weight_raw))?;
    let available_raw = text(raw, row, "still_available");
    let still_available = parse_availability(available_raw).ok_or_else(|| {
        Rejection::new(
            RejectReason::InvalidAvailability,
            "still_available",
            available_raw,
        )
    })?;
    let date_added = date_cell(raw, row, "date_added")?;
    Ok(vec![
        CellValue::text(text(raw, row, "product_name")),
        CellValue::Float(price),
        CellValue::Float(weight_kg),
        CellValue::text(WeightClass::for_weight(weight_kg).as_str()),
        CellValue::text(text(raw, row, "category")),
        CellValue::text(text(raw, row, "int_article_no")),
        date_added,
        CellValue::text(text(raw, row, "uuid")),
        CellValue::Bool(still_available),
        CellValue::text(text(raw, row, "product_code")),
    ])
}

pub(super) fn clean_products(df: &DataFrame) -> Result<CleanedFrame> {
    let raw = RawTable::from_frame(Entity::Product, df, PRODUCT_COLUMNS)?;
    let (rows, report) = collect_rows(Entity::Product, &raw, |row| clean_product_row(&raw, row));
    finish(Entity::Product, &rows, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_tokens() {
        assert_eq!(parse_availability("Still_avaliable"), Some(true));
        assert_eq!(parse_availability("still_available"), Some(true));
        assert_eq!(parse_availability("Removed"), Some(false));
        assert_eq!(parse_availability("maybe"), None);
    }
}
