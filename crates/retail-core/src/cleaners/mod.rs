//! Per-entity cleaning rules.
//!
//! Each cleaner reads the raw, all-text frame of one entity, validates and
//! coerces every row, and returns the valid rows in canonical column order
//! together with a [`CleaningReport`](retail_model::CleaningReport). Row
//! failures are tallied, never fatal; only missing required columns fail the
//! whole entity.
//!
//! | Entity | Table | Key rules |
//! |--------|-------|-----------|
//! | User | `dim_users` | dates, email, country-aware phone |
//! | Card | `dim_card_details` | provider card length, `MM/YY` expiry |
//! | Store | `dim_store_details` | store type, staff count, coordinates |
//! | Product | `dim_products` | price, weight in kg, weight class |
//! | Orders | `orders_table` | quantity, foreign keys |
//! | Date | `dim_date_times` | composed timestamp, time period |

mod card;
mod common;
mod date;
mod orders;
mod product;
mod store;
mod user;

use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use retail_model::Entity;

use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::references::ReferenceKeys;

/// Clean one entity's raw frame.
///
/// `refs` only matters for orders; a dimension missing from it is not checked.
pub fn clean_entity(entity: Entity, raw: &DataFrame, refs: &ReferenceKeys) -> Result<CleanedFrame> {
    let span = info_span!("clean", entity = %entity);
    let _guard = span.enter();
    let start = Instant::now();
    let cleaned = match entity {
        Entity::User => user::clean_users(raw)?,
        Entity::Card => card::clean_cards(raw)?,
        Entity::Store => store::clean_stores(raw)?,
        Entity::Product => product::clean_products(raw)?,
        Entity::Orders => orders::clean_orders(raw, refs)?,
        Entity::Date => date::clean_dates(raw)?,
    };
    let report = &cleaned.report;
    for tally in &report.rejections {
        debug!(
            rule = tally.reason.code(),
            column = tally.column.as_deref().unwrap_or_default(),
            count = tally.count,
            "rows rejected"
        );
    }
    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        dropped = report.dropped(),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    Ok(cleaned)
}
