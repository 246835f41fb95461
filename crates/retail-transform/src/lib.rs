//! Pure value-level parsers and validators used by the cleaning pipeline.
//!
//! Nothing in this crate touches frames; every function maps one raw text
//! value to a normalized value or `None` when the value must be rejected.

pub mod normalization;

pub use normalization::card::{
    CardNumberError, card_digits, normalize_card_number, normalize_expiry,
};
pub use normalization::contact::{
    PhoneNumber, normalize_country_code, normalize_email, normalize_phone,
};
pub use normalization::datetime::{
    compose_datetime, format_date, format_datetime, normalize_date, parse_calendar_date,
    parse_time_of_day,
};
pub use normalization::numeric::{
    is_null_sentinel, normalize_coordinate, parse_f64, parse_i64, parse_price, strip_non_digits,
};
pub use normalization::weight::{WeightClass, WeightUnit, parse_weight_kg};
