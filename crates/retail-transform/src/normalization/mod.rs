//! Normalization functions for raw retail values.
//!
//! - **datetime**: multi-format calendar date parsing
//! - **weight**: unit-aware weight conversion to kilograms
//! - **contact**: email and phone validation
//! - **card**: payment card number and expiry checks
//! - **numeric**: sentinels, prices, coordinates

pub mod card;
pub mod contact;
pub mod datetime;
pub mod numeric;
pub mod weight;
