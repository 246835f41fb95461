//! Library components of the retail ETL command-line driver.

pub mod config;
pub mod logging;
pub mod pipeline;
