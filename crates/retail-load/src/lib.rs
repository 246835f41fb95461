//! Warehouse loading for cleaned retail entities.

pub mod ddl;
pub mod error;
pub mod warehouse;

pub use ddl::{create_table_sql, create_table_template, drop_table_sql, insert_sql, max_text_len};
pub use error::{LoadError, Result};
pub use warehouse::Warehouse;
