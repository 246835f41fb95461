pub mod api;
pub mod csv_table;
pub mod error;
pub mod json_table;
pub mod polars_utils;
pub mod postgres;
pub mod remote;
pub mod source;
pub mod sqlite;

pub use api::{API_KEY_HEADER, ApiConfig, StoreApiClient, parse_number_stores};
pub use csv_table::{CsvTable, read_csv_frame, read_csv_from_reader, read_csv_table};
pub use error::{IngestError, Result};
pub use json_table::{json_frame_from_str, json_value_to_frame, read_json_frame, records_to_frame};
pub use polars_utils::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_non_empty, cell_text, format_numeric,
    text_frame, unique_headers,
};
pub use postgres::{DEFAULT_POSTGRES_PORT, PostgresConfig, PostgresSource};
pub use remote::{Location, fetch_object};
pub use source::{SourceSpec, extract, spec_for_file};
pub use sqlite::SqliteSource;
