use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV in {context}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid JSON in {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported JSON layout in {0}: expected records or columns")]
    JsonLayout(String),
    #[error("database error")]
    Sqlite(#[from] rusqlite::Error),
    #[error("postgres error on {context}")]
    Postgres {
        context: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),
    #[error("table `{table}` not found (available: {})", .available.join(", "))]
    TableNotFound {
        table: String,
        available: Vec<String>,
    },
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("response from {url} has no `{field}` field")]
    MissingField { url: String, field: &'static str },
    #[error("store endpoint template must contain `{{store_number}}`: {0}")]
    Template(String),
    #[error("unsupported location: {0}")]
    UnsupportedLocation(String),
    #[error("failed to build frame")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
