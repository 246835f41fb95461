use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open warehouse {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("warehouse error")]
    Sqlite(#[from] rusqlite::Error),
    #[error("constraint violation while loading {table}")]
    Constraint {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{table}: cleaned frame has no column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table}: failed to read cleaned frame")]
    Frame {
        table: &'static str,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, LoadError>;
