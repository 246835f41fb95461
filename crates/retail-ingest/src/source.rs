use std::path::PathBuf;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::api::{ApiConfig, StoreApiClient};
use crate::csv_table::read_csv_from_reader;
use crate::error::{IngestError, Result};
use crate::json_table::json_frame_from_str;
use crate::postgres::{PostgresConfig, PostgresSource};
use crate::remote::{Location, fetch_object};
use crate::sqlite::SqliteSource;

/// Where one entity's raw rows come from.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    Csv { location: String },
    Json { location: String },
    Sqlite { path: PathBuf, table: String },
    Postgres { config: PostgresConfig, table: String },
    Api(ApiConfig),
}

impl SourceSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            SourceSpec::Csv { .. } => "csv",
            SourceSpec::Json { .. } => "json",
            SourceSpec::Sqlite { .. } => "sqlite",
            SourceSpec::Postgres { .. } => "postgres",
            SourceSpec::Api(_) => "api",
        }
    }

    pub fn describe(&self) -> String {
        match self {
            SourceSpec::Csv { location } | SourceSpec::Json { location } => location.clone(),
            SourceSpec::Sqlite { path, table } => format!("{}#{table}", path.display()),
            SourceSpec::Postgres { config, table } => format!("{}#{table}", config.describe()),
            SourceSpec::Api(config) => config.number_stores_endpoint.clone(),
        }
    }
}

/// Pick CSV or JSON parsing for a file based on its extension.
pub fn spec_for_file(location: &str) -> Result<SourceSpec> {
    let ext = Location::parse(location)?.extension();
    match ext.as_deref() {
        Some("json") => Ok(SourceSpec::Json {
            location: location.to_string(),
        }),
        Some("csv" | "txt") => Ok(SourceSpec::Csv {
            location: location.to_string(),
        }),
        _ => Err(IngestError::UnsupportedLocation(location.to_string())),
    }
}

/// Pull one raw, all-text frame from a source.
pub fn extract(spec: &SourceSpec) -> Result<DataFrame> {
    let span = info_span!("extract", kind = spec.kind(), source = %spec.describe());
    let _guard = span.enter();
    let start = Instant::now();
    let frame = match spec {
        SourceSpec::Csv { location } => {
            let bytes = fetch_object(&Location::parse(location)?)?;
            read_csv_from_reader(bytes.as_slice(), location)?.to_frame()?
        }
        SourceSpec::Json { location } => {
            let bytes = fetch_object(&Location::parse(location)?)?;
            let text = String::from_utf8_lossy(&bytes);
            json_frame_from_str(&text, location)?
        }
        SourceSpec::Sqlite { path, table } => SqliteSource::open(path)?.read_table(table)?,
        SourceSpec::Postgres { config, table } => {
            PostgresSource::connect(config)?.read_table(table)?
        }
        SourceSpec::Api(config) => StoreApiClient::new(config.clone())?.retrieve_all_stores()?,
    };
    info!(
        rows = frame.height(),
        columns = frame.width(),
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );
    Ok(frame)
}
