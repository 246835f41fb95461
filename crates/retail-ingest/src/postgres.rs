//! Read-only access to a PostgreSQL source database.
//!
//! Rows are fetched as `row_to_json` text so every column type arrives as a
//! JSON scalar, then flattened into an all-text frame in column order.

use std::fmt;
use std::time::Duration;

use polars::prelude::DataFrame;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::json_table::records_to_frame;
use crate::polars_utils::text_frame;

pub const DEFAULT_POSTGRES_PORT: u16 = 5432;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

const SOURCE_SCHEMA: &str = "public";

#[derive(Clone)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PostgresConfig {
    /// Connection target without the password.
    pub fn describe(&self) -> String {
        format!(
            "postgres://{}@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

pub struct PostgresSource {
    pool: PgPool,
    context: String,
    runtime: Runtime,
}

impl PostgresSource {
    pub fn connect(config: &PostgresConfig) -> Result<Self> {
        let context = config.describe();
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(IngestError::Runtime)?;
        let pool = runtime
            .block_on(
                PgPoolOptions::new()
                    .max_connections(1)
                    .acquire_timeout(ACQUIRE_TIMEOUT)
                    .connect_with(config.connect_options()),
            )
            .map_err(|source| IngestError::Postgres {
                context: context.clone(),
                source,
            })?;
        debug!(database = %context, "connected to postgres");
        Ok(Self {
            pool,
            context,
            runtime,
        })
    }

    fn query_error(&self, source: sqlx::Error) -> IngestError {
        IngestError::Postgres {
            context: self.context.clone(),
            source,
        }
    }

    pub fn list_tables(&self) -> Result<Vec<String>> {
        self.runtime
            .block_on(
                sqlx::query_scalar::<_, String>(
                    "SELECT table_name::text FROM information_schema.tables \
                     WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
                     ORDER BY table_name",
                )
                .bind(SOURCE_SCHEMA)
                .fetch_all(&self.pool),
            )
            .map_err(|source| self.query_error(source))
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>> {
        self.runtime
            .block_on(
                sqlx::query_scalar::<_, String>(
                    "SELECT column_name::text FROM information_schema.columns \
                     WHERE table_schema = $1 AND table_name = $2 \
                     ORDER BY ordinal_position",
                )
                .bind(SOURCE_SCHEMA)
                .bind(table)
                .fetch_all(&self.pool),
            )
            .map_err(|source| self.query_error(source))
    }

    /// Read every row of `table` as text cells.
    pub fn read_table(&self, table: &str) -> Result<DataFrame> {
        let available = self.list_tables()?;
        if !available.iter().any(|name| name == table) {
            return Err(IngestError::TableNotFound {
                table: table.to_string(),
                available,
            });
        }
        let query = format!(
            "SELECT row_to_json(t)::text FROM {}.{} AS t",
            quote_identifier(SOURCE_SCHEMA),
            quote_identifier(table)
        );
        let rows = self
            .runtime
            .block_on(sqlx::query_scalar::<_, String>(&query).fetch_all(&self.pool))
            .map_err(|source| self.query_error(source))?;
        debug!(table, rows = rows.len(), "read postgres table");
        if rows.is_empty() {
            return text_frame(&self.column_names(table)?, &[]);
        }
        json_rows_to_frame(&rows, table)
    }
}

impl Drop for PostgresSource {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn json_rows_to_frame(rows: &[String], context: &str) -> Result<DataFrame> {
    let records = rows
        .iter()
        .map(|row| match serde_json::from_str::<Value>(row) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(_) => Err(IngestError::JsonLayout(context.to_string())),
            Err(source) => Err(IngestError::Json {
                context: context.to_string(),
                source,
            }),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;
    records_to_frame(&records)
}
