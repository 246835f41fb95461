//! SQLite warehouse with foreign-key enforcement.
//!
//! Every load replaces the entity's table: the table is dropped, recreated
//! from the schema table with lengths fitted to the frame, and filled inside a
//! single transaction. Dimensions must be loaded before orders.

use std::path::Path;
use std::time::Instant;

use polars::prelude::AnyValue;
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, params_from_iter};
use tracing::{info, info_span, warn};

use retail_core::EntityFrame;
use retail_ingest::{any_to_i64, any_to_string};
use retail_model::{Entity, schema_for};

use crate::ddl::{create_table_sql, drop_table_sql, insert_sql};
use crate::error::{LoadError, Result};

pub struct Warehouse {
    conn: Connection,
}

fn is_constraint(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn constraint_or_sqlite(table: &'static str, error: rusqlite::Error) -> LoadError {
    if is_constraint(&error) {
        LoadError::Constraint {
            table,
            source: error,
        }
    } else {
        LoadError::Sqlite(error)
    }
}

fn sql_value(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(flag) => Value::Integer(i64::from(flag)),
        AnyValue::Float32(v) => Value::Real(f64::from(v)),
        AnyValue::Float64(v) => Value::Real(v),
        AnyValue::String(s) => Value::Text(s.to_string()),
        AnyValue::StringOwned(s) => Value::Text(s.to_string()),
        other => match any_to_i64(other.clone()) {
            Some(v) => Value::Integer(v),
            None => Value::Text(any_to_string(other)),
        },
    }
}

impl Warehouse {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::configure(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn table_exists(&self, entity: Entity) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [schema_for(entity).table_name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Drop every warehouse table, orders first.
    pub fn reset(&mut self) -> Result<()> {
        self.reset_for(&Entity::LOAD_ORDER)?;
        Ok(())
    }

    /// Drop the tables of `entities` ahead of a reload; returns every entity
    /// whose table was dropped, orders first.
    ///
    /// Reloading any dimension also drops an existing orders table, since its
    /// rows would reference the dropped dimension rows.
    pub fn reset_for(&mut self, entities: &[Entity]) -> Result<Vec<Entity>> {
        let mut targets = entities.to_vec();
        if entities.iter().any(|entity| entity.is_dimension())
            && !entities.contains(&Entity::Orders)
            && self.table_exists(Entity::Orders)?
        {
            warn!("dropping orders_table before reloading dimensions");
            targets.push(Entity::Orders);
        }
        let mut ordered = Entity::in_load_order(&targets);
        ordered.reverse();
        let tx = self.conn.transaction()?;
        for entity in &ordered {
            let schema = schema_for(*entity);
            tx.execute_batch(&drop_table_sql(schema))
                .map_err(|error| constraint_or_sqlite(schema.table_name, error))?;
        }
        tx.commit()?;
        Ok(ordered)
    }

    /// Replace the entity's table with the rows of `frame`; returns rows loaded.
    pub fn load(&mut self, frame: &EntityFrame) -> Result<usize> {
        let schema = frame.schema();
        let table = schema.table_name;
        let span = info_span!("load", table);
        let _guard = span.enter();
        let start = Instant::now();

        let mut columns = Vec::with_capacity(schema.columns.len());
        for spec in schema.columns {
            let column = frame
                .data
                .column(spec.name)
                .map_err(|_| LoadError::MissingColumn {
                    table,
                    column: spec.name,
                })?;
            columns.push(column);
        }

        let tx = self.conn.transaction()?;
        tx.execute_batch(&drop_table_sql(schema))
            .map_err(|error| constraint_or_sqlite(table, error))?;
        tx.execute_batch(&create_table_sql(schema, &frame.data))?;
        let height = frame.data.height();
        {
            let mut stmt = tx.prepare(&insert_sql(schema))?;
            for idx in 0..height {
                let mut values = Vec::with_capacity(columns.len());
                for column in &columns {
                    let value = column
                        .get(idx)
                        .map_err(|source| LoadError::Frame { table, source })?;
                    values.push(sql_value(value));
                }
                stmt.execute(params_from_iter(values))
                    .map_err(|error| constraint_or_sqlite(table, error))?;
            }
        }
        tx.commit()?;
        info!(
            rows = height,
            duration_ms = start.elapsed().as_millis(),
            "load complete"
        );
        Ok(height)
    }

    pub fn row_count(&self, entity: Entity) -> Result<usize> {
        let query = format!("SELECT COUNT(*) FROM {}", schema_for(entity).table_name);
        let count: i64 = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
