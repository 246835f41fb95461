//! DDL rendering from the static schema table.

use polars::prelude::{AnyValue, DataFrame};

use retail_ingest::any_to_string;
use retail_model::{ColumnSpec, EntitySchema, SqlType, referenced_table};

/// Longest value in `column`, in characters; zero when absent or empty.
pub fn max_text_len(df: &DataFrame, column: &str) -> usize {
    let Ok(series) = df.column(column) else {
        return 0;
    };
    (0..df.height())
        .map(|idx| any_to_string(series.get(idx).unwrap_or(AnyValue::Null)).chars().count())
        .max()
        .unwrap_or(0)
}

fn render_create_table(schema: &EntitySchema, column_type: impl Fn(&ColumnSpec) -> String) -> String {
    let mut lines: Vec<String> = schema
        .columns
        .iter()
        .map(|column| {
            let null = if column.nullable { "" } else { " NOT NULL" };
            format!("    {} {}{null}", column.name, column_type(column))
        })
        .collect();
    if let Some(primary_key) = schema.primary_key {
        lines.push(format!("    PRIMARY KEY ({primary_key})"));
    }
    for key in schema.foreign_keys {
        lines.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {} ({})",
            key.column,
            referenced_table(key),
            key.column
        ));
    }
    format!("CREATE TABLE {} (\n{}\n)", schema.table_name, lines.join(",\n"))
}

/// Render `CREATE TABLE` for `schema`, fitting `VARCHAR(?)` columns to `df`.
pub fn create_table_sql(schema: &EntitySchema, df: &DataFrame) -> String {
    render_create_table(schema, |column| {
        let fitted = match column.sql_type {
            SqlType::VarCharFit => max_text_len(df, column.name),
            _ => 0,
        };
        column.sql_type.ddl(fitted)
    })
}

/// Render `CREATE TABLE` with unfitted lengths shown as `VARCHAR(?)`.
pub fn create_table_template(schema: &EntitySchema) -> String {
    render_create_table(schema, |column| column.sql_type.to_string())
}

pub fn insert_sql(schema: &EntitySchema) -> String {
    let names = schema.column_names();
    let placeholders: Vec<String> = (1..=names.len()).map(|idx| format!("?{idx}")).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        schema.table_name,
        names.join(", "),
        placeholders.join(", ")
    )
}

pub fn drop_table_sql(schema: &EntitySchema) -> String {
    format!("DROP TABLE IF EXISTS {}", schema.table_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retail_model::{Entity, schema_for};

    #[test]
    fn insert_uses_numbered_placeholders() {
        assert_eq!(
            insert_sql(schema_for(Entity::Card)),
            "INSERT INTO dim_card_details (card_number, expiry_date, card_provider, \
             date_payment_confirmed) VALUES (?1, ?2, ?3, ?4)"
        );
    }

    #[test]
    fn empty_frames_fit_minimum_length() {
        let ddl = create_table_sql(schema_for(Entity::Card), &DataFrame::default());
        assert!(ddl.contains("card_number VARCHAR(1) NOT NULL"));
    }

    #[test]
    fn template_leaves_lengths_open() {
        let ddl = create_table_template(schema_for(Entity::Store));
        assert!(ddl.contains("store_code VARCHAR(?) NOT NULL"));
        assert!(ddl.contains("latitude FLOAT,"));
        assert!(ddl.contains("PRIMARY KEY (store_code)"));
    }
}
