//! Static schema table shared by cleaning and loading.
//!
//! Each entity has exactly one [`EntitySchema`] describing the warehouse table
//! name, the canonical column order with SQL types, the primary key, the
//! foreign keys and the natural key used for deduplication.

use std::fmt;

use serde::Serialize;

use crate::entity::Entity;
use crate::error::Result;

/// Declared warehouse type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SqlType {
    Text,
    VarChar(u32),
    /// `VARCHAR(n)` with `n` fitted to the longest loaded value.
    VarCharFit,
    SmallInt,
    Float,
    Date,
    Timestamp,
    Uuid,
    Bool,
}

/// In-frame representation chosen for a [`SqlType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Text,
    Integer,
    Float,
    Boolean,
}

impl SqlType {
    pub fn storage(self) -> StorageKind {
        match self {
            SqlType::SmallInt => StorageKind::Integer,
            SqlType::Float => StorageKind::Float,
            SqlType::Bool => StorageKind::Boolean,
            SqlType::Text
            | SqlType::VarChar(_)
            | SqlType::VarCharFit
            | SqlType::Date
            | SqlType::Timestamp
            | SqlType::Uuid => StorageKind::Text,
        }
    }

    /// Render the DDL type; `fitted_len` only matters for [`SqlType::VarCharFit`].
    pub fn ddl(self, fitted_len: usize) -> String {
        match self {
            SqlType::Text => "TEXT".to_string(),
            SqlType::VarChar(len) => format!("VARCHAR({len})"),
            SqlType::VarCharFit => format!("VARCHAR({})", fitted_len.max(1)),
            SqlType::SmallInt => "SMALLINT".to_string(),
            SqlType::Float => "FLOAT".to_string(),
            SqlType::Date => "DATE".to_string(),
            SqlType::Timestamp => "TIMESTAMP".to_string(),
            SqlType::Uuid => "UUID".to_string(),
            SqlType::Bool => "BOOL".to_string(),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::VarCharFit => f.write_str("VARCHAR(?)"),
            other => f.write_str(&other.ddl(0)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
}

/// `column` references the primary key of `references`, which shares its name.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: Entity,
}

#[derive(Debug, Serialize)]
pub struct EntitySchema {
    pub entity: Entity,
    pub table_name: &'static str,
    pub columns: &'static [ColumnSpec],
    pub primary_key: Option<&'static str>,
    pub foreign_keys: &'static [ForeignKey],
    /// Empty means the whole canonical row is the key.
    pub natural_key: &'static [&'static str],
}

impl EntitySchema {
    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.name).collect()
    }

    pub fn dedupe_keys(&self) -> Vec<&'static str> {
        if self.natural_key.is_empty() {
            self.column_names()
        } else {
            self.natural_key.to_vec()
        }
    }
}

const fn col(name: &'static str, sql_type: SqlType) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type,
        nullable: false,
    }
}

const fn nullable(name: &'static str, sql_type: SqlType) -> ColumnSpec {
    ColumnSpec {
        name,
        sql_type,
        nullable: true,
    }
}

const NAME: SqlType = SqlType::VarChar(255);

static USER_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::User,
    table_name: "dim_users",
    columns: &[
        col("first_name", NAME),
        col("last_name", NAME),
        col("date_of_birth", SqlType::Date),
        col("company", NAME),
        col("email_address", NAME),
        col("address", SqlType::Text),
        col("country", NAME),
        col("country_code", SqlType::VarCharFit),
        col("phone_number", SqlType::VarCharFit),
        nullable("phone_extension", SqlType::VarCharFit),
        col("join_date", SqlType::Date),
        col("user_uuid", SqlType::Uuid),
    ],
    primary_key: Some("user_uuid"),
    foreign_keys: &[],
    natural_key: &["user_uuid"],
};

static CARD_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Card,
    table_name: "dim_card_details",
    columns: &[
        col("card_number", SqlType::VarCharFit),
        col("expiry_date", SqlType::VarCharFit),
        col("card_provider", NAME),
        col("date_payment_confirmed", SqlType::Date),
    ],
    primary_key: Some("card_number"),
    foreign_keys: &[],
    natural_key: &["card_number"],
};

static STORE_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Store,
    table_name: "dim_store_details",
    columns: &[
        col("store_code", SqlType::VarCharFit),
        col("store_type", NAME),
        col("opening_date", SqlType::Date),
        col("staff_numbers", SqlType::SmallInt),
        col("address", SqlType::Text),
        col("locality", NAME),
        col("country_code", SqlType::VarCharFit),
        col("continent", NAME),
        nullable("latitude", SqlType::Float),
        nullable("longitude", SqlType::Float),
    ],
    primary_key: Some("store_code"),
    foreign_keys: &[],
    natural_key: &["store_code"],
};

static PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Product,
    table_name: "dim_products",
    columns: &[
        col("product_name", SqlType::Text),
        col("product_price", SqlType::Float),
        col("weight_kg", SqlType::Float),
        col("weight_class", SqlType::VarCharFit),
        col("category", NAME),
        col("int_article_no", SqlType::VarCharFit),
        col("date_added", SqlType::Date),
        col("uuid", SqlType::Uuid),
        col("still_available", SqlType::Bool),
        col("product_code", SqlType::VarCharFit),
    ],
    primary_key: Some("product_code"),
    foreign_keys: &[],
    natural_key: &["product_code"],
};

static ORDERS_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Orders,
    table_name: "orders_table",
    columns: &[
        col("date_uuid", SqlType::Uuid),
        col("user_uuid", SqlType::Uuid),
        col("card_number", SqlType::VarCharFit),
        col("store_code", SqlType::VarCharFit),
        col("product_code", SqlType::VarCharFit),
        col("product_quantity", SqlType::SmallInt),
    ],
    primary_key: None,
    foreign_keys: &[
        ForeignKey {
            column: "date_uuid",
            references: Entity::Date,
        },
        ForeignKey {
            column: "user_uuid",
            references: Entity::User,
        },
        ForeignKey {
            column: "card_number",
            references: Entity::Card,
        },
        ForeignKey {
            column: "store_code",
            references: Entity::Store,
        },
        ForeignKey {
            column: "product_code",
            references: Entity::Product,
        },
    ],
    natural_key: &[],
};

static DATE_SCHEMA: EntitySchema = EntitySchema {
    entity: Entity::Date,
    table_name: "dim_date_times",
    columns: &[
        col("date_uuid", SqlType::Uuid),
        col("date_time", SqlType::Timestamp),
        col("time_period", SqlType::VarCharFit),
        col("year", SqlType::SmallInt),
        col("month", SqlType::SmallInt),
        col("day", SqlType::SmallInt),
        col("timestamp", SqlType::VarCharFit),
    ],
    primary_key: Some("date_uuid"),
    foreign_keys: &[],
    natural_key: &["date_uuid"],
};

pub fn schema_for(entity: Entity) -> &'static EntitySchema {
    match entity {
        Entity::User => &USER_SCHEMA,
        Entity::Card => &CARD_SCHEMA,
        Entity::Store => &STORE_SCHEMA,
        Entity::Product => &PRODUCT_SCHEMA,
        Entity::Orders => &ORDERS_SCHEMA,
        Entity::Date => &DATE_SCHEMA,
    }
}

/// Look up a schema by entity name or warehouse table name.
pub fn resolve(name: &str) -> Result<&'static EntitySchema> {
    let entity: Entity = name.parse()?;
    Ok(schema_for(entity))
}

/// All schemas, dimensions first.
pub fn schemas_in_load_order() -> impl Iterator<Item = &'static EntitySchema> {
    Entity::LOAD_ORDER.into_iter().map(schema_for)
}

/// Resolve the referenced table of a foreign key.
pub fn referenced_table(key: &ForeignKey) -> &'static str {
    schema_for(key.references).table_name
}
