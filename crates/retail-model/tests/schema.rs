//! Tests for the schema table.

use retail_model::{Entity, SchemaError, SqlType, StorageKind, resolve, schema_for};

#[test]
fn resolves_entity_and_table_names() {
    assert_eq!(resolve("user").expect("user").table_name, "dim_users");
    assert_eq!(resolve("Orders").expect("orders").table_name, "orders_table");
    assert_eq!(
        resolve("dim_card_details").expect("card table").entity,
        Entity::Card
    );
}

#[test]
fn unknown_entity_is_an_error() {
    let error = resolve("invoices").expect_err("unknown entity");
    assert!(matches!(error, SchemaError::UnknownEntity(ref name) if name == "invoices"));
    assert_eq!(error.to_string(), "unknown entity: invoices");
}

#[test]
fn orders_reference_every_dimension_by_primary_key() {
    let orders = schema_for(Entity::Orders);
    assert!(orders.primary_key.is_none());
    assert_eq!(orders.foreign_keys.len(), 5);
    for key in orders.foreign_keys {
        let target = schema_for(key.references);
        assert_eq!(target.primary_key, Some(key.column));
        assert!(orders.column(key.column).is_some());
    }
}

#[test]
fn dimensions_declare_primary_keys_in_their_columns() {
    for entity in Entity::LOAD_ORDER {
        let schema = schema_for(entity);
        if let Some(pk) = schema.primary_key {
            let spec = schema.column(pk).expect("pk column");
            assert!(!spec.nullable, "{pk} must be non-null");
        }
        assert!(entity.is_dimension() == schema.primary_key.is_some());
    }
}

#[test]
fn load_order_puts_orders_last() {
    let ordered = Entity::in_load_order(&[Entity::Orders, Entity::Store, Entity::User]);
    assert_eq!(ordered, vec![Entity::User, Entity::Store, Entity::Orders]);
    assert_eq!(Entity::LOAD_ORDER.last(), Some(&Entity::Orders));
}

#[test]
fn orders_dedupe_on_whole_row() {
    let orders = schema_for(Entity::Orders);
    assert_eq!(orders.dedupe_keys(), orders.column_names());
    assert_eq!(schema_for(Entity::User).dedupe_keys(), vec!["user_uuid"]);
}

#[test]
fn sql_types_map_to_storage() {
    assert_eq!(SqlType::SmallInt.storage(), StorageKind::Integer);
    assert_eq!(SqlType::Uuid.storage(), StorageKind::Text);
    assert_eq!(SqlType::Bool.storage(), StorageKind::Boolean);
    assert_eq!(SqlType::VarCharFit.ddl(0), "VARCHAR(1)");
    assert_eq!(SqlType::VarCharFit.ddl(19), "VARCHAR(19)");
    assert_eq!(SqlType::VarCharFit.to_string(), "VARCHAR(?)");
    assert_eq!(SqlType::VarChar(255).to_string(), "VARCHAR(255)");
}
