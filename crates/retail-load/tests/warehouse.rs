//! Loading cleaned frames into the SQLite warehouse.

use retail_core::{EntityFrame, assemble_frame};
use retail_load::{LoadError, Warehouse, create_table_sql};
use retail_model::{CellValue, Entity, schema_for};

fn entity_frame(entity: Entity, rows: Vec<Vec<CellValue>>) -> EntityFrame {
    let data = assemble_frame(schema_for(entity), &rows).expect("assemble frame");
    EntityFrame::new(entity, data)
}

fn text(value: &str) -> CellValue {
    CellValue::text(value)
}

fn users() -> EntityFrame {
    entity_frame(
        Entity::User,
        vec![vec![
            text("Ada"),
            text("Lovelace"),
            text("1990-01-15"),
            text("Engines Ltd"),
            text("ada@example.com"),
            text("1 First Street"),
            text("United Kingdom"),
            text("GB"),
            text("02079460018"),
            CellValue::Missing,
            text("2020-02-01"),
            text("u-1"),
        ]],
    )
}

fn cards() -> EntityFrame {
    entity_frame(
        Entity::Card,
        vec![vec![
            text("4971858637664481"),
            text("09/26"),
            text("VISA 16 digit"),
            text("2015-11-25"),
        ]],
    )
}

fn stores() -> EntityFrame {
    entity_frame(
        Entity::Store,
        vec![vec![
            text("HI-9B97EE4E"),
            text("Local"),
            text("1996-10-25"),
            CellValue::Int(34),
            text("Flat 72W"),
            text("High Wycombe"),
            text("GB"),
            text("Europe"),
            CellValue::Float(51.62907),
            CellValue::Float(-0.74934),
        ]],
    )
}

fn products() -> EntityFrame {
    entity_frame(
        Entity::Product,
        vec![vec![
            text("Pack"),
            CellValue::Float(12.5),
            CellValue::Float(0.45),
            text("Light"),
            text("homeware"),
            text("123"),
            text("2018-10-22"),
            text("p-1"),
            CellValue::Bool(true),
            text("A1-1"),
        ]],
    )
}

fn dates() -> EntityFrame {
    entity_frame(
        Entity::Date,
        vec![vec![
            text("d-1"),
            text("2012-09-19 22:00:06"),
            text("Evening"),
            CellValue::Int(2012),
            CellValue::Int(9),
            CellValue::Int(19),
            text("22:00:06"),
        ]],
    )
}

fn order(store_code: &str) -> Vec<CellValue> {
    vec![
        text("d-1"),
        text("u-1"),
        text("4971858637664481"),
        text(store_code),
        text("A1-1"),
        CellValue::Int(2),
    ]
}

fn load_dimensions(warehouse: &mut Warehouse) {
    for frame in [users(), cards(), stores(), products(), dates()] {
        let loaded = warehouse.load(&frame).expect("load dimension");
        assert_eq!(loaded, 1);
    }
}

#[test]
fn loads_dimensions_then_orders() {
    let mut warehouse = Warehouse::open_in_memory().expect("open warehouse");
    load_dimensions(&mut warehouse);
    let orders = entity_frame(Entity::Orders, vec![order("HI-9B97EE4E")]);
    assert_eq!(warehouse.load(&orders).expect("load orders"), 1);
    assert_eq!(warehouse.row_count(Entity::Orders).expect("count"), 1);
    assert_eq!(warehouse.row_count(Entity::Store).expect("count"), 1);

    let available: i64 = warehouse
        .connection()
        .query_row("SELECT still_available FROM dim_products", [], |row| row.get(0))
        .expect("query flag");
    assert_eq!(available, 1);
}

#[test]
fn orphan_orders_violate_foreign_keys() {
    let mut warehouse = Warehouse::open_in_memory().expect("open warehouse");
    load_dimensions(&mut warehouse);
    let orders = entity_frame(Entity::Orders, vec![order("XX-MISSING")]);
    let error = warehouse.load(&orders).expect_err("foreign key violation");
    assert!(matches!(
        error,
        LoadError::Constraint {
            table: "orders_table",
            ..
        }
    ));
    assert!(!warehouse.table_exists(Entity::Orders).expect("exists"));
}

#[test]
fn reloading_a_dimension_drops_orders() {
    let mut warehouse = Warehouse::open_in_memory().expect("open warehouse");
    load_dimensions(&mut warehouse);
    let orders = entity_frame(Entity::Orders, vec![order("HI-9B97EE4E")]);
    warehouse.load(&orders).expect("load orders");

    let dropped = warehouse.reset_for(&[Entity::Store]).expect("reset store");
    assert_eq!(dropped, vec![Entity::Orders, Entity::Store]);
    assert!(!warehouse.table_exists(Entity::Orders).expect("exists"));
    assert!(!warehouse.table_exists(Entity::Store).expect("exists"));
    assert!(warehouse.table_exists(Entity::User).expect("exists"));

    warehouse.reset().expect("reset all");
    assert!(!warehouse.table_exists(Entity::User).expect("exists"));
}

#[test]
fn card_ddl_fits_varchar_lengths() {
    let frame = cards();
    let ddl = create_table_sql(frame.schema(), &frame.data);
    insta::assert_snapshot!(ddl, @r"
    CREATE TABLE dim_card_details (
        card_number VARCHAR(16) NOT NULL,
        expiry_date VARCHAR(5) NOT NULL,
        card_provider VARCHAR(255) NOT NULL,
        date_payment_confirmed DATE NOT NULL,
        PRIMARY KEY (card_number)
    )
    ");
}

#[test]
fn orders_ddl_declares_foreign_keys() {
    let frame = entity_frame(Entity::Orders, vec![order("HI-9B97EE4E")]);
    let ddl = create_table_sql(frame.schema(), &frame.data);
    insta::assert_snapshot!(ddl, @r"
    CREATE TABLE orders_table (
        date_uuid UUID NOT NULL,
        user_uuid UUID NOT NULL,
        card_number VARCHAR(16) NOT NULL,
        store_code VARCHAR(11) NOT NULL,
        product_code VARCHAR(4) NOT NULL,
        product_quantity SMALLINT NOT NULL,
        FOREIGN KEY (date_uuid) REFERENCES dim_date_times (date_uuid),
        FOREIGN KEY (user_uuid) REFERENCES dim_users (user_uuid),
        FOREIGN KEY (card_number) REFERENCES dim_card_details (card_number),
        FOREIGN KEY (store_code) REFERENCES dim_store_details (store_code),
        FOREIGN KEY (product_code) REFERENCES dim_products (product_code)
    )
    ");
}

#[test]
fn file_warehouse_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sales_data.db");
    {
        let mut warehouse = Warehouse::open(&path).expect("open warehouse");
        warehouse.load(&cards()).expect("load cards");
    }
    let warehouse = Warehouse::open(&path).expect("reopen warehouse");
    assert!(warehouse.table_exists(Entity::Card).expect("table lookup"));
    assert_eq!(warehouse.row_count(Entity::Card).expect("row count"), 1);
}

#[test]
fn reset_without_orders_table_drops_only_requested() {
    let mut warehouse = Warehouse::open_in_memory().expect("open warehouse");
    load_dimensions(&mut warehouse);
    let dropped = warehouse
        .reset_for(&[Entity::Card, Entity::User])
        .expect("reset dimensions");
    assert_eq!(dropped, vec![Entity::Card, Entity::User]);
    assert!(warehouse.table_exists(Entity::Store).expect("exists"));
}
