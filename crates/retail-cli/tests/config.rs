//! Configuration parsing and source resolution.

use std::fs;

use retail_cli::config::{DEFAULT_API_KEY_ENV, DEFAULT_DB_PASSWORD_ENV, EtlConfig, SourceConfig};
use retail_ingest::SourceSpec;
use retail_model::Entity;

const CONFIG: &str = r#"
[warehouse]
path = "warehouse.db"

[sources.user]
kind = "sqlite"
path = "legacy.db"
table = "legacy_users"

[sources.card]
kind = "csv"
location = "card_details.csv"

[sources.product]
kind = "csv"
location = "s3://data-handling-public/products.csv"

[sources.dim_date_times]
kind = "json"
location = "https://example.test/date_details.json"

[sources.store]
kind = "api"
number_stores_endpoint = "https://example.test/number_stores"
store_endpoint_template = "https://example.test/store_details/{store_number}"
"#;

#[test]
fn parses_sources_by_entity_name() {
    let config = EtlConfig::from_toml_str(CONFIG).expect("parse config");
    let entities = config.entities().expect("entities");
    let keys: Vec<Entity> = entities.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            Entity::User,
            Entity::Card,
            Entity::Store,
            Entity::Product,
            Entity::Date
        ]
    );
    assert!(matches!(
        entities[&Entity::User],
        SourceConfig::Sqlite { table, .. } if table == "legacy_users"
    ));
}

#[test]
fn api_key_comes_from_the_environment() {
    let config = EtlConfig::from_toml_str(CONFIG).expect("parse config");
    let store = config.sources["store"].clone();

    let spec = store
        .to_spec_with_env(|name| (name == DEFAULT_API_KEY_ENV).then(|| "secret".to_string()))
        .expect("spec");
    match spec {
        SourceSpec::Api(api) => {
            assert_eq!(api.api_key, "secret");
            assert!(!format!("{api:?}").contains("secret"));
        }
        other => panic!("unexpected spec: {other:?}"),
    }

    let missing = store.to_spec_with_env(|_| None).expect_err("missing key");
    assert!(format!("{missing:#}").contains(DEFAULT_API_KEY_ENV));
}

#[test]
fn rejects_unknown_entities_and_kinds() {
    let unknown_entity = "[sources.customers]\nkind = \"csv\"\nlocation = \"c.csv\"\n";
    assert!(EtlConfig::from_toml_str(unknown_entity).is_err());

    let unknown_kind = "[sources.user]\nkind = \"parquet\"\nlocation = \"u.parquet\"\n";
    assert!(EtlConfig::from_toml_str(unknown_kind).is_err());

    let duplicate = "[sources.user]\nkind = \"csv\"\nlocation = \"a.csv\"\n\n\
                     [sources.users]\nkind = \"csv\"\nlocation = \"b.csv\"\n";
    assert!(EtlConfig::from_toml_str(duplicate).is_err());
}

#[test]
fn load_resolves_relative_paths() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("retail-etl.toml");
    fs::write(&path, CONFIG).expect("write config");

    let config = EtlConfig::load(&path).expect("load config");
    assert_eq!(config.warehouse.path, dir.path().join("warehouse.db"));
    match &config.sources["card"] {
        SourceConfig::Csv { location } => {
            assert_eq!(
                location,
                &dir.path().join("card_details.csv").display().to_string()
            );
        }
        other => panic!("unexpected source: {other:?}"),
    }
    match &config.sources["product"] {
        SourceConfig::Csv { location } => {
            assert_eq!(location, "s3://data-handling-public/products.csv");
        }
        other => panic!("unexpected source: {other:?}"),
    }
}

#[test]
fn postgres_sources_read_the_password_from_the_environment() {
    let text = r#"
[sources.orders]
kind = "postgres"
host = "sales.example.test"
database = "postgres"
user = "etl"
table = "orders_table"

[sources.user]
kind = "postgres"
host = "sales.example.test"
port = 6543
database = "postgres"
user = "etl"
password_env = "LEGACY_DB_PASSWORD"
table = "legacy_users"
"#;
    let config = EtlConfig::from_toml_str(text).expect("parse config");

    let orders = config.sources["orders"]
        .to_spec_with_env(|name| (name == DEFAULT_DB_PASSWORD_ENV).then(|| "s3cret-pw".to_string()))
        .expect("orders spec");
    match orders {
        SourceSpec::Postgres { config, table } => {
            assert_eq!(table, "orders_table");
            assert_eq!(config.port, 5432);
            assert_eq!(config.password, "s3cret-pw");
            assert!(!format!("{config:?}").contains("s3cret"));
        }
        other => panic!("unexpected spec: {other:?}"),
    }

    let users = config.sources["user"]
        .to_spec_with_env(|name| (name == "LEGACY_DB_PASSWORD").then(|| "legacy".to_string()))
        .expect("user spec");
    assert_eq!(users.kind(), "postgres");
    assert_eq!(
        users.describe(),
        "postgres://etl@sales.example.test:6543/postgres#legacy_users"
    );

    let missing = config.sources["user"]
        .to_spec_with_env(|_| None)
        .expect_err("missing password");
    assert!(format!("{missing:#}").contains("LEGACY_DB_PASSWORD"));
}
