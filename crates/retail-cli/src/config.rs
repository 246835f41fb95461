//! `retail-etl.toml` configuration.
//!
//! ```toml
//! [warehouse]
//! path = "sales_data.db"
//!
//! [sources.user]
//! kind = "sqlite"
//! path = "legacy.db"
//! table = "legacy_users"
//!
//! [sources.orders]
//! kind = "postgres"
//! host = "sales.example.rds.amazonaws.com"
//! database = "postgres"
//! user = "etl"
//! table = "orders_table"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use retail_ingest::{ApiConfig, DEFAULT_POSTGRES_PORT, Location, PostgresConfig, SourceSpec};
use retail_model::Entity;

pub const DEFAULT_CONFIG_FILE: &str = "retail-etl.toml";
pub const DEFAULT_WAREHOUSE_PATH: &str = "sales_data.db";
pub const DEFAULT_API_KEY_ENV: &str = "RETAIL_ETL_API_KEY";
pub const DEFAULT_DB_PASSWORD_ENV: &str = "RETAIL_ETL_DB_PASSWORD";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EtlConfig {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarehouseConfig {
    pub path: PathBuf,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_WAREHOUSE_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", deny_unknown_fields)]
pub enum SourceConfig {
    Csv {
        location: String,
    },
    Json {
        location: String,
    },
    Sqlite {
        path: PathBuf,
        table: String,
    },
    Postgres {
        host: String,
        #[serde(default)]
        port: Option<u16>,
        database: String,
        user: String,
        #[serde(default)]
        password_env: Option<String>,
        table: String,
    },
    Api {
        number_stores_endpoint: String,
        store_endpoint_template: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        api_key_env: Option<String>,
    },
}

fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn resolve_location(base: &Path, location: &str) -> String {
    match Location::parse(location) {
        Ok(Location::Local(path)) => resolve_path(base, &path).display().to_string(),
        _ => location.to_string(),
    }
}

impl SourceConfig {
    /// Build the adapter spec, looking up API keys and passwords through `env`.
    pub fn to_spec_with_env<F>(&self, env: F) -> Result<SourceSpec>
    where
        F: Fn(&str) -> Option<String>,
    {
        let spec = match self {
            SourceConfig::Csv { location } => SourceSpec::Csv {
                location: location.clone(),
            },
            SourceConfig::Json { location } => SourceSpec::Json {
                location: location.clone(),
            },
            SourceConfig::Sqlite { path, table } => SourceSpec::Sqlite {
                path: path.clone(),
                table: table.clone(),
            },
            SourceConfig::Postgres {
                host,
                port,
                database,
                user,
                password_env,
                table,
            } => {
                let var = password_env.as_deref().unwrap_or(DEFAULT_DB_PASSWORD_ENV);
                let password =
                    env(var).with_context(|| format!("password variable {var} is not set"))?;
                SourceSpec::Postgres {
                    config: PostgresConfig {
                        host: host.clone(),
                        port: port.unwrap_or(DEFAULT_POSTGRES_PORT),
                        database: database.clone(),
                        user: user.clone(),
                        password,
                    },
                    table: table.clone(),
                }
            }
            SourceConfig::Api {
                number_stores_endpoint,
                store_endpoint_template,
                api_key,
                api_key_env,
            } => {
                let api_key = match api_key {
                    Some(key) => key.clone(),
                    None => {
                        let var = api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
                        env(var).with_context(|| format!("API key variable {var} is not set"))?
                    }
                };
                SourceSpec::Api(ApiConfig {
                    number_stores_endpoint: number_stores_endpoint.clone(),
                    store_endpoint_template: store_endpoint_template.clone(),
                    api_key,
                })
            }
        };
        Ok(spec)
    }

    pub fn to_spec(&self) -> Result<SourceSpec> {
        self.to_spec_with_env(|name| std::env::var(name).ok())
    }

    fn resolve_relative(&mut self, base: &Path) {
        match self {
            SourceConfig::Csv { location } | SourceConfig::Json { location } => {
                *location = resolve_location(base, location);
            }
            SourceConfig::Sqlite { path, .. } => *path = resolve_path(base, path),
            SourceConfig::Postgres { .. } | SourceConfig::Api { .. } => {}
        }
    }
}

impl EtlConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("parse configuration")?;
        config.entities()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let mut config =
            Self::from_toml_str(&text).with_context(|| format!("load {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        Ok(config)
    }

    fn resolve_relative(&mut self, base: &Path) {
        self.warehouse.path = resolve_path(base, &self.warehouse.path);
        for source in self.sources.values_mut() {
            source.resolve_relative(base);
        }
    }

    /// Configured sources keyed by entity.
    pub fn entities(&self) -> Result<BTreeMap<Entity, &SourceConfig>> {
        let mut entities = BTreeMap::new();
        for (name, source) in &self.sources {
            let entity: Entity = name
                .parse()
                .with_context(|| format!("sources.{name}"))?;
            if entities.insert(entity, source).is_some() {
                bail!("entity {entity} is configured more than once");
            }
        }
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_locations_follow_the_config_directory() {
        let base = Path::new("/etc/retail");
        assert_eq!(resolve_location(base, "cards.csv"), "/etc/retail/cards.csv");
        assert_eq!(
            resolve_location(base, "s3://bucket/products.csv"),
            "s3://bucket/products.csv"
        );
        assert_eq!(resolve_location(base, "/data/x.json"), "/data/x.json");
    }
}
