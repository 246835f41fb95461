use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// One of the six canonical warehouse tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    User,
    Card,
    Store,
    Product,
    Orders,
    Date,
}

impl Entity {
    /// Load order: every dimension before the orders fact table.
    pub const LOAD_ORDER: [Entity; 6] = [
        Entity::User,
        Entity::Card,
        Entity::Store,
        Entity::Product,
        Entity::Date,
        Entity::Orders,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Card => "card",
            Entity::Store => "store",
            Entity::Product => "product",
            Entity::Orders => "orders",
            Entity::Date => "date",
        }
    }

    pub fn is_dimension(self) -> bool {
        !matches!(self, Entity::Orders)
    }

    pub fn load_rank(self) -> usize {
        Self::LOAD_ORDER
            .iter()
            .position(|entity| *entity == self)
            .unwrap_or(Self::LOAD_ORDER.len())
    }

    /// Sort entities so dimensions precede orders, dropping repeats.
    pub fn in_load_order(entities: &[Entity]) -> Vec<Entity> {
        let mut ordered: Vec<Entity> = entities.to_vec();
        ordered.sort_by_key(|entity| entity.load_rank());
        ordered.dedup();
        ordered
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = SchemaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase();
        let entity = match key.as_str() {
            "user" | "users" | "dim_users" => Entity::User,
            "card" | "cards" | "dim_card_details" => Entity::Card,
            "store" | "stores" | "dim_store_details" => Entity::Store,
            "product" | "products" | "dim_products" => Entity::Product,
            "orders" | "order" | "orders_table" => Entity::Orders,
            "date" | "dates" | "dim_date_times" => Entity::Date,
            _ => return Err(SchemaError::UnknownEntity(value.trim().to_string())),
        };
        Ok(entity)
    }
}
