//! Client for the paginated store-details API.
//!
//! The API key is part of [`ApiConfig`] and sent with every request; the
//! client keeps no other state.

use std::fmt;
use std::time::Duration;

use polars::prelude::DataFrame;
use reqwest::blocking::Client;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::json_table::records_to_frame;

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Placeholder substituted with the store index.
pub const STORE_NUMBER_PLACEHOLDER: &str = "{store_number}";

#[derive(Clone)]
pub struct ApiConfig {
    pub number_stores_endpoint: String,
    /// URL containing `{store_number}`.
    pub store_endpoint_template: String,
    pub api_key: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("number_stores_endpoint", &self.number_stores_endpoint)
            .field("store_endpoint_template", &self.store_endpoint_template)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiConfig {
    pub fn store_url(&self, store_number: u64) -> Result<String> {
        if !self
            .store_endpoint_template
            .contains(STORE_NUMBER_PLACEHOLDER)
        {
            return Err(IngestError::Template(
                self.store_endpoint_template.clone(),
            ));
        }
        Ok(self
            .store_endpoint_template
            .replace(STORE_NUMBER_PLACEHOLDER, &store_number.to_string()))
    }
}

pub struct StoreApiClient {
    client: Client,
    config: ApiConfig,
}

impl StoreApiClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| IngestError::Http {
                url: config.number_stores_endpoint.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .map_err(|source| IngestError::Http {
                url: url.to_string(),
                source,
            })?;
        if !response.status().is_success() {
            return Err(IngestError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        response.json().map_err(|source| IngestError::Http {
            url: url.to_string(),
            source,
        })
    }

    /// Number of stores advertised by the API.
    pub fn number_of_stores(&self) -> Result<u64> {
        let url = &self.config.number_stores_endpoint;
        let body = self.get_json(url)?;
        let count = parse_number_stores(&body).ok_or_else(|| IngestError::MissingField {
            url: url.clone(),
            field: "number_stores",
        })?;
        info!(count, "store count retrieved");
        Ok(count)
    }

    /// Fetch stores `0..count` as one raw frame.
    pub fn retrieve_stores(&self, count: u64) -> Result<DataFrame> {
        let mut records: Vec<Map<String, Value>> = Vec::new();
        for store_number in 0..count {
            let url = self.config.store_url(store_number)?;
            match self.get_json(&url)? {
                Value::Object(record) => records.push(record),
                _ => return Err(IngestError::JsonLayout(url)),
            }
            debug!(store_number, "store retrieved");
        }
        records_to_frame(&records)
    }

    pub fn retrieve_all_stores(&self) -> Result<DataFrame> {
        let count = self.number_of_stores()?;
        self.retrieve_stores(count)
    }
}

/// Read `number_stores` as an integer, accepting numeric strings.
pub fn parse_number_stores(body: &Value) -> Option<u64> {
    match body.get("number_stores")? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
