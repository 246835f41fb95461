//! Object locations: local paths, HTTP(S) URLs and public S3 objects.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::error::{IngestError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Local(PathBuf),
    Http(String),
}

impl Location {
    /// Classify a location string; `s3://bucket/key` maps to the bucket's HTTPS endpoint.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if let Some(rest) = trimmed.strip_prefix("s3://") {
            let (bucket, key) = rest
                .split_once('/')
                .filter(|(bucket, key)| !bucket.is_empty() && !key.is_empty())
                .ok_or_else(|| IngestError::UnsupportedLocation(trimmed.to_string()))?;
            return Ok(Location::Http(format!(
                "https://{bucket}.s3.amazonaws.com/{key}"
            )));
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(Location::Http(trimmed.to_string()));
        }
        if trimmed.is_empty() || trimmed.contains("://") {
            return Err(IngestError::UnsupportedLocation(trimmed.to_string()));
        }
        Ok(Location::Local(PathBuf::from(trimmed)))
    }

    /// Lowercased file extension of the object, if any.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Location::Local(path) => path.file_name()?.to_string_lossy().into_owned(),
            Location::Http(url) => url.rsplit('/').next()?.to_string(),
        };
        let name = name.split(['?', '#']).next().unwrap_or_default();
        let (_, ext) = name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }
}

/// Fetch the raw bytes behind a location.
pub fn fetch_object(location: &Location) -> Result<Vec<u8>> {
    match location {
        Location::Local(path) => fs::read(path).map_err(|source| IngestError::Io {
            path: path.clone(),
            source,
        }),
        Location::Http(url) => {
            let client = Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .map_err(|source| IngestError::Http {
                    url: url.clone(),
                    source,
                })?;
            let response = client.get(url).send().map_err(|source| IngestError::Http {
                url: url.clone(),
                source,
            })?;
            if !response.status().is_success() {
                return Err(IngestError::Status {
                    url: url.clone(),
                    status: response.status().as_u16(),
                });
            }
            let bytes = response.bytes().map_err(|source| IngestError::Http {
                url: url.clone(),
                source,
            })?;
            debug!(url = %url, bytes = bytes.len(), "fetched object");
            Ok(bytes.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_locations_map_to_https() {
        assert_eq!(
            Location::parse("s3://data-handling-public/products.csv").expect("s3"),
            Location::Http("https://data-handling-public.s3.amazonaws.com/products.csv".into())
        );
        assert!(Location::parse("s3://bucket-only").is_err());
    }

    #[test]
    fn extension_ignores_query_strings() {
        let location = Location::parse("https://example.test/date_details.JSON?v=1").expect("url");
        assert_eq!(location.extension().as_deref(), Some("json"));
        let location = Location::parse("data/cards.csv").expect("path");
        assert_eq!(location.extension().as_deref(), Some("csv"));
    }

    #[test]
    fn unknown_schemes_are_rejected() {
        assert!(matches!(
            Location::parse("ftp://example.test/file.csv"),
            Err(IngestError::UnsupportedLocation(_))
        ));
    }
}
