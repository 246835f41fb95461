//! Column access over a raw, all-text source frame.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, DataFrame};

use retail_ingest::any_to_string_non_empty;
use retail_model::Entity;

use crate::error::{CleaningError, Result};

/// A raw column an entity cleaner reads, with the header spellings it accepts.
#[derive(Debug, Clone, Copy)]
pub struct RawColumn {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl RawColumn {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            aliases: &[],
            required: false,
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

fn header_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Text cells of the raw columns a cleaner asked for, keyed by canonical name.
#[derive(Debug, Clone)]
pub struct RawTable {
    columns: BTreeMap<&'static str, Vec<Option<String>>>,
    height: usize,
}

impl RawTable {
    /// Extract the requested columns. Fails when any required column is absent.
    pub fn from_frame(entity: Entity, df: &DataFrame, wanted: &[RawColumn]) -> Result<Self> {
        let headers: BTreeMap<String, String> = df
            .get_column_names()
            .iter()
            .map(|name| (header_key(name), name.to_string()))
            .collect();
        let mut columns = BTreeMap::new();
        let mut missing = Vec::new();
        for column in wanted {
            let found = std::iter::once(column.name)
                .chain(column.aliases.iter().copied())
                .find_map(|candidate| headers.get(&header_key(candidate)));
            match found {
                Some(header) => {
                    let series = df
                        .column(header)
                        .map_err(|source| CleaningError::Frame { entity, source })?;
                    let values = (0..df.height())
                        .map(|idx| {
                            any_to_string_non_empty(series.get(idx).unwrap_or(AnyValue::Null))
                                .map(|value| value.trim().to_string())
                        })
                        .collect();
                    columns.insert(column.name, values);
                }
                None if column.required => missing.push(column.name.to_string()),
                None => {}
            }
        }
        if !missing.is_empty() {
            return Err(CleaningError::MissingColumns {
                entity,
                columns: missing,
            });
        }
        Ok(Self {
            columns,
            height: df.height(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Cell text, or `None` when empty or the column was not present.
    pub fn get(&self, name: &str, row: usize) -> Option<&str> {
        self.columns.get(name)?.get(row)?.as_deref()
    }
}
