//! Primary-key sets of cleaned dimensions, used to filter orphan orders.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::AnyValue;

use retail_ingest::any_to_string_non_empty;
use retail_model::Entity;

use crate::frame::EntityFrame;

#[derive(Debug, Clone, Default)]
pub struct ReferenceKeys {
    keys: BTreeMap<Entity, BTreeSet<String>>,
}

impl ReferenceKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the primary-key values of a cleaned dimension frame.
    ///
    /// Frames without a primary key (orders) are ignored.
    pub fn insert_frame(&mut self, frame: &EntityFrame) {
        let Some(primary_key) = frame.schema().primary_key else {
            return;
        };
        let Ok(column) = frame.data.column(primary_key) else {
            return;
        };
        let values: BTreeSet<String> = (0..frame.data.height())
            .filter_map(|idx| any_to_string_non_empty(column.get(idx).unwrap_or(AnyValue::Null)))
            .map(|value| value.trim().to_string())
            .collect();
        self.keys.insert(frame.entity, values);
    }

    pub fn with_keys<I, S>(mut self, entity: Entity, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys
            .entry(entity)
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// `None` when no key set was supplied for `entity`.
    pub fn contains(&self, entity: Entity, value: &str) -> Option<bool> {
        self.keys.get(&entity).map(|set| set.contains(value))
    }
}
