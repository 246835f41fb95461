use polars::prelude::DataFrame;

use retail_model::{CleaningReport, Entity, EntitySchema, schema_for};

/// A cleaned, canonically ordered frame for one entity.
#[derive(Debug, Clone)]
pub struct EntityFrame {
    pub entity: Entity,
    pub data: DataFrame,
}

impl EntityFrame {
    pub fn new(entity: Entity, data: DataFrame) -> Self {
        Self { entity, data }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        schema_for(self.entity)
    }

    pub fn table_name(&self) -> &'static str {
        self.schema().table_name
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}

/// Result of cleaning one entity: the valid rows plus what was dropped.
#[derive(Debug, Clone)]
pub struct CleanedFrame {
    pub frame: EntityFrame,
    pub report: CleaningReport,
}
