use std::path::PathBuf;

use retail_model::{CleaningReport, Entity};

#[derive(Debug)]
pub struct RunResult {
    pub warehouse: PathBuf,
    pub dry_run: bool,
    pub entities: Vec<EntitySummary>,
    pub has_errors: bool,
}

/// Outcome of one entity across extract, clean and load.
#[derive(Debug)]
pub struct EntitySummary {
    pub entity: Entity,
    pub table: &'static str,
    pub report: Option<CleaningReport>,
    pub loaded: Option<usize>,
    pub error: Option<String>,
    /// The table was dropped as a side effect of reloading its dimensions.
    pub table_dropped: bool,
}

impl EntitySummary {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            table: retail_model::schema_for(entity).table_name,
            report: None,
            loaded: None,
            error: None,
            table_dropped: false,
        }
    }
}
