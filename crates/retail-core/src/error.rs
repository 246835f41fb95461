use polars::prelude::PolarsError;
use thiserror::Error;

use retail_model::Entity;

#[derive(Debug, Error)]
pub enum CleaningError {
    #[error("{entity}: missing required columns: {}", .columns.join(", "))]
    MissingColumns { entity: Entity, columns: Vec<String> },
    #[error("{entity}: failed to build frame")]
    Frame {
        entity: Entity,
        #[source]
        source: PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, CleaningError>;
