use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
