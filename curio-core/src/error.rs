use curio_model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectionError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("data service used before initialize()")]
    Uninitialized,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, CollectionError>;
