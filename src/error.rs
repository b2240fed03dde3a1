use thiserror::Error;

use crate::validator::ValidationError;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("No expense with id {0}")]
    NotFound(u64),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid month (expected YYYY-MM): {0}")]
    InvalidMonth(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
