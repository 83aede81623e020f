use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid duration token: {0:?}")]
    InvalidDuration(String),
    #[error("invalid rating: {0:?}")]
    InvalidRating(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("internal error: {0}")]
    Internal(String),
}
