use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("`{0}` is not a valid value for sort")]
    InvalidSort(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[from] jiff::Error),
}
