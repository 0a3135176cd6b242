use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
    #[error("invalid UIL division: {0}")]
    InvalidDivision(String),
}
