use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown redaction mode: {0}")]
    UnknownMode(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

pub type Result<T> = std::result::Result<T, CoreError>;
