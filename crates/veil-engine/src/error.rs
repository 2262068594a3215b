use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The upload was empty or not an image; the caller's fault
    #[error("Could not read image file: {0}")]
    Decode(String),

    #[error("Could not encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Storage error: {0}")]
    Storage(#[from] veil_storage::StorageError),

    #[error("Redaction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EngineError {
    /// Client input errors map to 400; everything else is a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Decode(_))
    }
}
