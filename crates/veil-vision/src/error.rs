use thiserror::Error;

pub type Result<T> = std::result::Result<T, VisionError>;

#[derive(Error, Debug)]
pub enum VisionError {
    #[error("OCR engine not found: {0}")]
    EngineNotFound(String),

    #[error("OCR engine failed: {0}")]
    EngineFailed(String),

    #[error("Face model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
