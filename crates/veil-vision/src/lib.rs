//! Detection collaborators for veil
//!
//! Face detection and OCR are external engines. This crate wraps them behind
//! the [`FaceDetector`] and [`TextRecognizer`] traits so the redaction engine
//! never depends on a concrete backend.

pub mod detector;
pub mod error;
pub mod face;
pub mod tesseract;

pub use detector::{FaceDetector, TextRecognizer};
pub use error::{Result, VisionError};
pub use face::SeetaFaceDetector;
pub use tesseract::TesseractRecognizer;
