//! Sensitive-text classification for OCR tokens

mod classifier;

pub use classifier::{SensitiveClassifier, classify};
