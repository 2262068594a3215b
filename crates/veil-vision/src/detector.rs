//! Detector traits

use crate::Result;
use image::GrayImage;
use veil_core::{Region, TextToken};

/// Finds face rectangles in a grayscale image
///
/// Implementations are blocking; callers run them off the async runtime.
pub trait FaceDetector: Send + Sync {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Region>>;
}

/// Extracts text tokens with confidence and bounding boxes from a grayscale image
pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, gray: &GrayImage) -> Result<Vec<TextToken>>;
}
