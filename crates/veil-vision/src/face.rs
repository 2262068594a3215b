//! SeetaFace frontal face detection via `rustface`

use crate::{FaceDetector, Result, VisionError};
use image::GrayImage;
use rustface::ImageData;
use std::path::{Path, PathBuf};
use tracing::debug;
use veil_core::Region;

/// Face detector backed by a SeetaFace model file (`seeta_fd_frontal_v1.0.bin`)
///
/// The model is loaded per call, so a missing file only affects face-mode requests.
#[derive(Debug, Clone)]
pub struct SeetaFaceDetector {
    model_path: PathBuf,
    min_face_size: u32,
    score_threshold: f64,
}

impl SeetaFaceDetector {
    pub fn new(model_path: impl AsRef<Path>) -> Self {
        Self {
            model_path: model_path.as_ref().to_path_buf(),
            min_face_size: 20,
            score_threshold: 2.0,
        }
    }

    pub fn with_min_face_size(mut self, size: u32) -> Self {
        self.min_face_size = size;
        self
    }

    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl FaceDetector for SeetaFaceDetector {
    fn detect(&self, gray: &GrayImage) -> Result<Vec<Region>> {
        if !self.model_path.is_file() {
            return Err(VisionError::ModelUnavailable(format!(
                "{} does not exist",
                self.model_path.display()
            )));
        }

        let path = self.model_path.to_str().ok_or_else(|| {
            VisionError::ModelUnavailable(format!(
                "{} is not valid UTF-8",
                self.model_path.display()
            ))
        })?;

        let mut detector = rustface::create_detector(path)
            .map_err(|e| VisionError::ModelUnavailable(format!("{:?}", e)))?;
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(self.score_threshold);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let mut image = ImageData::new(gray.as_raw(), gray.width(), gray.height());
        let faces = detector.detect(&mut image);
        debug!("Detected {} face(s)", faces.len());

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Region::new(bbox.x() as i64, bbox.y() as i64, bbox.width(), bbox.height())
            })
            .collect())
    }
}
