//! Redaction strategies: full, face and sensitive text

use crate::blur::{blur_image, blur_region};
use image::{RgbImage, imageops};
use std::sync::Arc;
use tracing::{debug, warn};
use veil_core::{BlurLevel, Fallback, RedactionMode, SensitiveCounts, Strategy, TextToken};
use veil_security::SensitiveClassifier;
use veil_vision::{FaceDetector, TextRecognizer};

/// Tokens at or below this OCR confidence are ignored
pub const DEFAULT_MIN_CONFIDENCE: i32 = 60;

/// Result of one redaction
#[derive(Debug, Clone)]
pub struct RedactionOutcome {
    pub image: RgbImage,
    pub applied: Strategy,
    /// Only set in text mode when at least one sensitive token was found
    pub counts: Option<SensitiveCounts>,
    /// Set when the outcome is not a clean run of the requested mode
    pub fallback: Option<Fallback>,
}

impl RedactionOutcome {
    fn full(image: &RgbImage, level: BlurLevel, fallback: Option<Fallback>) -> Self {
        Self {
            image: blur_image(image, level),
            applied: Strategy::FullBlur,
            counts: None,
            fallback,
        }
    }
}

/// Stateless redaction engine; detectors are shared collaborators
pub struct Redactor {
    faces: Arc<dyn FaceDetector>,
    ocr: Arc<dyn TextRecognizer>,
    classifier: SensitiveClassifier,
    min_confidence: i32,
}

impl Redactor {
    pub fn new(faces: Arc<dyn FaceDetector>, ocr: Arc<dyn TextRecognizer>) -> Self {
        Self {
            faces,
            ocr,
            classifier: SensitiveClassifier::new(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: i32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Redact according to `mode`. Never fails: collaborator errors degrade to a
    /// full blur and are reported through [`RedactionOutcome::fallback`].
    pub fn redact(&self, image: RgbImage, mode: RedactionMode, level: BlurLevel) -> RedactionOutcome {
        match mode {
            RedactionMode::Full => RedactionOutcome::full(&image, level, None),
            RedactionMode::Face => self.redact_faces(image, level),
            RedactionMode::Text => self.redact_text(image, level),
        }
    }

    fn redact_faces(&self, mut image: RgbImage, level: BlurLevel) -> RedactionOutcome {
        let gray = imageops::grayscale(&image);

        let faces = match self.faces.detect(&gray) {
            Ok(faces) => faces,
            Err(e) => {
                warn!("Face detection unavailable, blurring whole image: {}", e);
                return RedactionOutcome::full(
                    &image,
                    level,
                    Some(Fallback::FaceDetectorUnavailable(e.to_string())),
                );
            }
        };

        if faces.is_empty() {
            debug!("No faces found, blurring whole image");
            return RedactionOutcome::full(&image, level, Some(Fallback::NoFacesFound));
        }

        for face in &faces {
            blur_region(&mut image, *face, level);
        }
        debug!("Blurred {} face region(s)", faces.len());

        RedactionOutcome {
            image,
            applied: Strategy::FaceBlur,
            counts: None,
            fallback: None,
        }
    }

    fn redact_text(&self, mut image: RgbImage, level: BlurLevel) -> RedactionOutcome {
        let gray = imageops::grayscale(&image);

        let tokens = match self.ocr.recognize(&gray) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("OCR unavailable, blurring whole image: {}", e);
                return RedactionOutcome::full(
                    &image,
                    level,
                    Some(Fallback::OcrUnavailable(e.to_string())),
                );
            }
        };

        let confident: Vec<&TextToken> = tokens
            .iter()
            .filter(|t| t.confidence > self.min_confidence)
            .collect();

        // Pass 1: sensitive tokens only
        let mut counts = SensitiveCounts::default();
        for token in &confident {
            if let Some(kind) = self.classifier.classify(&token.text) {
                blur_region(&mut image, token.bbox, level);
                counts.increment(kind);
            }
        }

        if counts.total() > 0 {
            debug!(
                "Blurred sensitive text: {} email, {} phone, {} card",
                counts.email, counts.phone, counts.card
            );
            return RedactionOutcome {
                image,
                applied: Strategy::TextBlur,
                counts: Some(counts),
                fallback: None,
            };
        }

        // Pass 2: nothing sensitive, blur all confident text
        for token in &confident {
            blur_region(&mut image, token.bbox, level);
        }
        debug!("No sensitive text, blurred {} text region(s)", confident.len());

        RedactionOutcome {
            image,
            applied: Strategy::TextBlur,
            counts: None,
            fallback: None,
        }
    }
}
