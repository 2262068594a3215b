pub mod history;
pub mod redact;
pub mod serve;

use anyhow::Result;
use std::sync::Arc;
use veil_config::Config;
use veil_engine::{Processor, Redactor};
use veil_storage::{HistoryStore, UploadStore};
use veil_vision::{SeetaFaceDetector, TesseractRecognizer};

/// Wire detectors, OCR and storage together from config
pub async fn build_processor(config: &Config) -> Result<Processor> {
    let faces = SeetaFaceDetector::new(&config.face.model_path)
        .with_min_face_size(config.face.min_face_size)
        .with_score_threshold(config.face.score_threshold);
    let ocr = TesseractRecognizer::new(config.ocr.tesseract_cmd.clone())
        .with_language(config.ocr.language.clone());

    if !faces.model_path().exists() {
        tracing::warn!(
            "Face model not found at {}; face mode will blur whole images",
            faces.model_path().display()
        );
    }
    if let Err(e) = ocr.locate() {
        tracing::warn!("{}; text mode will blur whole images", e);
    }

    let redactor = Redactor::new(Arc::new(faces), Arc::new(ocr))
        .with_min_confidence(config.ocr.min_confidence);
    let uploads = UploadStore::new(config.storage.upload_dir())?;
    let history = HistoryStore::new(&config.storage.db_path()).await?;

    Ok(Processor::new(Arc::new(redactor), uploads, history))
}
