//! Upload pipeline: decode, redact, encode, store, record

use crate::codec;
use crate::{RedactionOutcome, Redactor, Result};
use std::sync::Arc;
use tracing::{info, warn};
use veil_core::{
    BlurLevel, Fallback, HistoryRecord, NewHistoryRecord, RedactionMode, SensitiveCounts, Strategy,
};
use veil_storage::{HistoryStore, UploadStore, sanitize_filename};

/// One image to process
#[derive(Debug, Clone)]
pub struct ProcessRequest {
    /// Client-supplied file name
    pub filename: String,
    pub bytes: Vec<u8>,
    /// Raw mode string; unknown values degrade to a full blur
    pub mode: String,
    pub blur_level: BlurLevel,
}

#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub record: HistoryRecord,
    /// Name under which the untouched upload was stored
    pub stored_original: String,
    pub applied: Strategy,
    pub counts: Option<SensitiveCounts>,
    pub fallback: Option<Fallback>,
}

/// Runs the full pipeline for uploads. Cheap to clone.
#[derive(Clone)]
pub struct Processor {
    redactor: Arc<Redactor>,
    uploads: UploadStore,
    history: HistoryStore,
}

impl Processor {
    pub fn new(redactor: Arc<Redactor>, uploads: UploadStore, history: HistoryStore) -> Self {
        Self {
            redactor,
            uploads,
            history,
        }
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Process one upload. Decode failures are returned before anything is written.
    pub async fn process(&self, request: ProcessRequest) -> Result<ProcessResult> {
        let ProcessRequest {
            filename,
            bytes,
            mode,
            blur_level,
        } = request;

        let (mode, mode_fallback) = RedactionMode::parse_lenient(&mode);
        let redactor = Arc::clone(&self.redactor);

        let rendered = tokio::task::spawn_blocking(move || -> Result<Rendered> {
            let decoded = codec::decode(&bytes)?;
            let outcome = redactor.redact(decoded.image, mode, blur_level);
            let format = codec::output_format(decoded.format);
            let encoded = codec::encode(&outcome.image, format)?;
            Ok(Rendered {
                original: bytes,
                encoded,
                format,
                outcome,
            })
        })
        .await??;

        let names = OutputNames::new(&filename, &rendered);

        self.uploads
            .store(&names.original, &rendered.original)
            .await?;
        self.uploads
            .store(&names.processed, &rendered.encoded)
            .await?;

        let outcome = rendered.outcome;
        let fallback = mode_fallback.or(outcome.fallback);
        if let Some(reason) = &fallback {
            warn!("{}: {}", filename, reason);
        }

        let inserted = self
            .history
            .record(NewHistoryRecord {
                original_filename: filename,
                processed_filename: names.processed.clone(),
                mode,
                blur_level,
                counts: outcome.counts,
            })
            .await;
        let record = match inserted {
            Ok(record) => record,
            Err(e) => {
                self.discard(&names).await;
                return Err(e.into());
            }
        };

        info!(
            "Processed {} -> {} (mode={}, blur={})",
            record.original_filename, record.processed_filename, record.mode, record.blur_level
        );

        Ok(ProcessResult {
            record,
            stored_original: names.original,
            applied: outcome.applied,
            counts: outcome.counts,
            fallback,
        })
    }

    /// Remove files written for an upload that never made it into history
    async fn discard(&self, names: &OutputNames) {
        for name in [&names.original, &names.processed] {
            if let Err(e) = self.uploads.remove(name).await {
                warn!("Failed to remove {}: {}", name, e);
            }
        }
    }
}

struct Rendered {
    original: Vec<u8>,
    encoded: Vec<u8>,
    format: image::ImageFormat,
    outcome: RedactionOutcome,
}

/// File names for one upload.
///
/// A short random token keeps two uploads with the same name from overwriting
/// each other: `scan.png` becomes `scan_1a2b3c4d.png` and
/// `scan_1a2b3c4d_textblur.png`.
struct OutputNames {
    original: String,
    processed: String,
}

impl OutputNames {
    fn new(client_name: &str, rendered: &Rendered) -> Self {
        let safe = sanitize_filename(client_name);
        let (stem, ext) = split_extension(&safe);
        let token = unique_token();

        let original = match ext {
            Some(ext) => format!("{}_{}.{}", stem, token, ext),
            None => format!("{}_{}", stem, token),
        };
        let processed = format!(
            "{}_{}{}.{}",
            stem,
            token,
            rendered.outcome.applied.suffix(),
            codec::extension_for(rendered.format, ext)
        );

        Self {
            original,
            processed,
        }
    }
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

fn unique_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
