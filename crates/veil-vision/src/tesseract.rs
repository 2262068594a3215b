//! OCR through the `tesseract` command line tool (TSV output)

use crate::{Result, TextRecognizer, VisionError};
use image::{GrayImage, ImageFormat};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;
use veil_core::{Region, TextToken};

/// Runs `tesseract <image> stdout -l <lang> tsv` and parses word rows
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: String,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: "eng".to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Resolve the binary on PATH (or as a literal path)
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.command)
            .map_err(|e| VisionError::EngineNotFound(format!("{}: {}", self.command, e)))
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, gray: &GrayImage) -> Result<Vec<TextToken>> {
        let binary = self.locate()?;

        let input = tempfile::Builder::new()
            .prefix("veil-ocr-")
            .suffix(".png")
            .tempfile()?;
        gray.save_with_format(input.path(), ImageFormat::Png)?;

        let output = Command::new(&binary)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("tsv")
            .output()
            .map_err(|e| VisionError::EngineNotFound(format!("{}: {}", binary.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VisionError::EngineFailed(stderr.trim().to_string()));
        }

        let tokens = parse_tsv(&String::from_utf8_lossy(&output.stdout));
        debug!("OCR produced {} token(s)", tokens.len());
        Ok(tokens)
    }
}

/// Parse Tesseract TSV output.
///
/// Columns: level, page_num, block_num, par_num, line_num, word_num,
/// left, top, width, height, conf, text. Rows with an unparseable
/// confidence or geometry are skipped.
pub fn parse_tsv(tsv: &str) -> Vec<TextToken> {
    tsv.lines()
        .filter(|line| !line.starts_with("level"))
        .filter_map(parse_row)
        .collect()
}

fn parse_row(line: &str) -> Option<TextToken> {
    let cols: Vec<&str> = line.splitn(12, '\t').collect();
    if cols.len() < 11 {
        return None;
    }

    let left = cols[6].trim().parse::<i64>().ok()?;
    let top = cols[7].trim().parse::<i64>().ok()?;
    let width = cols[8].trim().parse::<u32>().ok()?;
    let height = cols[9].trim().parse::<u32>().ok()?;
    let confidence = cols[10].trim().parse::<f32>().ok()? as i32;
    let text = cols.get(11).copied().unwrap_or("");

    Some(TextToken::new(
        text,
        confidence,
        Region::new(left, top, width, height),
    ))
}
