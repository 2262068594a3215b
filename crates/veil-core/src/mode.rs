//! Redaction modes and the strategies actually applied

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mode requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RedactionMode {
    Full,
    #[default]
    Face,
    Text,
}

impl RedactionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RedactionMode::Full => "full",
            RedactionMode::Face => "face",
            RedactionMode::Text => "text",
        }
    }

    /// Parse user input. Unknown modes degrade to a full blur and report why.
    pub fn parse_lenient(raw: &str) -> (Self, Option<Fallback>) {
        match raw.parse() {
            Ok(mode) => (mode, None),
            Err(_) => (
                RedactionMode::Full,
                Some(Fallback::UnknownMode(raw.to_string())),
            ),
        }
    }
}

impl FromStr for RedactionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full" => Ok(RedactionMode::Full),
            "face" => Ok(RedactionMode::Face),
            "text" => Ok(RedactionMode::Text),
            other => Err(CoreError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RedactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy that produced the output image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    FullBlur,
    FaceBlur,
    TextBlur,
}

impl Strategy {
    /// Suffix appended to the output file stem
    pub fn suffix(self) -> &'static str {
        match self {
            Strategy::FullBlur => "_fullblur",
            Strategy::FaceBlur => "_faceblur",
            Strategy::TextBlur => "_textblur",
        }
    }
}

/// Why the outcome differs from a clean run of the requested mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum Fallback {
    /// Mode string was not one of full, face or text
    UnknownMode(String),
    /// Face detector ran and found nothing
    NoFacesFound,
    /// Face detector could not run
    FaceDetectorUnavailable(String),
    /// OCR engine could not run
    OcrUnavailable(String),
}

impl Fallback {
    /// True when a collaborator failed, as opposed to a policy fallback
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Fallback::FaceDetectorUnavailable(_) | Fallback::OcrUnavailable(_)
        )
    }
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::UnknownMode(mode) => write!(f, "unknown mode '{}', used full blur", mode),
            Fallback::NoFacesFound => f.write_str("no faces found, used full blur"),
            Fallback::FaceDetectorUnavailable(reason) => {
                write!(f, "face detector unavailable ({}), used full blur", reason)
            }
            Fallback::OcrUnavailable(reason) => {
                write!(f, "OCR unavailable ({}), used full blur", reason)
            }
        }
    }
}
