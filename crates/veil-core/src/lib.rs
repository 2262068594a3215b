//! Core domain models for veil
//!
//! This crate contains:
//! - Blur levels and kernel sizing
//! - Redaction modes, applied strategies and fallback reasons
//! - Detection regions, OCR tokens and sensitive counts
//! - History records

pub mod blur;
pub mod error;
pub mod history;
pub mod mode;
pub mod region;

pub use blur::BlurLevel;
pub use error::{CoreError, Result};
pub use history::{HISTORY_LIMIT, HistoryRecord, NewHistoryRecord, format_timestamp};
pub use mode::{Fallback, RedactionMode, Strategy};
pub use region::{Region, SensitiveCounts, SensitiveKind, TextToken};
