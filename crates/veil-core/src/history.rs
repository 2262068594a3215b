//! History records - one per processed upload

use crate::{BlurLevel, RedactionMode, Result, SensitiveCounts};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

/// Maximum number of records served by a history listing
pub const HISTORY_LIMIT: u32 = 50;

/// A persisted processing record. Never mutated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: i64,
    pub original_filename: String,
    pub processed_filename: String,
    pub mode: RedactionMode,
    pub blur_level: BlurLevel,
    pub emails: Option<u32>,
    pub phones: Option<u32>,
    pub cards: Option<u32>,
    pub created_at: String,
}

impl HistoryRecord {
    /// Counts are either all present or all absent
    pub fn counts(&self) -> Option<SensitiveCounts> {
        match (self.emails, self.phones, self.cards) {
            (Some(email), Some(phone), Some(card)) => Some(SensitiveCounts { email, phone, card }),
            _ => None,
        }
    }
}

/// Input for appending a record; id and timestamp are assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryRecord {
    pub original_filename: String,
    pub processed_filename: String,
    pub mode: RedactionMode,
    pub blur_level: BlurLevel,
    pub counts: Option<SensitiveCounts>,
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    Ok(at.format(&format)?)
}
