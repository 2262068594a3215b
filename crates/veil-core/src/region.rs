use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel rectangle produced by a detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersect with an image of the given size. Returns `None` when nothing is left.
    pub fn clip(&self, image_width: u32, image_height: u32) -> Option<Region> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = (self.x + self.width as i64).min(image_width as i64);
        let bottom = (self.y + self.height as i64).min(image_height as i64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(Region {
            x: left,
            y: top,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }
}

/// One OCR-recognized fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextToken {
    pub text: String,
    /// 0-100, or -1 for layout rows that carry no text
    pub confidence: i32,
    pub bbox: Region,
}

impl TextToken {
    pub fn new(text: impl Into<String>, confidence: i32, bbox: Region) -> Self {
        Self {
            text: text.into(),
            confidence,
            bbox,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitiveKind {
    Email,
    Phone,
    Card,
}

impl SensitiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SensitiveKind::Email => "email",
            SensitiveKind::Phone => "phone",
            SensitiveKind::Card => "card",
        }
    }
}

impl fmt::Display for SensitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category redaction counts for one text-mode request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveCounts {
    pub email: u32,
    pub phone: u32,
    pub card: u32,
}

impl SensitiveCounts {
    pub fn increment(&mut self, kind: SensitiveKind) {
        match kind {
            SensitiveKind::Email => self.email += 1,
            SensitiveKind::Phone => self.phone += 1,
            SensitiveKind::Card => self.card += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.email + self.phone + self.card
    }
}
