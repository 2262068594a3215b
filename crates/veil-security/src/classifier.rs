use lazy_static::lazy_static;
use regex::Regex;
use std::ops::RangeInclusive;
use veil_core::SensitiveKind;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex");
    // Unicode decimal digits, not just ASCII
    static ref DIGIT: Regex = Regex::new(r"\d").expect("valid digit regex");
}

/// Classifies OCR tokens as email, phone or card numbers
///
/// Digit ranges overlap at 12-13 digits; the card range is checked first and wins.
#[derive(Debug, Clone)]
pub struct SensitiveClassifier {
    card_digits: RangeInclusive<usize>,
    phone_digits: RangeInclusive<usize>,
}

impl SensitiveClassifier {
    pub fn new() -> Self {
        Self {
            card_digits: 12..=19,
            phone_digits: 7..=13,
        }
    }

    pub fn classify(&self, text: &str) -> Option<SensitiveKind> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if EMAIL.is_match(text) {
            return Some(SensitiveKind::Email);
        }

        let digits = DIGIT.find_iter(text).count();
        if digits == 0 {
            return None;
        }

        if self.card_digits.contains(&digits) {
            Some(SensitiveKind::Card)
        } else if self.phone_digits.contains(&digits) {
            Some(SensitiveKind::Phone)
        } else {
            None
        }
    }
}

impl Default for SensitiveClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify with the default digit ranges
pub fn classify(text: &str) -> Option<SensitiveKind> {
    SensitiveClassifier::new().classify(text)
}
