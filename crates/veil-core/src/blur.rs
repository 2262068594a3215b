//! Blur intensity levels and Gaussian kernel sizing

use serde::{Deserialize, Serialize};
use std::fmt;

/// User-selected blur intensity, always within 1..=3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct BlurLevel(u8);

impl BlurLevel {
    pub const LIGHT: BlurLevel = BlurLevel(1);
    pub const NORMAL: BlurLevel = BlurLevel(2);
    pub const STRONG: BlurLevel = BlurLevel(3);

    /// Clamp any integer into the valid range
    pub fn from_level(level: i64) -> Self {
        Self(level.clamp(1, 3) as u8)
    }

    /// Parse a form field. Anything that is not an integer falls back to level 2.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .map(Self::from_level)
            .unwrap_or(Self::NORMAL)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Square kernel dimensions, always odd
    pub fn kernel(self) -> (u32, u32) {
        let size = match self.0 {
            0 | 1 => 21,
            2 => 45,
            _ => 75,
        };
        (size, size)
    }

    /// Gaussian sigma for the kernel, using the usual rule for a size-only kernel:
    /// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`
    pub fn sigma(self) -> f32 {
        let (size, _) = self.kernel();
        0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }
}

impl Default for BlurLevel {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<i64> for BlurLevel {
    fn from(level: i64) -> Self {
        Self::from_level(level)
    }
}

impl From<BlurLevel> for i64 {
    fn from(level: BlurLevel) -> Self {
        level.0 as i64
    }
}

impl fmt::Display for BlurLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sizes() {
        for level in [-5, 0, 1] {
            assert_eq!(BlurLevel::from_level(level).kernel(), (21, 21));
        }
        assert_eq!(BlurLevel::from_level(2).kernel(), (45, 45));
        for level in [3, 4, 100] {
            assert_eq!(BlurLevel::from_level(level).kernel(), (75, 75));
        }
    }

    #[test]
    fn test_level_is_clamped() {
        assert_eq!(BlurLevel::from_level(0).level(), 1);
        assert_eq!(BlurLevel::from_level(7).level(), 3);
    }

    #[test]
    fn test_non_numeric_defaults_to_normal() {
        assert_eq!(BlurLevel::parse("abc"), BlurLevel::NORMAL);
        assert_eq!(BlurLevel::parse(""), BlurLevel::NORMAL);
        assert_eq!(BlurLevel::parse("2.5"), BlurLevel::NORMAL);
        assert_eq!(BlurLevel::parse(" 3 ").kernel(), (75, 75));
    }

    #[test]
    fn test_sigma_grows_with_level() {
        assert!((BlurLevel::LIGHT.sigma() - 3.5).abs() < 1e-4);
        assert!(BlurLevel::NORMAL.sigma() > BlurLevel::LIGHT.sigma());
        assert!(BlurLevel::STRONG.sigma() > BlurLevel::NORMAL.sigma());
    }

    #[test]
    fn test_serde_clamps() {
        let level: BlurLevel = serde_json::from_str("9").unwrap();
        assert_eq!(level, BlurLevel::STRONG);
        assert_eq!(serde_json::to_string(&BlurLevel::LIGHT).unwrap(), "1");
    }
}
