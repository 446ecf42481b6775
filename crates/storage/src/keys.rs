//! Persisted key schema for player progress.
//!
//! Values are decimal integer strings. There is no versioning: unknown or
//! malformed values are read back as absent.

use quiz_core::model::LevelId;

/// Key holding the highest unlocked level id.
pub const UNLOCKED_LEVELS_KEY: &str = "unlockedLevels";

/// Prefix shared by every per-level best score key.
pub const HIGH_SCORE_PREFIX: &str = "highScore_level_";

/// Key holding the best score for `level`.
#[must_use]
pub fn high_score_key(level: LevelId) -> String {
    format!("{HIGH_SCORE_PREFIX}{level}")
}

/// Parse a stored decimal value. Returns `None` for anything malformed.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
