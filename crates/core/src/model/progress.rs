use std::collections::BTreeMap;

use crate::model::ids::LevelId;

/// Player progress: the unlock watermark and best score per level.
///
/// Both values only move upward. The `raise_*`/`record_*` methods return
/// whether anything changed, so callers know when a write is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    unlocked_through: LevelId,
    high_scores: BTreeMap<LevelId, u32>,
}

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate progress from persisted values.
    ///
    /// A watermark below 1 is treated as 1.
    #[must_use]
    pub fn from_persisted(
        unlocked_through: LevelId,
        high_scores: impl IntoIterator<Item = (LevelId, u32)>,
    ) -> Self {
        let mut record = Self {
            unlocked_through: unlocked_through.max(LevelId::FIRST),
            high_scores: BTreeMap::new(),
        };
        for (level, score) in high_scores {
            record.record_score(level, score);
        }
        record
    }

    /// Highest unlocked level id.
    #[must_use]
    pub fn unlocked_through(&self) -> LevelId {
        self.unlocked_through
    }

    #[must_use]
    pub fn is_unlocked(&self, level: LevelId) -> bool {
        level >= LevelId::FIRST && level <= self.unlocked_through
    }

    /// Best score for a level, 0 if never played.
    #[must_use]
    pub fn high_score(&self, level: LevelId) -> u32 {
        self.high_scores.get(&level).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn high_scores(&self) -> &BTreeMap<LevelId, u32> {
        &self.high_scores
    }

    /// Raise the watermark to `level` if that is higher than the current one.
    pub fn raise_watermark(&mut self, level: LevelId) -> bool {
        if level > self.unlocked_through {
            self.unlocked_through = level;
            true
        } else {
            false
        }
    }

    /// Keep `score` as the level's best if it beats the stored one.
    pub fn record_score(&mut self, level: LevelId, score: u32) -> bool {
        if score > self.high_score(level) {
            self.high_scores.insert(level, score);
            true
        } else {
            false
        }
    }
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            unlocked_through: LevelId::FIRST,
            high_scores: BTreeMap::new(),
        }
    }
}
