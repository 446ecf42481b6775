use std::sync::Arc;

use quiz_core::model::{LevelCatalog, LevelId, ProgressRecord};
use storage::keys::{HIGH_SCORE_PREFIX, UNLOCKED_LEVELS_KEY, high_score_key, parse_count};
use storage::repository::KeyValueRepository;

use crate::error::ProgressServiceError;
use crate::shell::ProgressWrite;

/// Reads and writes player progress through a key-value store.
///
/// The `try_*` methods surface storage failures. The plain methods are what
/// the game uses: they log failures and carry on with defaults, so a broken
/// store never interrupts play.
#[derive(Clone)]
pub struct ProgressService {
    repo: Arc<dyn KeyValueRepository>,
    catalog: Arc<LevelCatalog>,
}

impl ProgressService {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>, catalog: Arc<LevelCatalog>) -> Self {
        Self { repo, catalog }
    }

    /// Load the persisted progress record.
    ///
    /// Missing or malformed values read as defaults. The watermark is kept
    /// within `1..=catalog.last_id()` and scores for unknown levels are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read.
    pub async fn try_load(&self) -> Result<ProgressRecord, ProgressServiceError> {
        let unlocked = self.stored_watermark().await?.unwrap_or(LevelId::FIRST);

        let scores = self
            .repo
            .list_prefix(HIGH_SCORE_PREFIX)
            .await?
            .into_iter()
            .filter_map(|(key, value)| {
                let level = key.strip_prefix(HIGH_SCORE_PREFIX)?.parse::<LevelId>().ok()?;
                let score = parse_count(&value)?;
                self.catalog.get(level).map(|_| (level, score))
            });

        Ok(ProgressRecord::from_persisted(
            unlocked.min(self.catalog.last_id()),
            scores,
        ))
    }

    /// Load progress, falling back to a fresh record if the store fails.
    pub async fn load(&self) -> ProgressRecord {
        match self.try_load().await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load progress, starting fresh");
                ProgressRecord::new()
            }
        }
    }

    /// Persist `level` as the unlock watermark if it exceeds the stored one.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read or written.
    pub async fn try_raise_watermark(&self, level: LevelId) -> Result<bool, ProgressServiceError> {
        let level = level.min(self.catalog.last_id());
        let current = self.stored_watermark().await?.unwrap_or(LevelId::FIRST);
        if level <= current {
            return Ok(false);
        }
        self.repo
            .put_value(UNLOCKED_LEVELS_KEY, &level.value().to_string())
            .await?;
        tracing::debug!(%level, "unlock watermark persisted");
        Ok(true)
    }

    pub async fn raise_watermark(&self, level: LevelId) {
        if let Err(err) = self.try_raise_watermark(level).await {
            tracing::warn!(%level, error = %err, "failed to persist unlock watermark");
        }
    }

    /// Persist `score` for `level` if it beats the stored best.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read or written.
    pub async fn try_record_score(
        &self,
        level: LevelId,
        score: u32,
    ) -> Result<bool, ProgressServiceError> {
        let key = high_score_key(level);
        let current = self
            .repo
            .get_value(&key)
            .await?
            .as_deref()
            .and_then(parse_count)
            .unwrap_or(0);
        if score <= current {
            return Ok(false);
        }
        self.repo.put_value(&key, &score.to_string()).await?;
        tracing::debug!(%level, score, "high score persisted");
        Ok(true)
    }

    pub async fn record_score(&self, level: LevelId, score: u32) {
        if let Err(err) = self.try_record_score(level, score).await {
            tracing::warn!(%level, score, error = %err, "failed to persist high score");
        }
    }

    /// Apply the writes produced by a shell transition, in order.
    pub async fn commit(&self, writes: &[ProgressWrite]) {
        for write in writes {
            match *write {
                ProgressWrite::RaiseWatermark(level) => self.raise_watermark(level).await,
                ProgressWrite::RecordScore { level, score } => {
                    self.record_score(level, score).await;
                }
            }
        }
    }

    async fn stored_watermark(&self) -> Result<Option<LevelId>, ProgressServiceError> {
        let raw = self.repo.get_value(UNLOCKED_LEVELS_KEY).await?;
        Ok(raw
            .as_deref()
            .and_then(parse_count)
            .map(|value| LevelId::new(value).max(LevelId::FIRST)))
    }
}
