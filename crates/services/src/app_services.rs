use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{LevelCatalog, ProgressRecord, QuizRules};
use storage::repository::Storage;

use crate::audio::AudioPlayer;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::shell::AppShell;

/// Assembles app-facing services around a single level catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<LevelCatalog>,
    rules: QuizRules,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// standard catalog does not fit `rules`.
    pub async fn new_sqlite(db_url: &str, rules: QuizRules) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, rules)
    }

    /// Build services on top of already-initialized storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if `rules` are invalid or the standard
    /// catalog does not fit them.
    pub fn from_storage(storage: &Storage, rules: QuizRules) -> Result<Self, AppServicesError> {
        let rules = rules.validate()?;
        let catalog = Arc::new(LevelCatalog::standard(&rules)?);
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&storage.progress),
            Arc::clone(&catalog),
        ));
        Ok(Self {
            catalog,
            rules,
            progress,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LevelCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.rules
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Create a fresh shell on the start screen.
    ///
    /// A fixed `seed` makes question generation reproducible.
    #[must_use]
    pub fn build_shell(
        &self,
        progress: ProgressRecord,
        audio: Arc<dyn AudioPlayer>,
        seed: Option<u64>,
    ) -> AppShell {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        AppShell::new(self.catalog(), self.rules, progress, audio, rng)
    }
}
