use std::sync::Arc;

use quiz_core::model::{ProgressRecord, QuizRules};
use services::{AppServices, AppShell, AudioPlayer, ProgressService};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;

    /// Progress loaded before launch.
    fn initial_progress(&self) -> ProgressRecord;

    fn audio(&self) -> Arc<dyn AudioPlayer>;
    fn link_opener(&self) -> LinkOpenerRef;

    /// Fixed seed for question generation, if any.
    fn seed(&self) -> Option<u64> {
        None
    }
}

#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
    initial_progress: ProgressRecord,
    audio: Arc<dyn AudioPlayer>,
    link_opener: LinkOpenerRef,
    seed: Option<u64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            services: app.services(),
            initial_progress: app.initial_progress(),
            audio: app.audio(),
            link_opener: app.link_opener(),
            seed: app.seed(),
        }
    }

    /// Build the shell the UI drives, starting on the start screen.
    #[must_use]
    pub fn new_shell(&self) -> AppShell {
        self.services.build_shell(
            self.initial_progress.clone(),
            Arc::clone(&self.audio),
            self.seed,
        )
    }

    #[must_use]
    pub fn rules(&self) -> QuizRules {
        self.services.rules()
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
