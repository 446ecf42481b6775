//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CatalogError, LevelId, QuestionError, RulesError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::shell::ScreenKind;

/// Errors emitted by `QuestionGenerator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("no fact tables to draw questions from")]
    NoTables,
    #[error("fact table must be > 0 and keep its products within u32")]
    InvalidTable,
    #[error("requested {requested} distinct questions but only {capacity} exist")]
    InsufficientFactSpace { requested: usize, capacity: usize },
    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has not generated its questions yet")]
    NotStarted,
    #[error("session already started")]
    AlreadyStarted,
    #[error("current question has not been answered")]
    Unanswered,
    #[error("session already completed")]
    Completed,
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Navigation rejected by `AppShell`. The shell state is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShellError {
    #[error("level {0} is locked")]
    LevelLocked(LevelId),
    #[error("level {0} does not exist")]
    UnknownLevel(LevelId),
    #[error("no unlocked level follows the current one")]
    NextLevelUnavailable,
    #[error("{event} is not available on the {screen:?} screen")]
    NotAvailable {
        event: &'static str,
        screen: ScreenKind,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors reported by an `AudioPlayer`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AudioError {
    #[error("audio playback failed: {0}")]
    Playback(String),
    #[error("audio output unavailable")]
    Unavailable,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
