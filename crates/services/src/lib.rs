#![forbid(unsafe_code)]

pub mod app_services;
pub mod audio;
pub mod error;
pub mod progress_service;
pub mod questions;
pub mod sessions;
pub mod shell;

pub use app_services::AppServices;
pub use audio::{AudioClip, AudioPlayer, PlaybackMode, RecordingAudio, SilentAudio};
pub use error::{
    AppServicesError, AudioError, GenerationError, ProgressServiceError, SessionError, ShellError,
};
pub use progress_service::ProgressService;
pub use questions::QuestionGenerator;
pub use sessions::{
    AnswerOutcome, QuizSession, SessionPhase, SessionProgress, SessionStep, SessionTimer,
    TimerTick,
};
pub use shell::{AppShell, EndSummary, ProgressWrite, Screen, ScreenKind, ShellEvent, ShellTransition};
