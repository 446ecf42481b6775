mod progress;
mod service;
mod timer;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::SessionProgress;
pub use service::{AnswerOutcome, QuizSession, SessionPhase, SessionStep};
pub use timer::{SessionTimer, TimerTick};
