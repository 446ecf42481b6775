use std::fmt;
use std::sync::Arc;

use rand::Rng;

use quiz_core::model::{Level, Question, QuizRules};

use super::progress::SessionProgress;
use super::timer::{SessionTimer, TimerTick};
use crate::audio::{self, AudioClip, AudioPlayer};
use crate::error::SessionError;
use crate::questions::QuestionGenerator;

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// How the current question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    TimedOut,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Questions not generated yet.
    Loading,
    /// Timer running, no selection made.
    AwaitingAnswer,
    /// Selection made or timer expired; timer stopped.
    Answered(AnswerOutcome),
    /// Every question consumed. Terminal.
    Complete,
}

/// Result of advancing past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Continue,
    Completed { score: u32 },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through of a level.
///
/// Questions are generated once by [`QuizSession::start`]. Each question is
/// resolved at most once, by [`QuizSession::select`] or by the timer running
/// out in [`QuizSession::tick`], whichever comes first; later requests for the
/// same question are no-ops. Success and failure cues go to the injected
/// [`AudioPlayer`].
pub struct QuizSession {
    level: Level,
    rules: QuizRules,
    audio: Arc<dyn AudioPlayer>,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    selected: Option<u32>,
    phase: SessionPhase,
    timer: SessionTimer,
}

impl QuizSession {
    /// Create a session in the `Loading` phase.
    #[must_use]
    pub fn new(level: Level, rules: QuizRules, audio: Arc<dyn AudioPlayer>) -> Self {
        Self {
            level,
            rules,
            audio,
            questions: Vec::new(),
            current: 0,
            score: 0,
            selected: None,
            phase: SessionPhase::Loading,
            timer: SessionTimer::new(rules.seconds_per_question()),
        }
    }

    /// Generate the question sequence and start the first countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` if called twice, or
    /// `SessionError::Generation` if the level cannot fill a session.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        if self.phase != SessionPhase::Loading {
            return Err(SessionError::AlreadyStarted);
        }
        self.questions = QuestionGenerator::new(self.rules).generate_for_level(&self.level, rng)?;
        self.timer.reset();
        self.phase = SessionPhase::AwaitingAnswer;
        tracing::debug!(
            level = %self.level.id(),
            questions = self.questions.len(),
            "session started"
        );
        Ok(())
    }

    /// Answer the current question with `option`.
    ///
    /// Returns the outcome, or `None` when nothing changed: the question is
    /// already resolved, the session is not awaiting an answer, or `option`
    /// is not one of the offered options.
    pub fn select(&mut self, option: u32) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::AwaitingAnswer {
            return None;
        }
        let question = self.questions.get(self.current)?;
        if !question.has_option(option) {
            tracing::debug!(option, "ignoring selection outside the offered options");
            return None;
        }

        let outcome = if question.is_correct(option) {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Wrong
        };
        self.timer.suspend();
        self.selected = Some(option);
        if outcome.is_correct() {
            self.score = self.score.saturating_add(self.rules.points_per_question());
            audio::play_cue(self.audio.as_ref(), AudioClip::Success);
        } else {
            audio::play_cue(self.audio.as_ref(), AudioClip::Failure);
        }
        self.phase = SessionPhase::Answered(outcome);
        Some(outcome)
    }

    /// Count down one second. Returns `Some(AnswerOutcome::TimedOut)` on the
    /// tick that resolves the question.
    pub fn tick(&mut self) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::AwaitingAnswer {
            return None;
        }
        match self.timer.tick() {
            TimerTick::Expired => {
                self.phase = SessionPhase::Answered(AnswerOutcome::TimedOut);
                audio::play_cue(self.audio.as_ref(), AudioClip::Failure);
                Some(AnswerOutcome::TimedOut)
            }
            TimerTick::Running { .. } | TimerTick::Idle => None,
        }
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted`, `SessionError::Unanswered`, or
    /// `SessionError::Completed` when called outside the `Answered` phase.
    pub fn advance(&mut self) -> Result<SessionStep, SessionError> {
        match self.phase {
            SessionPhase::Answered(_) => {}
            SessionPhase::Loading => return Err(SessionError::NotStarted),
            SessionPhase::AwaitingAnswer => return Err(SessionError::Unanswered),
            SessionPhase::Complete => return Err(SessionError::Completed),
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            self.timer.reset();
            self.phase = SessionPhase::AwaitingAnswer;
            return Ok(SessionStep::Continue);
        }

        self.phase = SessionPhase::Complete;
        self.timer.suspend();
        tracing::debug!(level = %self.level.id(), score = self.score, "session complete");
        Ok(SessionStep::Completed { score: self.score })
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[must_use]
    pub fn rules(&self) -> &QuizRules {
        &self.rules
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question on screen. `None` while loading or once complete.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            SessionPhase::Loading | SessionPhase::Complete => None,
            SessionPhase::AwaitingAnswer | SessionPhase::Answered(_) => {
                self.questions.get(self.current)
            }
        }
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.rules.questions_per_level()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current + 1 >= self.total_questions()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    #[must_use]
    pub fn outcome(&self) -> Option<AnswerOutcome> {
        match self.phase {
            SessionPhase::Answered(outcome) => Some(outcome),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self.phase, SessionPhase::Answered(_))
    }

    /// True once the current question was answered with a wrong option.
    #[must_use]
    pub fn is_wrong(&self) -> bool {
        self.phase == SessionPhase::Answered(AnswerOutcome::Wrong)
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    #[must_use]
    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.timer.remaining()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let answered = match self.phase {
            SessionPhase::Loading => 0,
            SessionPhase::AwaitingAnswer => self.current,
            SessionPhase::Answered(_) => self.current + 1,
            SessionPhase::Complete => self.questions.len(),
        };
        SessionProgress {
            total: self.total_questions(),
            position: self.current + 1,
            answered,
            score: self.score,
            max_score: self.rules.max_score(),
            is_complete: self.is_complete(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("level", &self.level.id())
            .field("phase", &self.phase)
            .field("current", &self.current)
            .field("score", &self.score)
            .field("selected", &self.selected)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}
