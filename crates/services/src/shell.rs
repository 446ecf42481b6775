//! Top-level screen router.
//!
//! `AppShell` owns the screen state, the in-memory progress record and the
//! active quiz session. Presentation code sends [`ShellEvent`]s and renders
//! whatever [`AppShell::screen`] holds afterwards; it never decides
//! transitions itself. Persistence is returned as [`ProgressWrite`]s for the
//! caller to hand to `ProgressService`, so a failing store can never block or
//! undo a transition.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;

use quiz_core::model::{Level, LevelCatalog, LevelId, ProgressRecord, QuizRules};

use crate::audio::{self, AudioPlayer};
use crate::error::ShellError;
use crate::sessions::{AnswerOutcome, QuizSession, SessionStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Start,
    LevelSelect,
    Game,
    End,
}

/// Result shown after a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndSummary {
    pub level: Level,
    pub score: u32,
    pub max_score: u32,
    /// Best score for the level, including this session.
    pub high_score: u32,
    pub is_last_level: bool,
    pub next_level_unlocked: bool,
}

impl EndSummary {
    /// Whether the "next level" action is offered.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_last_level && self.next_level_unlocked
    }
}

#[derive(Debug, Default)]
pub enum Screen {
    #[default]
    Start,
    LevelSelect,
    Game(Box<QuizSession>),
    End(EndSummary),
}

impl Screen {
    #[must_use]
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Start => ScreenKind::Start,
            Screen::LevelSelect => ScreenKind::LevelSelect,
            Screen::Game(_) => ScreenKind::Game,
            Screen::End(_) => ScreenKind::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    Start,
    SelectLevel(LevelId),
    Answer(u32),
    /// One second of wall-clock time elapsed.
    Tick,
    Advance,
    PlayAgain,
    NextLevel,
    BackToLevels,
}

impl ShellEvent {
    fn name(self) -> &'static str {
        match self {
            ShellEvent::Start => "start",
            ShellEvent::SelectLevel(_) => "select level",
            ShellEvent::Answer(_) => "answer",
            ShellEvent::Tick => "tick",
            ShellEvent::Advance => "advance",
            ShellEvent::PlayAgain => "play again",
            ShellEvent::NextLevel => "next level",
            ShellEvent::BackToLevels => "back to levels",
        }
    }
}

/// Progress change to persist after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressWrite {
    RaiseWatermark(LevelId),
    RecordScore { level: LevelId, score: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellTransition {
    pub screen: ScreenKind,
    /// Set when the event resolved the current question.
    pub answer: Option<AnswerOutcome>,
    pub writes: Vec<ProgressWrite>,
}

pub struct AppShell {
    catalog: Arc<LevelCatalog>,
    rules: QuizRules,
    progress: ProgressRecord,
    audio: Arc<dyn AudioPlayer>,
    rng: StdRng,
    screen: Screen,
}

impl AppShell {
    #[must_use]
    pub fn new(
        catalog: Arc<LevelCatalog>,
        rules: QuizRules,
        progress: ProgressRecord,
        audio: Arc<dyn AudioPlayer>,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            rules,
            progress,
            audio,
            rng,
            screen: Screen::Start,
        }
    }

    /// Apply `event` to the current screen.
    ///
    /// # Errors
    ///
    /// Returns `ShellError` when the event is not valid for the current
    /// screen or targets a locked or unknown level. The shell is unchanged in
    /// that case.
    pub fn transition(&mut self, event: ShellEvent) -> Result<ShellTransition, ShellError> {
        let mut answer = None;
        let mut writes = Vec::new();

        match event {
            ShellEvent::Start => {
                self.expect_screen(ScreenKind::Start, event)?;
                audio::play_background(self.audio.as_ref());
                self.screen = Screen::LevelSelect;
            }
            ShellEvent::SelectLevel(id) => {
                self.expect_screen(ScreenKind::LevelSelect, event)?;
                self.enter_level(id)?;
            }
            ShellEvent::Answer(option) => {
                answer = self.session_mut(event)?.select(option);
            }
            ShellEvent::Tick => {
                // The countdown only exists on the game screen.
                if let Screen::Game(session) = &mut self.screen {
                    answer = session.tick();
                }
            }
            ShellEvent::Advance => {
                let step = self.session_mut(event)?.advance()?;
                if let SessionStep::Completed { score } = step {
                    writes = self.finish(score);
                }
            }
            ShellEvent::PlayAgain => {
                let level = self.ended_level(event)?;
                self.enter_level(level)?;
            }
            ShellEvent::NextLevel => {
                let level = self.ended_level(event)?;
                let next = self
                    .catalog
                    .next_after(level)
                    .map(Level::id)
                    .ok_or(ShellError::NextLevelUnavailable)?;
                if !self.progress.is_unlocked(next) {
                    return Err(ShellError::NextLevelUnavailable);
                }
                self.enter_level(next)?;
            }
            ShellEvent::BackToLevels => {
                self.expect_screen(ScreenKind::End, event)?;
                self.screen = Screen::LevelSelect;
            }
        }

        Ok(ShellTransition {
            screen: self.screen.kind(),
            answer,
            writes,
        })
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn rules(&self) -> &QuizRules {
        &self.rules
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    /// The active session, if the game screen is showing.
    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.screen {
            Screen::Game(session) => Some(session),
            _ => None,
        }
    }

    /// Whether a question countdown is currently running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.session()
            .is_some_and(|session| session.timer().is_running())
    }

    fn expect_screen(&self, kind: ScreenKind, event: ShellEvent) -> Result<(), ShellError> {
        if self.screen.kind() == kind {
            Ok(())
        } else {
            Err(self.not_available(event))
        }
    }

    fn not_available(&self, event: ShellEvent) -> ShellError {
        ShellError::NotAvailable {
            event: event.name(),
            screen: self.screen.kind(),
        }
    }

    fn session_mut(&mut self, event: ShellEvent) -> Result<&mut QuizSession, ShellError> {
        let error = self.not_available(event);
        match &mut self.screen {
            Screen::Game(session) => Ok(session),
            _ => Err(error),
        }
    }

    fn ended_level(&self, event: ShellEvent) -> Result<LevelId, ShellError> {
        match &self.screen {
            Screen::End(summary) => Ok(summary.level.id()),
            _ => Err(self.not_available(event)),
        }
    }

    fn enter_level(&mut self, id: LevelId) -> Result<(), ShellError> {
        let level = self
            .catalog
            .get(id)
            .ok_or(ShellError::UnknownLevel(id))?
            .clone();
        if !self.progress.is_unlocked(id) {
            return Err(ShellError::LevelLocked(id));
        }

        let mut session = QuizSession::new(level, self.rules, Arc::clone(&self.audio));
        session.start(&mut self.rng)?;
        tracing::info!(level = %id, "entering level");
        self.screen = Screen::Game(Box::new(session));
        Ok(())
    }

    fn finish(&mut self, score: u32) -> Vec<ProgressWrite> {
        let Screen::Game(session) = &self.screen else {
            return Vec::new();
        };
        let level = session.level().clone();
        let id = level.id();
        let is_last_level = self.catalog.is_last(id);
        let mut writes = Vec::new();

        if self.progress.record_score(id, score) {
            writes.push(ProgressWrite::RecordScore { level: id, score });
        }
        if self.rules.qualifies_for_unlock(score)
            && !is_last_level
            && self.progress.raise_watermark(id.next())
        {
            writes.push(ProgressWrite::RaiseWatermark(id.next()));
        }

        tracing::info!(
            level = %id,
            score,
            unlocked_through = %self.progress.unlocked_through(),
            "level complete"
        );
        self.screen = Screen::End(EndSummary {
            score,
            max_score: self.rules.max_score(),
            high_score: self.progress.high_score(id),
            is_last_level,
            next_level_unlocked: !is_last_level && self.progress.is_unlocked(id.next()),
            level,
        });
        writes
    }
}

impl fmt::Debug for AppShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppShell")
            .field("screen", &self.screen)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioClip, PlaybackMode, RecordingAudio};
    use crate::error::SessionError;
    use rand::SeedableRng;

    fn shell_with(progress: ProgressRecord, audio: &RecordingAudio) -> AppShell {
        let rules = QuizRules::default();
        let catalog = Arc::new(LevelCatalog::standard(&rules).unwrap());
        AppShell::new(
            catalog,
            rules,
            progress,
            Arc::new(audio.clone()),
            StdRng::seed_from_u64(11),
        )
    }

    fn current_answer(shell: &AppShell) -> u32 {
        shell.session().unwrap().current_question().unwrap().answer()
    }

    fn current_wrong(shell: &AppShell) -> u32 {
        let question = shell.session().unwrap().current_question().unwrap();
        *question
            .options()
            .iter()
            .find(|&&o| o != question.answer())
            .unwrap()
    }

    /// Play the level on screen, answering the first `correct` questions right.
    fn play(shell: &mut AppShell, correct: usize) -> ShellTransition {
        let total = shell.rules().questions_per_level();
        let mut last = None;
        for idx in 0..total {
            let option = if idx < correct {
                current_answer(shell)
            } else {
                current_wrong(shell)
            };
            shell.transition(ShellEvent::Answer(option)).unwrap();
            last = Some(shell.transition(ShellEvent::Advance).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn start_moves_to_level_select_and_plays_music() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        assert_eq!(shell.screen().kind(), ScreenKind::Start);

        let transition = shell.transition(ShellEvent::Start).unwrap();
        assert_eq!(transition.screen, ScreenKind::LevelSelect);
        assert_eq!(
            audio.played(),
            vec![(AudioClip::Background, PlaybackMode::Loop)]
        );
    }

    #[test]
    fn failing_music_does_not_block_start() {
        let audio = RecordingAudio::failing();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        let transition = shell.transition(ShellEvent::Start).unwrap();
        assert_eq!(transition.screen, ScreenKind::LevelSelect);
    }

    #[test]
    fn locked_level_is_rejected_without_state_change() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();

        let err = shell
            .transition(ShellEvent::SelectLevel(LevelId::new(2)))
            .unwrap_err();
        assert_eq!(err, ShellError::LevelLocked(LevelId::new(2)));
        assert_eq!(shell.screen().kind(), ScreenKind::LevelSelect);

        let err = shell
            .transition(ShellEvent::SelectLevel(LevelId::new(99)))
            .unwrap_err();
        assert_eq!(err, ShellError::UnknownLevel(LevelId::new(99)));
    }

    #[test]
    fn events_outside_their_screen_are_rejected() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        assert_eq!(
            shell.transition(ShellEvent::Answer(4)).unwrap_err(),
            ShellError::NotAvailable {
                event: "answer",
                screen: ScreenKind::Start
            }
        );
        assert_eq!(
            shell
                .transition(ShellEvent::SelectLevel(LevelId::FIRST))
                .unwrap_err(),
            ShellError::NotAvailable {
                event: "select level",
                screen: ScreenKind::Start
            }
        );
        // Ticks outside the game are silently ignored.
        let tick = shell.transition(ShellEvent::Tick).unwrap();
        assert_eq!(tick.screen, ScreenKind::Start);
        assert!(!shell.is_ticking());
    }

    #[test]
    fn advancing_an_unanswered_question_is_rejected() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();
        assert!(shell.is_ticking());
        assert_eq!(
            shell.transition(ShellEvent::Advance).unwrap_err(),
            ShellError::Session(SessionError::Unanswered)
        );
    }

    #[test]
    fn perfect_run_unlocks_next_level() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();

        let transition = play(&mut shell, 10);
        assert_eq!(transition.screen, ScreenKind::End);
        assert_eq!(
            transition.writes,
            vec![
                ProgressWrite::RecordScore {
                    level: LevelId::FIRST,
                    score: 100
                },
                ProgressWrite::RaiseWatermark(LevelId::new(2)),
            ]
        );
        assert_eq!(shell.progress().unlocked_through(), LevelId::new(2));

        let Screen::End(summary) = shell.screen() else {
            panic!("expected end screen");
        };
        assert_eq!(summary.score, 100);
        assert_eq!(summary.high_score, 100);
        assert!(summary.can_advance());
        assert_eq!(audio.count(AudioClip::Success), 10);
    }

    #[test]
    fn failing_run_keeps_watermark() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();

        let transition = play(&mut shell, 4);
        assert_eq!(
            transition.writes,
            vec![ProgressWrite::RecordScore {
                level: LevelId::FIRST,
                score: 40
            }]
        );
        assert_eq!(shell.progress().unlocked_through(), LevelId::FIRST);
        let Screen::End(summary) = shell.screen() else {
            panic!("expected end screen");
        };
        assert!(!summary.can_advance());
        assert_eq!(
            shell.transition(ShellEvent::NextLevel).unwrap_err(),
            ShellError::NextLevelUnavailable
        );
        assert_eq!(shell.screen().kind(), ScreenKind::End);
    }

    #[test]
    fn lower_score_does_not_rewrite_high_score() {
        let audio = RecordingAudio::new();
        let progress = ProgressRecord::from_persisted(LevelId::new(2), [(LevelId::FIRST, 90)]);
        let mut shell = shell_with(progress, &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();

        let transition = play(&mut shell, 6);
        assert!(transition.writes.is_empty());
        let Screen::End(summary) = shell.screen() else {
            panic!("expected end screen");
        };
        assert_eq!(summary.score, 60);
        assert_eq!(summary.high_score, 90);
        assert!(summary.can_advance());
    }

    #[test]
    fn last_level_never_raises_watermark() {
        let audio = RecordingAudio::new();
        let progress = ProgressRecord::from_persisted(LevelId::new(8), []);
        let mut shell = shell_with(progress, &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::new(8)))
            .unwrap();

        let transition = play(&mut shell, 10);
        assert!(
            !transition
                .writes
                .iter()
                .any(|w| matches!(w, ProgressWrite::RaiseWatermark(_)))
        );
        assert_eq!(shell.progress().unlocked_through(), LevelId::new(8));
        let Screen::End(summary) = shell.screen() else {
            panic!("expected end screen");
        };
        assert!(summary.is_last_level);
        assert!(!summary.can_advance());
        assert_eq!(
            shell.transition(ShellEvent::NextLevel).unwrap_err(),
            ShellError::NextLevelUnavailable
        );
    }

    #[test]
    fn end_screen_navigation() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();
        play(&mut shell, 10);

        let replay = shell.transition(ShellEvent::PlayAgain).unwrap();
        assert_eq!(replay.screen, ScreenKind::Game);
        assert_eq!(shell.session().unwrap().level().id(), LevelId::FIRST);
        assert_eq!(shell.session().unwrap().score(), 0);

        play(&mut shell, 10);
        let next = shell.transition(ShellEvent::NextLevel).unwrap();
        assert_eq!(next.screen, ScreenKind::Game);
        assert_eq!(shell.session().unwrap().level().id(), LevelId::new(2));

        play(&mut shell, 0);
        let back = shell.transition(ShellEvent::BackToLevels).unwrap();
        assert_eq!(back.screen, ScreenKind::LevelSelect);
        assert!(!shell.is_ticking());
    }

    #[test]
    fn timeout_through_ticks_reports_outcome() {
        let audio = RecordingAudio::new();
        let mut shell = shell_with(ProgressRecord::new(), &audio);
        shell.transition(ShellEvent::Start).unwrap();
        shell
            .transition(ShellEvent::SelectLevel(LevelId::FIRST))
            .unwrap();

        let mut outcomes = Vec::new();
        for _ in 0..35 {
            let transition = shell.transition(ShellEvent::Tick).unwrap();
            outcomes.extend(transition.answer);
        }
        assert_eq!(outcomes, vec![AnswerOutcome::TimedOut]);
        assert_eq!(audio.count(AudioClip::Failure), 1);
        assert!(!shell.is_ticking());
    }
}
