use services::{AnswerOutcome, QuizSession};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Seconds at or below which the countdown is styled as urgent.
pub const TIMER_WARNING_SECS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// Question still open.
    Open,
    /// The right answer, revealed after answering.
    Correct,
    /// Picked, but wrong.
    Mistaken,
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            OptionState::Open => "option open",
            OptionState::Correct => "option correct",
            OptionState::Mistaken => "option mistaken",
            OptionState::Dimmed => "option dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: char,
    pub value: u32,
    pub state: OptionState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub text: &'static str,
    pub positive: bool,
}

impl From<AnswerOutcome> for FeedbackVm {
    fn from(outcome: AnswerOutcome) -> Self {
        match outcome {
            AnswerOutcome::Correct => Self {
                text: "Correct!",
                positive: true,
            },
            AnswerOutcome::Wrong => Self {
                text: "Try again!",
                positive: false,
            },
            AnswerOutcome::TimedOut => Self {
                text: "Time's up!",
                positive: false,
            },
        }
    }
}

/// Snapshot of the game screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    pub level_name: String,
    pub question_label: String,
    pub score: u32,
    pub progress_percent: u32,
    pub seconds_left: u32,
    pub timer_percent: u32,
    pub timer_warning: bool,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub answered: bool,
    pub feedback: Option<FeedbackVm>,
    pub next_label: &'static str,
}

/// Map the running session. Returns `None` while questions are loading.
#[must_use]
pub fn map_game(session: &QuizSession) -> Option<GameVm> {
    let question = session.current_question()?;
    let progress = session.progress();
    let answered = session.is_answered();
    let selected = session.selected();

    let options = question
        .options()
        .iter()
        .zip(OPTION_LABELS)
        .map(|(&value, label)| {
            let state = if !answered {
                OptionState::Open
            } else if value == question.answer() {
                OptionState::Correct
            } else if selected == Some(value) {
                OptionState::Mistaken
            } else {
                OptionState::Dimmed
            };
            OptionVm {
                label,
                value,
                state,
            }
        })
        .collect();

    let timer = session.timer();
    Some(GameVm {
        level_name: session.level().name().to_owned(),
        question_label: format!("Question {}/{}", progress.position, progress.total),
        score: progress.score,
        progress_percent: progress.percent(),
        seconds_left: timer.remaining(),
        timer_percent: timer.percent_remaining(),
        timer_warning: timer.remaining() <= TIMER_WARNING_SECS,
        prompt: question.prompt().to_owned(),
        options,
        answered,
        feedback: session.outcome().map(FeedbackVm::from),
        next_label: if session.is_last_question() {
            "Finish"
        } else {
            "Next question"
        },
    })
}
