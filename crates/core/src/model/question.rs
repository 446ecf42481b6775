use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of options shown for every question.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("options must be positive")]
    NonPositiveOption,

    #[error("options must be distinct")]
    DuplicateOption,

    #[error("answer {answer} is not among the options")]
    AnswerMissing { answer: u32 },
}

/// Operation drilled by a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactKind {
    Multiplication,
    Division,
}

/// One multiplication-table fact: `table × operand`, or its inverse division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub table: u32,
    pub operand: u32,
    pub kind: FactKind,
}

impl Fact {
    #[must_use]
    pub fn new(table: u32, operand: u32, kind: FactKind) -> Self {
        Self {
            table,
            operand,
            kind,
        }
    }

    /// Prompt text shown to the player, e.g. `2 × 3 = ?` or `6 ÷ 2 = ?`.
    #[must_use]
    pub fn prompt(&self) -> String {
        self.to_string()
    }

    /// The expected answer.
    #[must_use]
    pub fn answer(&self) -> u32 {
        match self.kind {
            FactKind::Multiplication => self.table * self.operand,
            FactKind::Division => self.operand,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FactKind::Multiplication => write!(f, "{} × {} = ?", self.table, self.operand),
            FactKind::Division => {
                write!(f, "{} ÷ {} = ?", self.table * self.operand, self.table)
            }
        }
    }
}

/// A single multiple-choice question.
///
/// Invariant: exactly [`OPTION_COUNT`] distinct positive options, one of which
/// is the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    options: [u32; OPTION_COUNT],
    answer: u32,
}

impl Question {
    /// Creates a question, checking the option invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, an option is zero or
    /// repeated, or the answer is not among the options.
    pub fn new(
        prompt: impl Into<String>,
        options: [u32; OPTION_COUNT],
        answer: u32,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.contains(&0) {
            return Err(QuestionError::NonPositiveOption);
        }
        for (idx, option) in options.iter().enumerate() {
            if options[idx + 1..].contains(option) {
                return Err(QuestionError::DuplicateOption);
            }
        }
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerMissing { answer });
        }

        Ok(Self {
            prompt,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[u32; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> u32 {
        self.answer
    }

    #[must_use]
    pub fn is_correct(&self, option: u32) -> bool {
        option == self.answer
    }

    #[must_use]
    pub fn has_option(&self, option: u32) -> bool {
        self.options.contains(&option)
    }
}
