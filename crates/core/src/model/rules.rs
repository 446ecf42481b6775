use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("questions per level must be > 0")]
    InvalidQuestionCount,

    #[error("seconds per question must be > 0")]
    InvalidQuestionDuration,

    #[error("points per question must be > 0")]
    InvalidPoints,

    #[error("unlock threshold {threshold} exceeds the maximum score {max}")]
    UnreachableThreshold { threshold: u32, max: u32 },

    #[error("operand range must satisfy 1 <= min <= max")]
    InvalidOperandRange,

    #[error("distractor spread must be at least 2")]
    InvalidDistractorSpread,
}

//
// ─── RULES ─────────────────────────────────────────────────────────────────────
//

/// Game constants shared by every level.
///
/// One value is validated at startup and passed to the generator, the session
/// state machine, and the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    questions_per_level: usize,
    seconds_per_question: u32,
    points_per_question: u32,
    unlock_threshold: u32,
    operand_min: u32,
    operand_max: u32,
    distractor_spread: u32,
}

impl QuizRules {
    /// Creates custom rules.
    ///
    /// # Errors
    ///
    /// Returns `RulesError` if a count or duration is zero, if the operand
    /// range is empty, or if the unlock threshold cannot be reached.
    pub fn new(
        questions_per_level: usize,
        seconds_per_question: u32,
        points_per_question: u32,
        unlock_threshold: u32,
        operand_min: u32,
        operand_max: u32,
        distractor_spread: u32,
    ) -> Result<Self, RulesError> {
        Self {
            questions_per_level,
            seconds_per_question,
            points_per_question,
            unlock_threshold,
            operand_min,
            operand_max,
            distractor_spread,
        }
        .validate()
    }

    /// Check the invariants of a rules value.
    ///
    /// # Errors
    ///
    /// See [`QuizRules::new`].
    pub fn validate(self) -> Result<Self, RulesError> {
        if self.questions_per_level == 0 {
            return Err(RulesError::InvalidQuestionCount);
        }
        if self.seconds_per_question == 0 {
            return Err(RulesError::InvalidQuestionDuration);
        }
        if self.points_per_question == 0 {
            return Err(RulesError::InvalidPoints);
        }
        if self.operand_min == 0 || self.operand_min > self.operand_max {
            return Err(RulesError::InvalidOperandRange);
        }
        // With a spread of 1 the answer has only two neighbours, too few for
        // three distractors.
        if self.distractor_spread < 2 {
            return Err(RulesError::InvalidDistractorSpread);
        }
        let max = self.max_score();
        if self.unlock_threshold > max {
            return Err(RulesError::UnreachableThreshold {
                threshold: self.unlock_threshold,
                max,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub fn questions_per_level(&self) -> usize {
        self.questions_per_level
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn points_per_question(&self) -> u32 {
        self.points_per_question
    }

    /// Minimum final score that unlocks the following level.
    #[must_use]
    pub fn unlock_threshold(&self) -> u32 {
        self.unlock_threshold
    }

    #[must_use]
    pub fn operand_min(&self) -> u32 {
        self.operand_min
    }

    #[must_use]
    pub fn operand_max(&self) -> u32 {
        self.operand_max
    }

    /// Number of operands drilled per fact table.
    #[must_use]
    pub fn operand_count(&self) -> usize {
        (self.operand_max - self.operand_min + 1) as usize
    }

    /// Whether every product of `table` with an operand fits in a `u32`.
    #[must_use]
    pub fn supports_table(&self, table: u32) -> bool {
        table > 0 && table.checked_mul(self.operand_max).is_some()
    }

    #[must_use]
    pub fn distractor_spread(&self) -> u32 {
        self.distractor_spread
    }

    /// Score for a perfect session.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        let questions = u32::try_from(self.questions_per_level).unwrap_or(u32::MAX);
        questions.saturating_mul(self.points_per_question)
    }

    /// Whether a final score unlocks the following level.
    #[must_use]
    pub fn qualifies_for_unlock(&self, score: u32) -> bool {
        score >= self.unlock_threshold
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            questions_per_level: 10,
            seconds_per_question: 30,
            points_per_question: 10,
            unlock_threshold: 50,
            operand_min: 2,
            operand_max: 10,
            distractor_spread: 5,
        }
    }
}
