use quiz_core::model::QuizRules;
use services::EndSummary;

/// Closing message for a final score. "Well done!" starts at the unlock
/// threshold and "Excellent!" at 80% of a perfect score.
#[must_use]
pub fn end_message(score: u32, rules: &QuizRules) -> &'static str {
    let excellent = u64::from(rules.max_score()) * 4;
    if u64::from(score) * 5 >= excellent {
        "Excellent!"
    } else if rules.qualifies_for_unlock(score) {
        "Well done!"
    } else {
        "Keep trying!"
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndVm {
    pub message: &'static str,
    pub level_name: String,
    pub score_label: String,
    pub high_score: u32,
    pub rank: String,
    pub can_advance: bool,
}

impl EndVm {
    #[must_use]
    pub fn new(summary: &EndSummary, rules: &QuizRules) -> Self {
        Self {
            message: end_message(summary.score, rules),
            level_name: summary.level.name().to_owned(),
            score_label: format!("{}/{}", summary.score, summary.max_score),
            high_score: summary.high_score,
            rank: summary.level.rank().to_owned(),
            can_advance: summary.can_advance(),
        }
    }
}
