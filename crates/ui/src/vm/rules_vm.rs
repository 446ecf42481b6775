use quiz_core::model::QuizRules;

/// Bullet points for the "How to play" dialog.
#[must_use]
pub fn how_to_play_lines(rules: &QuizRules) -> Vec<String> {
    vec![
        "Read the multiplication or division question.".to_owned(),
        "Pick the answer you think is right from A, B, C and D.".to_owned(),
        format!(
            "You have {} seconds for each question.",
            rules.seconds_per_question()
        ),
        format!(
            "Every correct answer is worth {} points.",
            rules.points_per_question()
        ),
        format!(
            "Score at least {} to unlock the next level and earn its rank!",
            rules.unlock_threshold()
        ),
    ]
}
