/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// 1-based position of the current question.
    pub position: usize,
    pub answered: usize,
    pub score: u32,
    pub max_score: u32,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the session reached, counting the current question, 0..=100.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let reached = self.position.min(self.total);
        u32::try_from(reached * 100 / self.total).unwrap_or(100)
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered)
    }
}
