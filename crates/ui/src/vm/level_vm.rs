use quiz_core::model::{LevelCatalog, LevelId, ProgressRecord};

/// One card on the level select grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCardVm {
    pub id: LevelId,
    pub name: String,
    pub rank: String,
    pub style: String,
    pub unlocked: bool,
    pub high_score: u32,
}

impl LevelCardVm {
    #[must_use]
    pub fn class(&self) -> String {
        if self.unlocked {
            format!("level-card style-{}", self.style)
        } else {
            "level-card locked".to_owned()
        }
    }
}

#[must_use]
pub fn map_level_cards(catalog: &LevelCatalog, progress: &ProgressRecord) -> Vec<LevelCardVm> {
    catalog
        .levels()
        .iter()
        .map(|level| LevelCardVm {
            id: level.id(),
            name: level.name().to_owned(),
            rank: level.rank().to_owned(),
            style: level.style().to_owned(),
            unlocked: progress.is_unlocked(level.id()),
            high_score: progress.high_score(level.id()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizRules;

    #[test]
    fn cards_follow_watermark() {
        let catalog = LevelCatalog::standard(&QuizRules::default()).unwrap();
        let progress = ProgressRecord::from_persisted(LevelId::new(3), [(LevelId::new(2), 70)]);
        let cards = map_level_cards(&catalog, &progress);

        assert_eq!(cards.len(), 8);
        let unlocked: Vec<u32> = cards
            .iter()
            .filter(|c| c.unlocked)
            .map(|c| c.id.value())
            .collect();
        assert_eq!(unlocked, vec![1, 2, 3]);
        assert_eq!(cards[1].high_score, 70);
        assert_eq!(cards[0].class(), "level-card style-green-blue");
        assert_eq!(cards[7].class(), "level-card locked");
    }
}
