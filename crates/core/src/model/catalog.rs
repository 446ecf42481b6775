use thiserror::Error;

use crate::model::ids::LevelId;
use crate::model::level::{Level, LevelError};
use crate::model::rules::QuizRules;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog must contain at least one level")]
    Empty,

    #[error("level ids must be dense from 1: expected {expected}, found {found}")]
    NonDenseIds { expected: LevelId, found: LevelId },

    #[error("level {level} can produce {capacity} distinct questions, {required} required")]
    InsufficientFactSpace {
        level: LevelId,
        capacity: usize,
        required: usize,
    },

    #[error("level {level} drills table {table}, whose products overflow")]
    TableTooLarge { level: LevelId, table: u32 },

    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Ordered, validated set of levels.
///
/// Ids run densely from 1 to `len()`, and every level can supply
/// `questions_per_level` distinct prompts under the rules it was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Build a catalog from levels given in id order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, ids are not `1..=M` in
    /// order, a level drills a table whose products do not fit in a `u32`, or
    /// a level's fact space is too small for the question count.
    pub fn new(levels: Vec<Level>, rules: &QuizRules) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (idx, level) in levels.iter().enumerate() {
            let expected = LevelId::new(u32::try_from(idx + 1).unwrap_or(u32::MAX));
            if level.id() != expected {
                return Err(CatalogError::NonDenseIds {
                    expected,
                    found: level.id(),
                });
            }
            let oversized = level.tables().iter().find(|&&t| !rules.supports_table(t));
            if let Some(&table) = oversized {
                return Err(CatalogError::TableTooLarge {
                    level: level.id(),
                    table,
                });
            }
            let capacity = level.fact_capacity(rules);
            if capacity < rules.questions_per_level() {
                return Err(CatalogError::InsufficientFactSpace {
                    level: level.id(),
                    capacity,
                    required: rules.questions_per_level(),
                });
            }
        }
        Ok(Self { levels })
    }

    /// The built-in eight levels, drilling tables 2 through 9.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if `rules` leave a single table too few prompts.
    pub fn standard(rules: &QuizRules) -> Result<Self, CatalogError> {
        const LEVELS: [(u32, &str, &str); 8] = [
            (2, "New Student", "green-blue"),
            (3, "Little Explorer", "blue-purple"),
            (4, "Clever Star", "purple-pink"),
            (5, "Wisdom Warrior", "pink-red"),
            (6, "Study Leader", "red-orange"),
            (7, "Conquering Knight", "orange-yellow"),
            (8, "Knowledge Master", "yellow-lime"),
            (9, "Times Table Champion", "lime-emerald"),
        ];

        let levels = LEVELS
            .iter()
            .zip(1_u32..)
            .map(|(&(table, rank, style), id)| {
                Level::new(LevelId::new(id), format!("Level {id}"), [table], rank, style)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(levels, rules)
    }

    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    #[must_use]
    pub fn get(&self, id: LevelId) -> Option<&Level> {
        let idx = usize::try_from(id.value()).ok()?.checked_sub(1)?;
        self.levels.get(idx)
    }

    /// Total number of levels, which is also the id of the last level.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    #[must_use]
    pub fn last_id(&self) -> LevelId {
        LevelId::new(u32::try_from(self.levels.len()).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub fn is_last(&self, id: LevelId) -> bool {
        id >= self.last_id()
    }

    /// The level following `id`, if any.
    #[must_use]
    pub fn next_after(&self, id: LevelId) -> Option<&Level> {
        if self.is_last(id) {
            return None;
        }
        self.get(id.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(id: u32, tables: &[u32]) -> Level {
        Level::new(
            LevelId::new(id),
            format!("Level {id}"),
            tables.iter().copied(),
            "Rank",
            "green",
        )
        .unwrap()
    }

    #[test]
    fn standard_catalog_has_eight_dense_levels() {
        let catalog = LevelCatalog::standard(&QuizRules::default()).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.last_id(), LevelId::new(8));
        for (idx, level) in catalog.levels().iter().enumerate() {
            assert_eq!(level.id().value() as usize, idx + 1);
            assert_eq!(level.tables(), &[idx as u32 + 2]);
        }
        assert_eq!(catalog.get(LevelId::new(1)).unwrap().rank(), "New Student");
    }

    #[test]
    fn lookup_and_navigation() {
        let catalog = LevelCatalog::new(vec![level(1, &[2]), level(2, &[3])], &QuizRules::default())
            .unwrap();
        assert!(catalog.get(LevelId::new(0)).is_none());
        assert!(catalog.get(LevelId::new(3)).is_none());
        assert_eq!(
            catalog.next_after(LevelId::new(1)).map(Level::id),
            Some(LevelId::new(2))
        );
        assert!(catalog.next_after(LevelId::new(2)).is_none());
        assert!(catalog.is_last(LevelId::new(2)));
        assert!(!catalog.is_last(LevelId::new(1)));
    }

    #[test]
    fn rejects_gaps_in_ids() {
        let err = LevelCatalog::new(vec![level(1, &[2]), level(3, &[3])], &QuizRules::default())
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::NonDenseIds {
                expected: LevelId::new(2),
                found: LevelId::new(3)
            }
        );
    }

    #[test]
    fn rejects_levels_that_cannot_fill_a_session() {
        // One table, one operand: only two distinct prompts.
        let rules = QuizRules::new(10, 30, 10, 50, 2, 2, 5).unwrap();
        let err = LevelCatalog::new(vec![level(1, &[2])], &rules).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientFactSpace {
                level: LevelId::new(1),
                capacity: 2,
                required: 10
            }
        );
    }

    #[test]
    fn rejects_tables_whose_products_overflow() {
        let table = u32::MAX / 4;
        let levels = vec![level(1, &[2]), level(2, &[3, table])];
        let err = LevelCatalog::new(levels, &QuizRules::default()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::TableTooLarge {
                level: LevelId::new(2),
                table
            }
        );
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(
            LevelCatalog::new(Vec::new(), &QuizRules::default()).unwrap_err(),
            CatalogError::Empty
        );
    }
}
