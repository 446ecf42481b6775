use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::LevelId;
use crate::model::rules::QuizRules;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LevelError {
    #[error("level name cannot be empty")]
    EmptyName,

    #[error("level must drill at least one fact table")]
    NoTables,

    #[error("fact table must be > 0")]
    InvalidTable,

    #[error("level id must be >= 1")]
    InvalidId,
}

/// A configured difficulty unit.
///
/// Levels are static configuration: they are built once into a
/// [`LevelCatalog`](crate::model::LevelCatalog) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    id: LevelId,
    name: String,
    tables: Vec<u32>,
    rank: String,
    style: String,
}

impl Level {
    /// Creates a level.
    ///
    /// Duplicate tables are collapsed; the remaining tables keep their first
    /// occurrence order.
    ///
    /// # Errors
    ///
    /// Returns `LevelError` if the id is 0, the name is blank, or the table set
    /// is empty or contains 0.
    pub fn new(
        id: LevelId,
        name: impl Into<String>,
        tables: impl IntoIterator<Item = u32>,
        rank: impl Into<String>,
        style: impl Into<String>,
    ) -> Result<Self, LevelError> {
        if id.value() == 0 {
            return Err(LevelError::InvalidId);
        }
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(LevelError::EmptyName);
        }

        let mut unique = Vec::new();
        for table in tables {
            if table == 0 {
                return Err(LevelError::InvalidTable);
            }
            if !unique.contains(&table) {
                unique.push(table);
            }
        }
        if unique.is_empty() {
            return Err(LevelError::NoTables);
        }

        Ok(Self {
            id,
            name,
            tables: unique,
            rank: rank.into(),
            style: style.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> LevelId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fact tables drilled by this level. Never empty, no duplicates.
    #[must_use]
    pub fn tables(&self) -> &[u32] {
        &self.tables
    }

    /// Title awarded for completing the level.
    #[must_use]
    pub fn rank(&self) -> &str {
        &self.rank
    }

    /// Presentation hint (a colour theme name).
    #[must_use]
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Number of distinct prompts this level can produce under `rules`.
    ///
    /// Every (table, operand) pair yields one multiplication and one division
    /// prompt, and prompts from different tables never collide.
    #[must_use]
    pub fn fact_capacity(&self, rules: &QuizRules) -> usize {
        self.tables.len() * rules.operand_count() * 2
    }
}
