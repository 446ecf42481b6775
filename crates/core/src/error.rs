use thiserror::Error;

use crate::model::{CatalogError, LevelError, QuestionError, RulesError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
