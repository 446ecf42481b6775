mod catalog;
mod ids;
mod level;
mod progress;
mod question;
mod rules;

pub use ids::LevelId;

pub use catalog::{CatalogError, LevelCatalog};
pub use level::{Level, LevelError};
pub use progress::ProgressRecord;
pub use question::{Fact, FactKind, OPTION_COUNT, Question, QuestionError};
pub use rules::{QuizRules, RulesError};
