use std::collections::HashSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use quiz_core::model::{Fact, FactKind, Level, OPTION_COUNT, Question, QuizRules};

use crate::error::GenerationError;

/// Rejection-sampling attempts allowed per distinct fact before the generator
/// switches to drawing from the unused facts directly.
const SAMPLING_ATTEMPTS_PER_FACT: usize = 8;

/// Random distractor draws before falling back to the answer's neighbours.
const DISTRACTOR_ATTEMPTS: usize = 64;

/// Builds question sequences for a level.
///
/// Prompts within one sequence are pairwise distinct. Each question offers
/// [`OPTION_COUNT`] distinct positive options: the answer plus distractors
/// within `distractor_spread` of it, in random order.
///
/// Generation always terminates. Requests larger than the table set's fact
/// space are rejected up front, and once rejection sampling has run for a
/// bounded number of draws the remaining questions are taken from a shuffled
/// list of the facts not yet used.
#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator {
    rules: QuizRules,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new(rules: QuizRules) -> Self {
        Self { rules }
    }

    /// Number of distinct prompts available for `tables`.
    #[must_use]
    pub fn capacity(&self, tables: &[u32]) -> usize {
        distinct_tables(tables).len() * self.rules.operand_count() * 2
    }

    /// Generate one session's worth of questions for `level`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the level's tables cannot supply
    /// `questions_per_level` distinct prompts.
    pub fn generate_for_level<R: Rng + ?Sized>(
        &self,
        level: &Level,
        rng: &mut R,
    ) -> Result<Vec<Question>, GenerationError> {
        self.generate(level.tables(), self.rules.questions_per_level(), rng)
    }

    /// Generate `count` questions drawn from `tables`.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::NoTables` or `GenerationError::InvalidTable`
    /// for an unusable table set (empty, zero, or a table whose products
    /// overflow), and
    /// `GenerationError::InsufficientFactSpace` when `count` exceeds
    /// [`QuestionGenerator::capacity`].
    pub fn generate<R: Rng + ?Sized>(
        &self,
        tables: &[u32],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, GenerationError> {
        let tables = distinct_tables(tables);
        if tables.is_empty() {
            return Err(GenerationError::NoTables);
        }
        if !tables.iter().all(|&table| self.rules.supports_table(table)) {
            return Err(GenerationError::InvalidTable);
        }
        let capacity = self.capacity(&tables);
        if count > capacity {
            return Err(GenerationError::InsufficientFactSpace {
                requested: count,
                capacity,
            });
        }

        let mut used: HashSet<Fact> = HashSet::with_capacity(count);
        let mut questions = Vec::with_capacity(count);
        let max_attempts = capacity.saturating_mul(SAMPLING_ATTEMPTS_PER_FACT);
        let mut attempts = 0;

        while questions.len() < count && attempts < max_attempts {
            attempts += 1;
            let Some(&table) = tables.choose(rng) else {
                return Err(GenerationError::NoTables);
            };
            let kind = if rng.random_bool(0.5) {
                FactKind::Multiplication
            } else {
                FactKind::Division
            };
            let operand = rng.random_range(self.rules.operand_min()..=self.rules.operand_max());
            let fact = Fact::new(table, operand, kind);
            if !used.insert(fact) {
                continue;
            }
            questions.push(self.build_question(fact, rng)?);
        }

        if questions.len() < count {
            tracing::debug!(
                drawn = questions.len(),
                count,
                attempts,
                "rejection sampling exhausted, drawing from unused facts"
            );
            let mut remaining: Vec<Fact> = self
                .all_facts(&tables)
                .filter(|fact| !used.contains(fact))
                .collect();
            remaining.shuffle(rng);
            for fact in remaining.into_iter().take(count - questions.len()) {
                questions.push(self.build_question(fact, rng)?);
            }
        }

        Ok(questions)
    }

    fn all_facts<'a>(&self, tables: &'a [u32]) -> impl Iterator<Item = Fact> + 'a {
        let operands = self.rules.operand_min()..=self.rules.operand_max();
        tables.iter().flat_map(move |&table| {
            operands.clone().flat_map(move |operand| {
                [FactKind::Multiplication, FactKind::Division]
                    .into_iter()
                    .map(move |kind| Fact::new(table, operand, kind))
            })
        })
    }

    fn build_question<R: Rng + ?Sized>(
        &self,
        fact: Fact,
        rng: &mut R,
    ) -> Result<Question, GenerationError> {
        let answer = fact.answer();
        let mut options = [answer; OPTION_COUNT];
        let mut filled = 1;

        let spread = i64::from(self.rules.distractor_spread());
        let mut attempts = 0;
        while filled < OPTION_COUNT && attempts < DISTRACTOR_ATTEMPTS {
            attempts += 1;
            let offset = rng.random_range(-spread..=spread);
            if offset == 0 {
                continue;
            }
            let Ok(candidate) = u32::try_from(i64::from(answer) + offset) else {
                continue;
            };
            if candidate == 0 || options[..filled].contains(&candidate) {
                continue;
            }
            options[filled] = candidate;
            filled += 1;
        }

        // Nearest unused positive neighbours: answer ± 1, ± 2, ...
        let mut step = 1;
        while filled < OPTION_COUNT {
            for candidate in [answer.checked_add(step), answer.checked_sub(step)]
                .into_iter()
                .flatten()
            {
                if filled < OPTION_COUNT
                    && candidate > 0
                    && !options[..filled].contains(&candidate)
                {
                    options[filled] = candidate;
                    filled += 1;
                }
            }
            step += 1;
        }

        options.shuffle(rng);
        Ok(Question::new(fact.prompt(), options, answer)?)
    }
}

fn distinct_tables(tables: &[u32]) -> Vec<u32> {
    let mut unique = Vec::with_capacity(tables.len());
    for &table in tables {
        if !unique.contains(&table) {
            unique.push(table);
        }
    }
    unique
}
