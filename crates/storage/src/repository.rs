use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;
use trivia_core::model::{CategoryIndex, Question};

/// Errors surfaced by question bank adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("no question available for category {0}")]
    NotFound(CategoryIndex),

    #[error("invalid category in bank: {0}")]
    InvalidCategory(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("bank lock poisoned: {0}")]
    Poisoned(String),
}

/// Source of questions for each category.
pub trait QuestionBank: Send + Sync {
    /// Fetch the question to show for `category`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the bank has nothing for the category,
    /// or other storage errors.
    fn question_for(&self, category: CategoryIndex) -> Result<Question, StorageError>;

    /// Number of questions stored for `category`.
    fn count(&self, category: CategoryIndex) -> usize;
}

/// In-memory question bank.
///
/// Holds any number of questions per category. Successive lookups for the same
/// category rotate through its questions, so a retry after a wrong answer
/// shows the next one.
#[derive(Clone, Default)]
pub struct InMemoryQuestionBank {
    questions: Arc<HashMap<CategoryIndex, Vec<Question>>>,
    cursors: Arc<Mutex<HashMap<CategoryIndex, usize>>>,
}

impl InMemoryQuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bank from `(category, question)` pairs, keeping input order
    /// within each category.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (CategoryIndex, Question)>) -> Self {
        let mut questions: HashMap<CategoryIndex, Vec<Question>> = HashMap::new();
        for (category, question) in entries {
            questions.entry(category).or_default().push(question);
        }
        Self {
            questions: Arc::new(questions),
            cursors: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Total number of questions across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Categories with no question at all.
    #[must_use]
    pub fn missing_categories(&self) -> Vec<CategoryIndex> {
        CategoryIndex::all()
            .filter(|category| self.count(*category) == 0)
            .collect()
    }
}

impl fmt::Debug for InMemoryQuestionBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<(CategoryIndex, usize)> = CategoryIndex::all()
            .map(|category| (category, self.count(category)))
            .collect();
        f.debug_struct("InMemoryQuestionBank")
            .field("len", &self.len())
            .field("counts", &counts)
            .finish_non_exhaustive()
    }
}

impl QuestionBank for InMemoryQuestionBank {
    fn question_for(&self, category: CategoryIndex) -> Result<Question, StorageError> {
        let pool = self
            .questions
            .get(&category)
            .filter(|pool| !pool.is_empty())
            .ok_or(StorageError::NotFound(category))?;

        let mut cursors = self
            .cursors
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))?;
        let cursor = cursors.entry(category).or_insert(0);
        let position = *cursor % pool.len();
        *cursor = (position + 1) % pool.len();
        debug!(%category, position, pool = pool.len(), "serving question");

        Ok(pool[position].clone())
    }

    fn count(&self, category: CategoryIndex) -> usize {
        self.questions.get(&category).map_or(0, Vec::len)
    }
}
