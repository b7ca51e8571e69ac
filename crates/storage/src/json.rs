//! JSON question bank files.
//!
//! ```json
//! { "questions": [
//!     { "category": 0, "prompt": "Longest river?",
//!       "options": [ { "text": "Nile", "correct": true }, { "text": "Danube" },
//!                    { "text": "Volga" }, { "text": "Rhine" } ] },
//!     { "category": "History", "prompt": "...", "options": [ ... ] }
//! ] }
//! ```
//!
//! A category may be given by index or by catalog name. Every entry goes
//! through `Question::new`, so one malformed question rejects the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trivia_core::model::{AnswerOption, CategoryCatalog, CategoryIndex, Question};

use crate::repository::{InMemoryQuestionBank, StorageError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Index(i64),
    Name(String),
}

impl CategoryRef {
    fn resolve(&self, catalog: &CategoryCatalog) -> Result<CategoryIndex, StorageError> {
        match self {
            CategoryRef::Index(raw) => usize::try_from(*raw)
                .map_err(|_| StorageError::InvalidCategory(format!("negative category index {raw}")))
                .and_then(|index| {
                    CategoryIndex::try_from(index)
                        .map_err(|e| StorageError::InvalidCategory(e.to_string()))
                }),
            CategoryRef::Name(name) => catalog
                .position(name)
                .ok_or_else(|| StorageError::InvalidCategory(format!("unknown category {name:?}"))),
        }
    }
}

/// One question as written in a bank file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankEntry {
    pub category: CategoryRef,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// Top-level shape of a bank file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankFile {
    #[serde(default)]
    pub questions: Vec<BankEntry>,
}

impl BankFile {
    /// Validate every entry and build an in-memory bank.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidCategory` for unknown categories and
    /// `StorageError::Serialization` for malformed questions.
    pub fn into_bank(self, catalog: &CategoryCatalog) -> Result<InMemoryQuestionBank, StorageError> {
        let mut entries = Vec::with_capacity(self.questions.len());
        for (position, entry) in self.questions.into_iter().enumerate() {
            let category = entry.category.resolve(catalog)?;
            let question = Question::new(entry.prompt, entry.options).map_err(|e| {
                StorageError::Serialization(format!("question #{position}: {e}"))
            })?;
            entries.push((category, question));
        }
        debug!(questions = entries.len(), "bank entries validated");
        Ok(InMemoryQuestionBank::from_entries(entries))
    }
}

/// Parse a bank from JSON text.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for invalid JSON or questions, and
/// `StorageError::InvalidCategory` for unknown categories.
pub fn load_from_str(
    raw: &str,
    catalog: &CategoryCatalog,
) -> Result<InMemoryQuestionBank, StorageError> {
    let file: BankFile =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    file.into_bank(catalog)
}

/// Read and parse a bank file from disk.
///
/// # Errors
///
/// Returns `StorageError::Io` if the file cannot be read, otherwise the errors
/// of `load_from_str`.
pub fn load_from_path(
    path: impl AsRef<Path>,
    catalog: &CategoryCatalog,
) -> Result<InMemoryQuestionBank, StorageError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("{}: {e}", path.display())))?;
    let bank = load_from_str(&raw, catalog)?;
    info!(path = %path.display(), questions = bank.len(), "question bank loaded");
    Ok(bank)
}
