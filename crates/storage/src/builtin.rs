use trivia_core::model::CategoryCatalog;

use crate::json::load_from_str;
use crate::repository::{InMemoryQuestionBank, StorageError};

const BUILTIN_BANK: &str = include_str!("../data/builtin_bank.json");

/// Bank shipped with the game, two questions per category.
///
/// # Errors
///
/// Returns `StorageError` if the embedded data fails validation.
pub fn builtin_bank(catalog: &CategoryCatalog) -> Result<InMemoryQuestionBank, StorageError> {
    load_from_str(BUILTIN_BANK, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::QuestionBank;
    use trivia_core::model::CategoryIndex;

    #[test]
    fn builtin_bank_covers_every_category() {
        let bank = builtin_bank(&CategoryCatalog::classic()).unwrap();
        assert!(bank.missing_categories().is_empty());
        for category in CategoryIndex::all() {
            assert_eq!(bank.count(category), 2);
            let question = bank.question_for(category).unwrap();
            assert!(question.correct_index().is_some());
        }
    }
}
