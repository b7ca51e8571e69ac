use thiserror::Error;

use crate::model::CategoryError;
use crate::model::QuestionError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Question(#[from] QuestionError),
}

impl Error {
    /// True when the caller passed an index outside its valid range.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::Category(CategoryError::OutOfRange { .. })
                | Error::Question(QuestionError::OptionOutOfRange { .. })
        )
    }
}
