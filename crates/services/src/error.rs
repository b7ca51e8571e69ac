//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use trivia_core::model::{CategoryError, CategoryIndex, QuestionError};

/// Errors emitted by `CategoryTracker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrackerError {
    #[error(transparent)]
    InvalidArgument(#[from] CategoryError),
}

/// Errors emitted by question sessions.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no question available for category {category}")]
    NoQuestionAvailable {
        category: CategoryIndex,
        #[source]
        source: StorageError,
    },
    #[error(transparent)]
    InvalidArgument(#[from] QuestionError),
}

/// Errors emitted by `GameService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[source] trivia_core::Error),
    #[error("no question available for category {category}")]
    NoQuestionAvailable {
        category: CategoryIndex,
        #[source]
        source: StorageError,
    },
    #[error("no category has been selected")]
    NothingSelected,
    #[error("no question is open")]
    NoActiveQuestion,
    #[error("the open question has not been answered yet")]
    QuestionInProgress,
}

impl From<TrackerError> for GameError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::InvalidArgument(e) => GameError::InvalidArgument(e.into()),
        }
    }
}

impl From<SessionError> for GameError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoQuestionAvailable { category, source } => {
                GameError::NoQuestionAvailable { category, source }
            }
            SessionError::InvalidArgument(e) => GameError::InvalidArgument(e.into()),
        }
    }
}
