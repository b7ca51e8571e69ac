#![forbid(unsafe_code)]

pub mod builtin;
pub mod json;
pub mod repository;

pub use builtin::builtin_bank;
pub use repository::{InMemoryQuestionBank, QuestionBank, StorageError};
