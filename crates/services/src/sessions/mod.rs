mod service;

// Public API of the question session subsystem.
pub use crate::error::SessionError;
pub use service::{QuestionSession, SessionState, Submission};
