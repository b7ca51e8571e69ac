use std::fmt;
use tracing::{debug, warn};

use storage::repository::QuestionBank;
use trivia_core::model::{CategoryIndex, OptionIndex, Outcome, Question};

use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingAnswer,
    Answered { choice: OptionIndex, outcome: Outcome },
}

/// What a call to `submit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// First answer for the session; it was evaluated.
    Evaluated {
        category: CategoryIndex,
        choice: OptionIndex,
        outcome: Outcome,
    },
    /// The session was already answered; carries the first outcome.
    Ignored { outcome: Outcome },
}

impl Submission {
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self {
            Submission::Evaluated { outcome, .. } | Submission::Ignored { outcome } => *outcome,
        }
    }

    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Submission::Ignored { .. })
    }

    /// Category to report as completed, present only on a first correct answer.
    #[must_use]
    pub fn completed_category(&self) -> Option<CategoryIndex> {
        match self {
            Submission::Evaluated {
                category,
                outcome: Outcome::Correct,
                ..
            } => Some(*category),
            _ => None,
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One question for one category, answered at most once.
///
/// The session evaluates the answer and reports a correct category through
/// `Submission::completed_category`; it never touches game progress itself.
pub struct QuestionSession {
    category: CategoryIndex,
    question: Question,
    state: SessionState,
}

impl QuestionSession {
    #[must_use]
    pub fn new(category: CategoryIndex, question: Question) -> Self {
        Self {
            category,
            question,
            state: SessionState::AwaitingAnswer,
        }
    }

    /// Load the question for `category` from the bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestionAvailable` if the bank cannot supply one.
    pub fn load(category: CategoryIndex, bank: &dyn QuestionBank) -> Result<Self, SessionError> {
        let question = bank.question_for(category).map_err(|source| {
            warn!(%category, error = %source, "question bank has no question");
            SessionError::NoQuestionAvailable { category, source }
        })?;
        debug!(%category, "question session opened");
        Ok(Self::new(category, question))
    }

    #[must_use]
    pub fn category(&self) -> CategoryIndex {
        self.category
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        matches!(self.state, SessionState::Answered { .. })
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::AwaitingAnswer => None,
            SessionState::Answered { outcome, .. } => Some(outcome),
        }
    }

    /// Evaluate `choice`. Only the first call is evaluated.
    pub fn submit(&mut self, choice: OptionIndex) -> Submission {
        if let SessionState::Answered { outcome, .. } = self.state {
            debug!(category = %self.category, "repeat submission ignored");
            return Submission::Ignored { outcome };
        }

        let outcome = self.question.evaluate(choice);
        self.state = SessionState::Answered { choice, outcome };
        debug!(category = %self.category, %choice, ?outcome, "answer evaluated");
        Submission::Evaluated {
            category: self.category,
            choice,
            outcome,
        }
    }

    /// Like `submit`, for an unchecked option index.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidArgument` if `raw` is not in 0..4.
    pub fn submit_raw(&mut self, raw: usize) -> Result<Submission, SessionError> {
        let choice = OptionIndex::try_from(raw)?;
        Ok(self.submit(choice))
    }
}

impl fmt::Debug for QuestionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionSession")
            .field("category", &self.category)
            .field("options_len", &self.question.options().len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
