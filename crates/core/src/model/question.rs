use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OPTION_COUNT, OptionIndex};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have exactly 4 options, got {len}")]
    WrongOptionCount { len: usize },

    #[error("option {index} has empty text")]
    EmptyOption { index: usize },

    #[error("question must have exactly one correct option, got {count}")]
    CorrectCount { count: usize },

    #[error("option index {index} is out of range (expected 0..4)")]
    OptionOutOfRange { index: usize },
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// One of the choices shown for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(rename = "correct", default)]
    pub is_correct: bool,
}

impl AnswerOption {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    #[must_use]
    pub fn wrong(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

impl From<bool> for Outcome {
    fn from(correct: bool) -> Self {
        if correct {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        }
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question.
///
/// `Question::new` enforces the four-options/one-correct shape. Data that
/// bypasses validation through `Question::lenient` is still safe to evaluate:
/// a missing option reads as incorrect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    options: Vec<AnswerOption>,
}

impl Question {
    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the prompt is blank, the option count is not
    /// four, an option is blank, or not exactly one option is correct.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<AnswerOption>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() != OPTION_COUNT {
            return Err(QuestionError::WrongOptionCount { len: options.len() });
        }
        if let Some(index) = options.iter().position(|o| o.text.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        let count = options.iter().filter(|o| o.is_correct).count();
        if count != 1 {
            return Err(QuestionError::CorrectCount { count });
        }
        Ok(Self { prompt, options })
    }

    /// Creates a question without shape validation.
    #[must_use]
    pub fn lenient(prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: OptionIndex) -> Option<&AnswerOption> {
        self.options.get(index.as_usize())
    }

    /// Text shown on the button for `index`, empty when the option is missing.
    #[must_use]
    pub fn option_text(&self, index: OptionIndex) -> &str {
        self.option(index).map_or("", |o| o.text.as_str())
    }

    /// Evaluates a choice. Missing options count as incorrect.
    #[must_use]
    pub fn evaluate(&self, index: OptionIndex) -> Outcome {
        Outcome::from(self.option(index).is_some_and(|o| o.is_correct))
    }

    /// Index of the correct option, if there is one.
    #[must_use]
    pub fn correct_index(&self) -> Option<OptionIndex> {
        self.options
            .iter()
            .position(|o| o.is_correct)
            .and_then(|i| OptionIndex::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with_correct(correct: usize) -> Vec<AnswerOption> {
        (0..4)
            .map(|i| AnswerOption::new(format!("Option {i}"), i == correct))
            .collect()
    }

    fn idx(raw: u8) -> OptionIndex {
        OptionIndex::new(raw).unwrap()
    }

    #[test]
    fn evaluates_correct_and_incorrect_choices() {
        let q = Question::new("Capital of Peru?", options_with_correct(2)).unwrap();
        assert_eq!(q.evaluate(idx(2)), Outcome::Correct);
        assert_eq!(q.evaluate(idx(0)), Outcome::Incorrect);
        assert_eq!(q.correct_index(), Some(idx(2)));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let mut options = options_with_correct(0);
        options.pop();
        let err = Question::new("Q", options).unwrap_err();
        assert_eq!(err, QuestionError::WrongOptionCount { len: 3 });
    }

    #[test]
    fn rejects_multiple_or_missing_correct_options() {
        let mut options = options_with_correct(0);
        options[3].is_correct = true;
        assert_eq!(
            Question::new("Q", options).unwrap_err(),
            QuestionError::CorrectCount { count: 2 }
        );

        let none = (0..4).map(|i| AnswerOption::wrong(format!("{i}"))).collect();
        assert_eq!(
            Question::new("Q", none).unwrap_err(),
            QuestionError::CorrectCount { count: 0 }
        );
    }

    #[test]
    fn rejects_blank_prompt_and_blank_option() {
        assert_eq!(
            Question::new("   ", options_with_correct(1)).unwrap_err(),
            QuestionError::EmptyPrompt
        );
        let mut options = options_with_correct(1);
        options[2].text = String::new();
        assert_eq!(
            Question::new("Q", options).unwrap_err(),
            QuestionError::EmptyOption { index: 2 }
        );
    }

    #[test]
    fn sparse_question_treats_missing_option_as_incorrect() {
        let q = Question::lenient(
            "Sparse",
            vec![AnswerOption::wrong("a"), AnswerOption::correct("b")],
        );
        assert_eq!(q.evaluate(idx(1)), Outcome::Correct);
        assert_eq!(q.evaluate(idx(3)), Outcome::Incorrect);
        assert_eq!(q.option_text(idx(3)), "");
    }

    #[test]
    fn deserializes_correct_flag_with_default() {
        let option: AnswerOption = serde_json::from_str(r#"{"text":"Lima"}"#).unwrap();
        assert!(!option.is_correct);
        let option: AnswerOption =
            serde_json::from_str(r#"{"text":"Lima","correct":true}"#).unwrap();
        assert!(option.is_correct);
    }
}
