use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::category::CategoryError;
use crate::model::question::QuestionError;

/// Number of categories in every game.
pub const CATEGORY_COUNT: usize = 6;

/// Number of answer options a well-formed question carries.
pub const OPTION_COUNT: usize = 4;

/// Stable index of a category (0..=5).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CategoryIndex(pub(crate) u8);

impl CategoryIndex {
    /// Creates a new `CategoryIndex`.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::OutOfRange` if `raw` is not below `CATEGORY_COUNT`.
    pub fn new(raw: u8) -> Result<Self, CategoryError> {
        if usize::from(raw) < CATEGORY_COUNT {
            Ok(Self(raw))
        } else {
            Err(CategoryError::OutOfRange {
                index: usize::from(raw),
            })
        }
    }

    /// Returns the underlying value
    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Position in catalog order, handy for slice indexing.
    #[must_use]
    pub fn as_usize(&self) -> usize {
        usize::from(self.0)
    }

    /// Every category index in ascending order.
    pub fn all() -> impl Iterator<Item = CategoryIndex> {
        (0..CATEGORY_COUNT as u8).map(CategoryIndex)
    }
}

impl TryFrom<u8> for CategoryIndex {
    type Error = CategoryError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<usize> for CategoryIndex {
    type Error = CategoryError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .map_err(|_| CategoryError::OutOfRange { index: raw })
            .and_then(Self::new)
    }
}

impl From<CategoryIndex> for u8 {
    fn from(index: CategoryIndex) -> Self {
        index.0
    }
}

/// Position of an answer option within a question (0..=3).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct OptionIndex(u8);

impl OptionIndex {
    /// Creates a new `OptionIndex`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OptionOutOfRange` if `raw` is not below `OPTION_COUNT`.
    pub fn new(raw: u8) -> Result<Self, QuestionError> {
        if usize::from(raw) < OPTION_COUNT {
            Ok(Self(raw))
        } else {
            Err(QuestionError::OptionOutOfRange {
                index: usize::from(raw),
            })
        }
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn as_usize(&self) -> usize {
        usize::from(self.0)
    }

    pub fn all() -> impl Iterator<Item = OptionIndex> {
        (0..OPTION_COUNT as u8).map(OptionIndex)
    }
}

impl TryFrom<u8> for OptionIndex {
    type Error = QuestionError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl TryFrom<usize> for OptionIndex {
    type Error = QuestionError;

    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u8::try_from(raw)
            .map_err(|_| QuestionError::OptionOutOfRange { index: raw })
            .and_then(Self::new)
    }
}

impl From<OptionIndex> for u8 {
    fn from(index: OptionIndex) -> Self {
        index.0
    }
}

impl fmt::Debug for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryIndex({})", self.0)
    }
}

impl fmt::Debug for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionIndex({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for CategoryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OptionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing an index from a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIndexError {
    kind: &'static str,
    raw: String,
}

impl fmt::Display for ParseIndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseIndexError {}

impl FromStr for CategoryIndex {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|raw| CategoryIndex::new(raw).ok())
            .ok_or_else(|| ParseIndexError {
                kind: "CategoryIndex",
                raw: s.to_string(),
            })
    }
}

impl FromStr for OptionIndex {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(|raw| OptionIndex::new(raw).ok())
            .ok_or_else(|| ParseIndexError {
                kind: "OptionIndex",
                raw: s.to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
