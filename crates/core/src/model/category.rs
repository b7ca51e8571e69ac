use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CATEGORY_COUNT, CategoryIndex};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category index {index} is out of range (expected 0..6)")]
    OutOfRange { index: usize },

    #[error("catalog must have exactly 6 categories, got {len}")]
    WrongCount { len: usize },

    #[error("category {index} has an empty name")]
    EmptyName { index: usize },

    #[error("category {index} has an empty image reference")]
    EmptyImage { index: usize },

    #[error("completion mask {bits:#010b} has bits outside the 6 categories")]
    InvalidMask { bits: u8 },
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Label colour a presenter uses for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Blue,
    Purple,
    Yellow,
    Pink,
    Green,
    Orange,
}

/// A trivia topic bound to one face of the dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    image: String,
    accent: Accent,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>, accent: Accent) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            accent,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Asset name of the illustration shown for this category.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    #[must_use]
    pub fn accent(&self) -> Accent {
        self.accent
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The fixed, ordered list of six categories for a game.
///
/// Built once at startup and never mutated; lookups by `CategoryIndex` cannot
/// fail because the catalog length is checked at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    /// Builds a catalog from caller-supplied categories.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::WrongCount` unless exactly six categories are given,
    /// and `EmptyName`/`EmptyImage` for blank entries.
    pub fn new(categories: Vec<Category>) -> Result<Self, CategoryError> {
        if categories.len() != CATEGORY_COUNT {
            return Err(CategoryError::WrongCount {
                len: categories.len(),
            });
        }
        for (index, category) in categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(CategoryError::EmptyName { index });
            }
            if category.image.trim().is_empty() {
                return Err(CategoryError::EmptyImage { index });
            }
        }
        Ok(Self { categories })
    }

    /// The built-in category set.
    #[must_use]
    pub fn classic() -> Self {
        let categories = vec![
            Category::new("Geography", "dice1", Accent::Blue),
            Category::new("Art & Literature", "dice2", Accent::Purple),
            Category::new("History", "dice3", Accent::Yellow),
            Category::new("Entertainment", "dice4", Accent::Pink),
            Category::new("Science & Nature", "dice5", Accent::Green),
            Category::new("Sports & Leisure", "dice6", Accent::Orange),
        ];
        Self { categories }
    }

    #[must_use]
    pub fn get(&self, index: CategoryIndex) -> &Category {
        &self.categories[index.as_usize()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryIndex, &Category)> {
        CategoryIndex::all().zip(self.categories.iter())
    }

    /// Finds a category by case-insensitive name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<CategoryIndex> {
        self.iter()
            .find(|(_, category)| category.name.eq_ignore_ascii_case(name.trim()))
            .map(|(index, _)| index)
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::classic()
    }
}
