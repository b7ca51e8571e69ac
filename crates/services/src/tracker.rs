use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use trivia_core::model::{CATEGORY_COUNT, CategoryCatalog, CategoryIndex, CompletionSet, DiceFace};

use crate::error::TrackerError;
use crate::progress::{CategorySlot, ProgressView};

/// Result of asking the tracker for the next category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Category(CategoryIndex),
    /// Every category is completed; nothing left to roll for.
    Won,
}

impl Pick {
    #[must_use]
    pub fn category(self) -> Option<CategoryIndex> {
        match self {
            Pick::Category(index) => Some(index),
            Pick::Won => None,
        }
    }
}

/// Effect of recording one correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub index: CategoryIndex,
    /// False when the category was already completed.
    pub newly_completed: bool,
    /// True only for the insert that completed the last category.
    pub won_now: bool,
}

/// Tracks which categories have been answered correctly and picks the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTracker {
    completed: CompletionSet,
}

impl CategoryTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_completed(completed: CompletionSet) -> Self {
        Self { completed }
    }

    #[must_use]
    pub fn completed(&self) -> CompletionSet {
        self.completed
    }

    /// Picks an uncompleted category uniformly at random.
    ///
    /// Returns `Pick::Won` once nothing remains. Does not change state.
    pub fn pick_category<R: Rng + ?Sized>(&self, rng: &mut R) -> Pick {
        let remaining = self.completed.remaining();
        match remaining.choose(rng) {
            Some(index) => {
                debug!(category = %index, remaining = remaining.len(), "category picked");
                Pick::Category(*index)
            }
            None => Pick::Won,
        }
    }

    /// Records `index` as answered correctly. Idempotent.
    pub fn mark_completed(&mut self, index: CategoryIndex) -> Completion {
        let was_won = self.completed.is_full();
        let newly_completed = self.completed.insert(index);
        let won_now = newly_completed && !was_won && self.completed.is_full();
        if newly_completed {
            info!(
                category = %index,
                completed = self.completed.len(),
                "category completed"
            );
        }
        Completion {
            index,
            newly_completed,
            won_now,
        }
    }

    /// Like `mark_completed`, for an unchecked index.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::InvalidArgument` if `raw` is not a valid category index.
    pub fn mark_completed_raw(&mut self, raw: usize) -> Result<Completion, TrackerError> {
        let index = CategoryIndex::try_from(raw)?;
        Ok(self.mark_completed(index))
    }

    #[must_use]
    pub fn is_completed(&self, index: CategoryIndex) -> bool {
        self.completed.contains(index)
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.completed.is_full()
    }

    pub fn reset(&mut self) {
        self.completed.clear();
        debug!("progress reset");
    }

    /// Returns a summary of progress with one slot per catalog entry.
    #[must_use]
    pub fn progress(&self, catalog: &CategoryCatalog) -> ProgressView {
        let slots = catalog
            .iter()
            .map(|(index, category)| CategorySlot {
                index,
                face: DiceFace::from(index),
                name: category.name().to_owned(),
                image: category.image().to_owned(),
                accent: category.accent(),
                completed: self.completed.contains(index),
            })
            .collect();
        let completed = self.completed.len();
        ProgressView {
            total: CATEGORY_COUNT,
            completed,
            remaining: self.completed.remaining().len(),
            is_won: self.is_won(),
            slots,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
