use trivia_core::model::{Accent, CategoryIndex, DiceFace};

/// Render-ready state of one category cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlot {
    pub index: CategoryIndex,
    pub face: DiceFace,
    pub name: String,
    pub image: String,
    pub accent: Accent,
    pub completed: bool,
}

/// Aggregated view of game progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    pub is_won: bool,
    pub slots: Vec<CategorySlot>,
}
