use serde::{Deserialize, Serialize};

use crate::model::category::CategoryError;
use crate::model::ids::{CATEGORY_COUNT, CategoryIndex};

/// Set of categories answered correctly, stored as a bitmask.
///
/// Only `CategoryIndex` values can be inserted, so the set never holds an
/// index outside the catalog and never grows past `CATEGORY_COUNT`.
/// Serialized as the raw mask; deserialization rejects bits 6 and 7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CompletionSet {
    bits: u8,
}

const FULL: u8 = (1 << CATEGORY_COUNT) - 1;

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `index`, returning `true` if it was not already present.
    pub fn insert(&mut self, index: CategoryIndex) -> bool {
        let mask = 1 << index.value();
        let fresh = self.bits & mask == 0;
        self.bits |= mask;
        fresh
    }

    #[must_use]
    pub fn contains(&self, index: CategoryIndex) -> bool {
        self.bits & (1 << index.value()) != 0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// True once every category is present.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.bits & FULL == FULL
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Completed categories in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CategoryIndex> + '_ {
        CategoryIndex::all().filter(|index| self.contains(*index))
    }

    /// Categories still open for a roll, in ascending order.
    #[must_use]
    pub fn remaining(&self) -> Vec<CategoryIndex> {
        CategoryIndex::all()
            .filter(|index| !self.contains(*index))
            .collect()
    }
}

impl TryFrom<u8> for CompletionSet {
    type Error = CategoryError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        if bits & !FULL != 0 {
            return Err(CategoryError::InvalidMask { bits });
        }
        Ok(Self { bits })
    }
}

impl From<CompletionSet> for u8 {
    fn from(set: CompletionSet) -> Self {
        set.bits
    }
}

impl FromIterator<CategoryIndex> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = CategoryIndex>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(raw: u8) -> CategoryIndex {
        CategoryIndex::new(raw).unwrap()
    }

    #[test]
    fn insert_is_idempotent() {
        let mut set = CompletionSet::new();
        assert!(set.insert(idx(3)));
        assert!(!set.insert(idx(3)));
        assert_eq!(set.len(), 1);
        assert!(set.contains(idx(3)));
        assert!(!set.contains(idx(2)));
    }

    #[test]
    fn never_exceeds_six_entries() {
        let mut set = CompletionSet::new();
        for round in 0..3 {
            for raw in 0..6 {
                set.insert(idx((raw + round) % 6));
                assert!(set.len() <= 6);
            }
        }
        assert_eq!(set.len(), 6);
        assert!(set.is_full());
        assert!(set.remaining().is_empty());
    }

    #[test]
    fn remaining_excludes_completed() {
        let set: CompletionSet = [idx(0), idx(2), idx(4)].into_iter().collect();
        assert_eq!(set.remaining(), vec![idx(1), idx(3), idx(5)]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![idx(0), idx(2), idx(4)]);
    }

    #[test]
    fn clear_empties_the_set() {
        let mut set: CompletionSet = CategoryIndex::all().collect();
        assert!(set.is_full());
        set.clear();
        assert!(set.is_empty());
        assert!(!set.is_full());
        assert_eq!(set.remaining().len(), 6);
    }

    #[test]
    fn mask_outside_catalog_is_rejected() {
        assert_eq!(
            CompletionSet::try_from(0b1100_0000),
            Err(CategoryError::InvalidMask { bits: 0b1100_0000 })
        );
        assert!(serde_json::from_str::<CompletionSet>("255").is_err());
        assert!(serde_json::from_str::<CompletionSet>(r#"{"bits":255}"#).is_err());
    }

    #[test]
    fn serializes_as_mask() {
        let set: CompletionSet = [idx(0), idx(5)].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "33");
        let back: CompletionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
        assert_eq!(back.len(), 2);

        let full: CompletionSet = serde_json::from_str("63").unwrap();
        assert!(full.is_full());
        assert_eq!(full.len(), CATEGORY_COUNT);
    }
}
