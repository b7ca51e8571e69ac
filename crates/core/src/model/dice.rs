//! Static lookup between categories and the faces of the dice.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::model::ids::CategoryIndex;

/// Euler angles in radians (x, y, z).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn offset(self, by: Orientation) -> Self {
        Self::new(self.x + by.x, self.y + by.y, self.z + by.z)
    }
}

/// Resting tilt applied after the dice settles so the top face reads better.
pub const RESTING_TILT: Orientation = Orientation::new(-0.21, 0.17, 0.0);

// Indexed by face - 1.
const FACE_TARGETS: [Orientation; 6] = [
    Orientation::new(-FRAC_PI_2, 0.0, 0.0),
    Orientation::new(0.0, 0.0, FRAC_PI_2),
    Orientation::new(FRAC_PI_2, 0.0, 0.0),
    Orientation::new(0.0, 0.0, -FRAC_PI_2),
    Orientation::new(0.0, 0.0, 0.0),
    Orientation::new(PI, 0.0, 0.0),
];

/// Cube side a face texture is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CubeSide {
    Front,
    Right,
    Back,
    Left,
    Top,
    Bottom,
}

const FACE_SIDES: [CubeSide; 6] = [
    CubeSide::Front,
    CubeSide::Right,
    CubeSide::Back,
    CubeSide::Left,
    CubeSide::Top,
    CubeSide::Bottom,
];

/// A numbered face of the dice (1..=6). Face `n` shows category `n - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiceFace(u8);

impl DiceFace {
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        (1..=6).contains(&number).then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn category(self) -> CategoryIndex {
        CategoryIndex(self.0 - 1)
    }

    /// Orientation that brings this face to the top, before the resting tilt.
    #[must_use]
    pub fn target(self) -> Orientation {
        FACE_TARGETS[usize::from(self.0 - 1)]
    }

    /// Final orientation including `RESTING_TILT`.
    #[must_use]
    pub fn resting(self) -> Orientation {
        self.target().offset(RESTING_TILT)
    }

    #[must_use]
    pub fn side(self) -> CubeSide {
        FACE_SIDES[usize::from(self.0 - 1)]
    }
}

impl From<CategoryIndex> for DiceFace {
    fn from(index: CategoryIndex) -> Self {
        Self(index.value() + 1)
    }
}

impl fmt::Display for DiceFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_and_category_round_trip() {
        for index in CategoryIndex::all() {
            let face = DiceFace::from(index);
            assert_eq!(face.number(), index.value() + 1);
            assert_eq!(face.category(), index);
        }
    }

    #[test]
    fn rejects_face_numbers_outside_one_to_six() {
        assert!(DiceFace::from_number(0).is_none());
        assert!(DiceFace::from_number(7).is_none());
        assert_eq!(DiceFace::from_number(6).map(DiceFace::side), Some(CubeSide::Bottom));
    }

    #[test]
    fn top_face_needs_no_rotation() {
        let five = DiceFace::from_number(5).unwrap();
        assert_eq!(five.side(), CubeSide::Top);
        assert_eq!(five.target(), Orientation::new(0.0, 0.0, 0.0));
        assert_eq!(five.resting(), RESTING_TILT);
    }
}
