//! Dice: roll sets and the sources that produce them.
//!
//! The turn engine only needs a roll set per turn: its sum moves the player
//! and its raw faces decide repeat turns and penalties. Where the faces come
//! from is up to the `DiceSource`.

mod sources;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Player;

pub use sources::{OperatorInput, RandomDice, ScriptedDice, SeatedDice};

/// How many dice are rolled per turn and how many faces each has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSpec {
    /// Dice per turn.
    pub count: u8,
    /// Faces per die; also the maximum face.
    pub faces: u8,
}

impl DiceSpec {
    /// Create a dice spec.
    #[must_use]
    pub const fn new(count: u8, faces: u8) -> Self {
        Self { count, faces }
    }

    /// Highest face a die can show.
    #[must_use]
    pub const fn max_face(&self) -> u8 {
        self.faces
    }
}

impl Default for DiceSpec {
    fn default() -> Self {
        Self::new(1, 6)
    }
}

/// Faces rolled in one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollSet {
    faces: SmallVec<[u8; 4]>,
}

impl RollSet {
    /// Build from raw faces.
    #[must_use]
    pub fn from_faces(faces: SmallVec<[u8; 4]>) -> Self {
        Self { faces }
    }

    /// Build from a slice of faces.
    #[must_use]
    pub fn from_slice(faces: &[u8]) -> Self {
        Self {
            faces: SmallVec::from_slice(faces),
        }
    }

    /// Raw faces in roll order.
    #[must_use]
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }

    /// Sum of all faces.
    #[must_use]
    pub fn sum(&self) -> u32 {
        self.faces.iter().map(|&f| u32::from(f)).sum()
    }

    /// Does any die show `face`?
    #[must_use]
    pub fn contains(&self, face: u8) -> bool {
        self.faces.contains(&face)
    }

    /// Number of dice rolled.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// No dice rolled?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl From<&[u8]> for RollSet {
    fn from(faces: &[u8]) -> Self {
        Self::from_slice(faces)
    }
}

impl std::fmt::Display for RollSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{face}")?;
        }
        f.write_str("]")
    }
}

/// Produces the roll set for a player's turn.
///
/// Sources must always return a roll; they never fail mid-turn.
pub trait DiceSource {
    /// Roll `spec.count` dice for `player`.
    fn roll_set(&mut self, player: &Player, spec: DiceSpec) -> RollSet;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_set_sum_and_contains() {
        let rolls = RollSet::from_slice(&[6, 2, 3]);
        assert_eq!(rolls.sum(), 11);
        assert!(rolls.contains(6));
        assert!(!rolls.contains(5));
        assert_eq!(rolls.len(), 3);
        assert_eq!(rolls.to_string(), "[6, 2, 3]");
    }

    #[test]
    fn test_empty_roll_set() {
        let rolls = RollSet::default();
        assert!(rolls.is_empty());
        assert_eq!(rolls.sum(), 0);
        assert_eq!(rolls.to_string(), "[]");
    }
}
