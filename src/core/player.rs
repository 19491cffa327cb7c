//! Player identification, per-player storage and the player roster.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based in roster order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## Player
//!
//! Identity plus the one piece of mutable state a racer has: its cell.
//! Humans are driven by an operator, automated players by a `Strategy`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::config::GameConfig;
use super::rng::GameRng;
use crate::board::START_CELL;
use crate::dice::{DiceSpec, RollSet};

/// Seat identifier for a player.
///
/// Player indices are 0-based: the first seated player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ladder_race::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use ladder_race::core::{PlayerId, PlayerMap};
///
/// let mut streaks: PlayerMap<u32> = PlayerMap::with_value(3, 0);
/// streaks[PlayerId::new(1)] += 1;
/// assert_eq!(streaks[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Build a map from values already in seat order.
    #[must_use]
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's data, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// How an automated player chooses its dice faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Every face drawn uniformly from `[1, faces]`.
    #[default]
    UniformRandom,
}

impl Strategy {
    /// Produce a full roll set for one turn.
    pub fn roll(self, rng: &mut GameRng, spec: DiceSpec) -> RollSet {
        match self {
            Strategy::UniformRandom => {
                let faces: SmallVec<[u8; 4]> = (0..spec.count)
                    .map(|_| rng.gen_face(spec.faces))
                    .collect();
                RollSet::from_faces(faces)
            }
        }
    }
}

/// Who drives a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Dice faces supplied by a human operator.
    Human,
    /// Dice faces chosen by a strategy.
    Automated(Strategy),
}

/// A racer on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current cell, starting at 1.
    pub position: u32,
    /// Human or automated.
    pub kind: PlayerKind,
}

impl Player {
    /// Create a human player on the start cell.
    pub fn human(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: START_CELL,
            kind: PlayerKind::Human,
        }
    }

    /// Create an automated player on the start cell.
    pub fn automated(id: PlayerId, name: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            id,
            name: name.into(),
            position: START_CELL,
            kind: PlayerKind::Automated(strategy),
        }
    }

    /// Is this player driven by a strategy rather than an operator?
    #[must_use]
    pub fn is_automated(&self) -> bool {
        matches!(self.kind, PlayerKind::Automated(_))
    }

    /// Seat the players described by a configuration.
    ///
    /// Humans come first (`Human1..`), then automated players (`Bot1..`).
    /// The configuration is assumed to be validated.
    #[must_use]
    pub fn roster(config: &GameConfig) -> PlayerMap<Player> {
        let humans = config.human_count.min(config.player_count);
        PlayerMap::new(config.player_count, |id| {
            if id.index() < humans {
                Player::human(id, format!("Human{}", id.index() + 1))
            } else {
                let bot_number = id.index() - humans + 1;
                Player::automated(id, format!("Bot{bot_number}"), Strategy::UniformRandom)
            }
        })
    }
}
