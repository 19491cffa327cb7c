//! Game configuration.
//!
//! Collected once at startup (the CLI builds one from its arguments) and
//! validated before any board or player exists.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::dice::DiceSpec;

/// Fewest players a race supports.
pub const MIN_PLAYERS: usize = 2;

/// Most players a race supports.
pub const MAX_PLAYERS: usize = 6;

/// Largest board edge; keeps `size * size` comfortably inside `u32`.
pub const MAX_BOARD_SIZE: u32 = 1000;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board edge `n`; cells are numbered `1..=n*n`.
    pub board_size: u32,

    /// Dice rolled per turn.
    pub dice_count: u8,

    /// Faces per die. The highest face triggers repeat turns and penalties.
    pub dice_faces: u8,

    /// Total players, humans included.
    pub player_count: usize,

    /// How many of the players are driven by an operator.
    pub human_count: usize,

    /// Consecutive max-face turns that send a player back to the start.
    pub penalty_streak: u32,

    /// Random attempts per entity before the generator skips it.
    pub placement_attempts: u32,

    /// Seed for board generation and automated dice.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 10,
            dice_count: 1,
            dice_faces: 6,
            player_count: 2,
            human_count: 0,
            penalty_streak: 3,
            placement_attempts: 100,
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Default configuration: 10x10 board, one six-sided die, two bots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board edge.
    #[must_use]
    pub fn with_board_size(mut self, size: u32) -> Self {
        self.board_size = size;
        self
    }

    /// Set the number of dice.
    #[must_use]
    pub fn with_dice(mut self, count: u8) -> Self {
        self.dice_count = count;
        self
    }

    /// Set the faces per die.
    #[must_use]
    pub fn with_faces(mut self, faces: u8) -> Self {
        self.dice_faces = faces;
        self
    }

    /// Set the total number of players.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set how many players are human.
    #[must_use]
    pub fn with_humans(mut self, count: usize) -> Self {
        self.human_count = count;
        self
    }

    /// Set the penalty streak length.
    #[must_use]
    pub fn with_penalty_streak(mut self, streak: u32) -> Self {
        self.penalty_streak = streak;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of automated players.
    #[must_use]
    pub fn automated_count(&self) -> usize {
        self.player_count.saturating_sub(self.human_count)
    }

    /// Dice rolled each turn.
    #[must_use]
    pub fn dice(&self) -> DiceSpec {
        DiceSpec::new(self.dice_count, self.dice_faces)
    }

    /// Check every field. Errors here are fatal and never retried.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.human_count > self.player_count {
            return Err(ConfigError::HumanCount {
                humans: self.human_count,
                players: self.player_count,
            });
        }
        if self.board_size < 2 {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.board_size > MAX_BOARD_SIZE {
            return Err(ConfigError::BoardTooLarge(self.board_size));
        }
        if self.dice_count == 0 {
            return Err(ConfigError::NoDice);
        }
        if self.dice_faces < 2 {
            return Err(ConfigError::DiceFaces(self.dice_faces));
        }
        if self.penalty_streak == 0 {
            return Err(ConfigError::PenaltyStreak);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.dice(), DiceSpec::new(1, 6));
        assert_eq!(config.automated_count(), 2);
    }

    #[test]
    fn test_player_count_bounds() {
        assert_eq!(
            GameConfig::new().with_players(1).validate(),
            Err(ConfigError::PlayerCount(1))
        );
        assert_eq!(
            GameConfig::new().with_players(7).validate(),
            Err(ConfigError::PlayerCount(7))
        );
        for count in MIN_PLAYERS..=MAX_PLAYERS {
            assert!(GameConfig::new().with_players(count).validate().is_ok());
        }
    }

    #[test]
    fn test_too_many_humans() {
        let config = GameConfig::new().with_players(3).with_humans(4);
        assert_eq!(
            config.validate(),
            Err(ConfigError::HumanCount { humans: 4, players: 3 })
        );
    }

    #[test]
    fn test_board_and_dice_checks() {
        assert_eq!(
            GameConfig::new().with_board_size(1).validate(),
            Err(ConfigError::BoardSize(1))
        );
        assert_eq!(
            GameConfig::new().with_board_size(5000).validate(),
            Err(ConfigError::BoardTooLarge(5000))
        );
        assert_eq!(GameConfig::new().with_dice(0).validate(), Err(ConfigError::NoDice));
        assert_eq!(
            GameConfig::new().with_faces(1).validate(),
            Err(ConfigError::DiceFaces(1))
        );
        assert_eq!(
            GameConfig::new().with_penalty_streak(0).validate(),
            Err(ConfigError::PenaltyStreak)
        );
    }

    #[test]
    fn test_config_serde_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"board_size": 8, "player_count": 4}"#).unwrap();

        assert_eq!(config.board_size, 8);
        assert_eq!(config.player_count, 4);
        assert_eq!(config.dice_faces, 6);
        assert_eq!(config.penalty_streak, 3);

        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
