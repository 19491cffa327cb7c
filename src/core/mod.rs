//! Core types: players, RNG, configuration, errors.
//!
//! These are shared by every other module and know nothing about the
//! board layout or rule evaluation.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{Player, PlayerId, PlayerKind, PlayerMap, Strategy};
pub use rng::GameRng;
pub use config::{GameConfig, MAX_BOARD_SIZE, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{BoardError, ConfigError, InputError};
