//! Error types.
//!
//! Configuration and board geometry errors are fatal at setup time.
//! Input errors come from operator-typed dice faces and are always
//! recoverable by asking again.

use thiserror::Error;

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("players must be between 2 and 6, got {0}")]
    PlayerCount(usize),
    #[error("{humans} human players requested but only {players} seats")]
    HumanCount { humans: usize, players: usize },
    #[error("board size must be at least 2, got {0}")]
    BoardSize(u32),
    #[error("board size {0} is too large")]
    BoardTooLarge(u32),
    #[error("at least one die is required")]
    NoDice,
    #[error("dice need at least 2 faces, got {0}")]
    DiceFaces(u8),
    #[error("penalty streak must be at least 1")]
    PenaltyStreak,
}

/// Entity rejected by the board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("entity {start} -> {end} cannot start or end on the start or winning cell")]
    BoundaryCell { start: u32, end: u32 },
    #[error("cell {0} already triggers another entity")]
    OccupiedTrigger(u32),
    #[error("shortcut must climb: {start} -> {end}")]
    ShortcutDirection { start: u32, end: u32 },
    #[error("setback must drop: {start} -> {end}")]
    SetbackDirection { start: u32, end: u32 },
}

/// Malformed operator input for a dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no dice values entered")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("expected {expected} dice values, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("{value} is not a face between 1 and {faces}")]
    OutOfRange { value: u32, faces: u8 },
}
