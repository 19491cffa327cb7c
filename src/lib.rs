//! # ladder-race
//!
//! A snakes-and-ladders race engine for 2-6 players, human or automated.
//!
//! ## Design Principles
//!
//! 1. **Safe boards**: Shortcuts and setbacks are placed at random inside
//!    fixed windows, never on the start or winning cell, never sharing a
//!    trigger cell, and never closing a cycle.
//!
//! 2. **Single-hop resolution**: Landing on a trigger moves you to its end
//!    and stops there.
//!
//! 3. **Explicit rule order**: Turn rules are an ordered list of values.
//!    Rules signal each other only through a per-turn `RoundContext`.
//!
//! 4. **Deterministic**: A seed fixes the board and every automated roll.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, errors
//! - `board`: entities, board, generator
//! - `dice`: roll sets and dice sources
//! - `rules`: the rule trait, round context and the standard rules
//! - `engine`: turn engine, position index, narration events
//! - `input`: operator-typed dice faces

pub mod core;
pub mod board;
pub mod dice;
pub mod rules;
pub mod engine;
pub mod input;

// Re-export commonly used types
pub use crate::core::{
    BoardError, ConfigError, GameConfig, GameRng, InputError, Player, PlayerId, PlayerKind,
    PlayerMap, Strategy,
};

pub use crate::board::{Board, Entity, EntityGenerator, EntityKind, GenerationReport, Placement, START_CELL};

pub use crate::dice::{DiceSource, DiceSpec, OperatorInput, RandomDice, RollSet, ScriptedDice, SeatedDice};

pub use crate::rules::{
    EscalatingRollPenaltyRule, ExactWinRule, KickOutRule, RepeatTurnRule, RoundContext, Rule,
    RuleChain, RuleContext, RuleKind,
};

pub use crate::engine::{
    EventSink, GameEvent, GameOutcome, NullSink, PositionIndex, RecordingSink, TracingSink,
    TurnEngine, TurnPhase, TurnReport,
};
