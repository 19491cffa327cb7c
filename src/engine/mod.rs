//! Turn resolution: the turn queue, the position index and narration.
//!
//! - `TurnEngine`: the per-turn state machine
//! - `PositionIndex`: occupied cells, one player per cell
//! - `GameEvent` / `EventSink`: one-way narration stream

pub mod events;
pub mod position;
pub mod turn;

pub use events::{EventSink, GameEvent, NullSink, RecordingSink, TracingSink};
pub use position::PositionIndex;
pub use turn::{GameOutcome, TurnEngine, TurnPhase, TurnReport};
