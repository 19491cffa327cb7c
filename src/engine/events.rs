//! Narration events and the sinks that receive them.
//!
//! The engine and its rules describe what happens as a one-way stream of
//! `GameEvent`s. Sinks never answer back.

use tracing::{debug, info};

use crate::board::EntityKind;
use crate::core::{Player, PlayerId, PlayerMap};
use crate::dice::RollSet;

/// Something worth telling the table about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A player begins a turn.
    TurnStarted { player: PlayerId, turn: u32 },
    /// Dice came up.
    Rolled { player: PlayerId, rolls: RollSet },
    /// The roll would pass the winning cell; the player stays put.
    Overshoot { player: PlayerId, position: u32, candidate: u32 },
    /// A shortcut or setback moved the player.
    EntityTriggered { player: PlayerId, kind: EntityKind, from: u32, to: u32 },
    /// The player's final cell for this move.
    Landed { player: PlayerId, cell: u32 },
    /// Someone was knocked back to the start.
    Evicted { player: PlayerId, by: PlayerId, from: u32 },
    /// A max-face turn extended a player's streak.
    StreakAdvanced { player: PlayerId, streak: u32 },
    /// The streak ran too long; back to the start.
    PenaltyApplied { player: PlayerId, from: u32 },
    /// The player acts again.
    RepeatTurnGranted { player: PlayerId },
    /// A max face was rolled but the penalty cancelled the repeat turn.
    RepeatTurnDenied { player: PlayerId },
    /// The turn is over.
    TurnEnded { player: PlayerId, repeat_turn: bool },
    /// The player reached the winning cell.
    Won { player: PlayerId, turns: u32 },
}

/// Receives narration.
pub trait EventSink {
    /// Handle one event. `players` reflects the state after the event.
    fn emit(&mut self, event: &GameEvent, players: &PlayerMap<Player>);
}

/// Drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &GameEvent, _players: &PlayerMap<Player>) {}
}

/// Keeps every event, for inspection in tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    events: Vec<GameEvent>,
}

impl RecordingSink {
    /// Empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the sink empty.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &GameEvent, _players: &PlayerMap<Player>) {
        self.events.push(event.clone());
    }
}

/// Narrates the race through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl TracingSink {
    /// New sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn name_of(players: &PlayerMap<Player>, id: PlayerId) -> &str {
    players.get(id).map_or("unknown", |p| p.name.as_str())
}

impl EventSink for TracingSink {
    fn emit(&mut self, event: &GameEvent, players: &PlayerMap<Player>) {
        match event {
            GameEvent::TurnStarted { player, turn } => {
                info!(turn, "{}'s turn", name_of(players, *player));
            }
            GameEvent::Rolled { player, rolls } => {
                info!(sum = rolls.sum(), "{} rolled {}", name_of(players, *player), rolls);
            }
            GameEvent::Overshoot { player, position, candidate } => {
                info!(
                    candidate,
                    "{} overshoots, staying at {}",
                    name_of(players, *player),
                    position
                );
            }
            GameEvent::EntityTriggered { kind: EntityKind::Shortcut, from, to, .. } => {
                info!("Great! Found a ladder at {from}, climbing up to {to}");
            }
            GameEvent::EntityTriggered { kind: EntityKind::Setback, from, to, .. } => {
                info!("Oops! Hit a snake at {from}, sliding down to {to}");
            }
            GameEvent::Landed { player, cell } => {
                info!("{} is now at {}", name_of(players, *player), cell);
            }
            GameEvent::Evicted { player, by, from } => {
                info!(
                    "{} knocked {} off {} back to the start",
                    name_of(players, *by),
                    name_of(players, *player),
                    from
                );
            }
            GameEvent::StreakAdvanced { player, streak } => {
                info!(
                    "{} has rolled the top face {} turn(s) in a row",
                    name_of(players, *player),
                    streak
                );
            }
            GameEvent::PenaltyApplied { player, from } => {
                info!(
                    "{} rolled the top face too often! Sent back from {} to the start",
                    name_of(players, *player),
                    from
                );
            }
            GameEvent::RepeatTurnGranted { player } => {
                info!("{} gets another turn!", name_of(players, *player));
            }
            GameEvent::RepeatTurnDenied { player } => {
                info!("{} loses the extra turn to the penalty", name_of(players, *player));
            }
            GameEvent::TurnEnded { .. } => {
                for (_, p) in players.iter() {
                    debug!(position = p.position, "{} standing", p.name);
                }
            }
            GameEvent::Won { player, turns } => {
                info!(turns, "{} wins the game!", name_of(players, *player));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Strategy;

    #[test]
    fn test_recording_sink_keeps_order() {
        let players = PlayerMap::new(2, |id| Player::automated(id, "bot", Strategy::UniformRandom));
        let mut sink = RecordingSink::new();
        let p0 = PlayerId::new(0);

        sink.emit(&GameEvent::TurnStarted { player: p0, turn: 1 }, &players);
        sink.emit(&GameEvent::Landed { player: p0, cell: 5 }, &players);

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.events()[1], GameEvent::Landed { player: p0, cell: 5 });

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_name_lookup_falls_back() {
        let players = PlayerMap::new(1, |id| Player::human(id, "Human1"));
        assert_eq!(name_of(&players, PlayerId::new(0)), "Human1");
        assert_eq!(name_of(&players, PlayerId::new(4)), "unknown");
    }
}
