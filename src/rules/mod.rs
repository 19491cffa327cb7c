//! Turn rules evaluated after a player moves.
//!
//! Each rule inspects the outcome of a turn and answers one question: does
//! this player act again? Rules may also move players (eviction, penalty)
//! through the shared `PositionIndex`.
//!
//! Rules talk to each other only through the `RoundContext` the engine
//! passes in. It lives for one turn: the escalating-roll penalty marks a
//! player there and the repeat-turn rule reads the mark.
//!
//! Order matters and is fixed by `RuleChain::standard`:
//!
//! 1. `ExactWinRule`
//! 2. `KickOutRule`
//! 3. `EscalatingRollPenaltyRule` (must precede the repeat-turn rule)
//! 4. `RepeatTurnRule`

pub mod chain;
pub mod exact_win;
pub mod kick_out;
pub mod penalty;
pub mod repeat_turn;

use rustc_hash::FxHashSet;

use crate::board::Board;
use crate::core::{Player, PlayerId, PlayerMap};
use crate::dice::{DiceSpec, RollSet};
use crate::engine::{EventSink, GameEvent, PositionIndex};

pub use chain::RuleChain;
pub use exact_win::ExactWinRule;
pub use kick_out::KickOutRule;
pub use penalty::{EscalatingRollPenaltyRule, DEFAULT_PENALTY_STREAK};
pub use repeat_turn::RepeatTurnRule;

/// What a rule is for. Overshoot turns only run `RepeatTurn` rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Checks only, no side effects.
    Validation,
    /// Moves players after landing.
    Movement,
    /// Punishes roll patterns.
    Penalty,
    /// Decides whether the player acts again.
    RepeatTurn,
}

/// Per-turn scratch state shared by the rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundContext {
    denied_repeat_turn: FxHashSet<PlayerId>,
}

impl RoundContext {
    /// Fresh context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bar `player` from a repeat turn this round.
    pub fn deny_repeat_turn(&mut self, player: PlayerId) {
        self.denied_repeat_turn.insert(player);
    }

    /// Was `player` barred from a repeat turn this round?
    #[must_use]
    pub fn is_repeat_turn_denied(&self, player: PlayerId) -> bool {
        self.denied_repeat_turn.contains(&player)
    }

    /// Forget everything; called between rounds.
    pub fn clear(&mut self) {
        self.denied_repeat_turn.clear();
    }
}

/// Everything a rule may read or touch during one turn.
///
/// Rolls, dice and board are read-only. Players, positions and the round
/// context may be mutated.
pub struct RuleContext<'a> {
    /// The acting player.
    pub player: PlayerId,
    /// Faces rolled this turn.
    pub rolls: &'a RollSet,
    /// Dice in play; gives the maximum face.
    pub dice: DiceSpec,
    /// The board.
    pub board: &'a Board,
    /// All players.
    pub players: &'a mut PlayerMap<Player>,
    /// Occupied cells.
    pub positions: &'a mut PositionIndex,
    /// Cross-rule signals for this turn.
    pub round: &'a mut RoundContext,
    /// Narration.
    pub events: &'a mut dyn EventSink,
}

impl RuleContext<'_> {
    /// Current cell of the acting player.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.players[self.player].position
    }

    /// Did this turn's roll include the highest face?
    #[must_use]
    pub fn rolled_max_face(&self) -> bool {
        self.rolls.contains(self.dice.max_face())
    }

    /// Send a narration event.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.emit(&event, &*self.players);
    }

    /// Move `player` back to the start cell. Returns the cell it left.
    pub fn send_to_start(&mut self, player: PlayerId) -> u32 {
        self.positions.send_to_start(self.players, player)
    }
}

/// A single turn rule.
///
/// Rules never fail: any side effect must be safe to apply given the
/// invariants the engine already established.
pub trait Rule: std::fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// What the rule is for.
    fn kind(&self) -> RuleKind;

    /// Evaluate against the current turn. Returns `true` to grant a repeat turn.
    fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_context_denial() {
        let mut round = RoundContext::new();
        let p0 = PlayerId::new(0);

        assert!(!round.is_repeat_turn_denied(p0));
        round.deny_repeat_turn(p0);
        assert!(round.is_repeat_turn_denied(p0));
        assert!(!round.is_repeat_turn_denied(PlayerId::new(1)));

        round.clear();
        assert!(!round.is_repeat_turn_denied(p0));
    }
}
