//! Escalating-roll penalty.
//!
//! Rolling the highest face is rewarded with a repeat turn, but doing it
//! too many turns in a row sends the player back to the start and cancels
//! the repeat turn it would otherwise earn.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::{Rule, RuleContext, RuleKind};
use crate::core::PlayerId;
use crate::engine::GameEvent;

/// Consecutive max-face turns that trigger the penalty by default.
pub const DEFAULT_PENALTY_STREAK: u32 = 3;

/// Tracks each player's run of max-face turns.
#[derive(Clone, Debug)]
pub struct EscalatingRollPenaltyRule {
    threshold: u32,
    streaks: FxHashMap<PlayerId, u32>,
}

impl Default for EscalatingRollPenaltyRule {
    fn default() -> Self {
        Self::new(DEFAULT_PENALTY_STREAK)
    }
}

impl EscalatingRollPenaltyRule {
    /// Penalise after `threshold` consecutive max-face turns.
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            streaks: FxHashMap::default(),
        }
    }

    /// Streak length that triggers the penalty.
    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Current run of max-face turns for `player`.
    #[must_use]
    pub fn streak(&self, player: PlayerId) -> u32 {
        self.streaks.get(&player).copied().unwrap_or(0)
    }
}

impl Rule for EscalatingRollPenaltyRule {
    fn name(&self) -> &'static str {
        "escalating-roll-penalty"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Penalty
    }

    fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        let player = ctx.player;
        if !ctx.rolled_max_face() {
            self.streaks.insert(player, 0);
            return false;
        }

        let streak = self.streaks.entry(player).or_insert(0);
        *streak += 1;
        let current = *streak;
        ctx.emit(GameEvent::StreakAdvanced {
            player,
            streak: current,
        });

        if current >= self.threshold {
            self.streaks.insert(player, 0);
            let from = ctx.send_to_start(player);
            ctx.round.deny_repeat_turn(player);
            debug!(%player, from, streak = current, "escalating-roll penalty applied");
            ctx.emit(GameEvent::PenaltyApplied { player, from });
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_CELL;
    use crate::dice::RollSet;
    use crate::rules::fixture::Table;

    #[test]
    fn test_streak_resets_without_max_face() {
        let mut rule = EscalatingRollPenaltyRule::default();
        let mut table = Table::new(2);
        let p0 = PlayerId::new(0);
        let six = RollSet::from_slice(&[6]);
        let three = RollSet::from_slice(&[3]);

        rule.evaluate(&mut table.ctx(p0, &six));
        rule.evaluate(&mut table.ctx(p0, &six));
        assert_eq!(rule.streak(p0), 2);

        rule.evaluate(&mut table.ctx(p0, &three));
        assert_eq!(rule.streak(p0), 0);
        assert!(!table.round.is_repeat_turn_denied(p0));
    }

    #[test]
    fn test_third_max_face_sends_home() {
        let mut rule = EscalatingRollPenaltyRule::default();
        let mut table = Table::new(2);
        let p0 = PlayerId::new(0);
        let six = RollSet::from_slice(&[6]);

        table.seat(p0, 7);
        assert!(!rule.evaluate(&mut table.ctx(p0, &six)));
        table.seat(p0, 13);
        assert!(!rule.evaluate(&mut table.ctx(p0, &six)));
        table.seat(p0, 19);
        assert!(!rule.evaluate(&mut table.ctx(p0, &six)));

        assert_eq!(table.players[p0].position, START_CELL);
        assert_eq!(table.positions.occupant(19), None);
        assert_eq!(rule.streak(p0), 0);
        assert!(table.round.is_repeat_turn_denied(p0));
        assert!(table
            .sink
            .events()
            .contains(&GameEvent::PenaltyApplied { player: p0, from: 19 }));
    }

    #[test]
    fn test_streaks_are_per_player() {
        let mut rule = EscalatingRollPenaltyRule::new(2);
        let mut table = Table::new(2);
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));
        let six = RollSet::from_slice(&[6]);

        rule.evaluate(&mut table.ctx(a, &six));
        rule.evaluate(&mut table.ctx(b, &six));

        assert_eq!(rule.streak(a), 1);
        assert_eq!(rule.streak(b), 1);
        assert!(!table.round.is_repeat_turn_denied(a));
    }

    #[test]
    fn test_any_die_showing_max_counts() {
        let mut rule = EscalatingRollPenaltyRule::default();
        let mut table = Table::new(2);
        let p0 = PlayerId::new(0);
        let mixed = RollSet::from_slice(&[2, 6]);

        rule.evaluate(&mut table.ctx(p0, &mixed));
        assert_eq!(rule.streak(p0), 1);
    }
}
