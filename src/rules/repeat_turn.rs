//! Repeat-turn rule.

use super::{Rule, RuleContext, RuleKind};
use crate::engine::GameEvent;

/// Rolling the highest face earns another go, unless the penalty rule
/// barred the player this round.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepeatTurnRule;

impl Rule for RepeatTurnRule {
    fn name(&self) -> &'static str {
        "repeat-turn"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::RepeatTurn
    }

    fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        if !ctx.rolled_max_face() {
            return false;
        }

        let player = ctx.player;
        if ctx.round.is_repeat_turn_denied(player) {
            ctx.emit(GameEvent::RepeatTurnDenied { player });
            return false;
        }

        ctx.emit(GameEvent::RepeatTurnGranted { player });
        true
    }
}
