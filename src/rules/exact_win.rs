//! Exact-win rule.

use super::{Rule, RuleContext, RuleKind};

/// A player must land exactly on the winning cell.
///
/// Overshooting turns never move the player (the engine handles that before
/// any rule runs), so this rule only observes. It never grants a repeat turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactWinRule;

impl Rule for ExactWinRule {
    fn name(&self) -> &'static str {
        "exact-win"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Validation
    }

    fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        debug_assert!(ctx.position() <= ctx.board.winning_cell());
        false
    }
}
