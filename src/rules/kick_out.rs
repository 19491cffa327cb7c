//! Kick-out rule: landing on an occupied cell sends the occupant home.

use super::{Rule, RuleContext, RuleKind};
use crate::board::START_CELL;
use crate::core::PlayerId;
use crate::engine::GameEvent;

/// Evicts anyone else standing on the acting player's final cell.
///
/// The engine already evicts while updating positions; this rule checks
/// player positions directly so a stale occupant can never survive the turn.
/// Never grants a repeat turn.
#[derive(Clone, Copy, Debug, Default)]
pub struct KickOutRule;

impl Rule for KickOutRule {
    fn name(&self) -> &'static str {
        "kick-out"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Movement
    }

    fn evaluate(&mut self, ctx: &mut RuleContext<'_>) -> bool {
        let cell = ctx.position();
        if cell == START_CELL {
            return false;
        }

        let occupants: Vec<PlayerId> = ctx
            .players
            .iter()
            .filter(|(id, p)| *id != ctx.player && p.position == cell)
            .map(|(id, _)| id)
            .collect();

        for occupant in occupants {
            let from = ctx.send_to_start(occupant);
            let by = ctx.player;
            ctx.emit(GameEvent::Evicted {
                player: occupant,
                by,
                from,
            });
        }

        if ctx.positions.occupant(cell) != Some(ctx.player) {
            let _ = ctx.positions.place(cell, ctx.player);
        }
        false
    }
}
