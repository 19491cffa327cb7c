//! The turn engine.
//!
//! A single-threaded state machine over a queue of players:
//!
//! ```text
//! AwaitingTurn(p) --roll--> Resolving(p, rolls) --rules--> AwaitingTurn(next)
//!                                                   \----> Concluded(winner)
//! ```
//!
//! ## One turn
//!
//! 1. Pop the front of the queue and roll for that player.
//! 2. `candidate = position + sum(rolls)`.
//! 3. Past the winning cell: stay put, run only the repeat-turn rules.
//! 4. Otherwise resolve the candidate through the board (one hop), move the
//!    player (evicting any occupant), then run the full rule chain.
//! 5. On the winning cell the game is over. Otherwise requeue the player at
//!    the front for a repeat turn, else at the back.

use std::collections::VecDeque;

use tracing::debug;

use super::events::{EventSink, GameEvent};
use super::position::PositionIndex;
use crate::board::{Board, Entity, EntityGenerator};
use crate::core::{ConfigError, GameConfig, GameRng, Player, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
use crate::dice::{DiceSource, DiceSpec, RollSet};
use crate::rules::{RoundContext, RuleChain, RuleContext, RuleKind, DEFAULT_PENALTY_STREAK};

/// Where the engine is in the turn cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for `player` to act.
    AwaitingTurn(PlayerId),
    /// `player` has rolled; the move is being resolved.
    Resolving { player: PlayerId, rolls: RollSet },
    /// The race is over.
    Concluded(PlayerId),
}

/// What happened during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// 1-based turn counter across the whole game.
    pub turn: u32,
    /// Who acted.
    pub player: PlayerId,
    /// Faces rolled.
    pub rolls: RollSet,
    /// Cell before the roll.
    pub from: u32,
    /// `from + sum(rolls)`.
    pub candidate: u32,
    /// Cell after the turn, penalties included.
    pub to: u32,
    /// The candidate passed the winning cell.
    pub overshoot: bool,
    /// Entity triggered on the candidate cell.
    pub triggered: Option<Entity>,
    /// Player knocked back to the start by this move.
    pub evicted: Option<PlayerId>,
    /// The player acts again.
    pub repeat_turn: bool,
    /// The player won.
    pub won: bool,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// The first player to land exactly on the winning cell.
    pub winner: PlayerId,
    /// Turns played, repeat turns included.
    pub turns: u32,
}

/// Runs a race from setup to winner.
#[derive(Debug)]
pub struct TurnEngine<D, S> {
    board: Board,
    dice_spec: DiceSpec,
    players: PlayerMap<Player>,
    positions: PositionIndex,
    queue: VecDeque<PlayerId>,
    rules: RuleChain,
    dice: D,
    sink: S,
    phase: TurnPhase,
    turns: u32,
}

impl<D: DiceSource, S: EventSink> TurnEngine<D, S> {
    /// Engine over a prepared board and roster, with the standard rules.
    ///
    /// Players are queued in seat order. Players not on the start cell are
    /// placed as if they had moved there, later seats evicting earlier ones.
    pub fn new(
        board: Board,
        players: PlayerMap<Player>,
        dice_spec: DiceSpec,
        dice: D,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let count = players.player_count();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count));
        }

        let queue: VecDeque<PlayerId> = players.player_ids().collect();
        let mut engine = Self {
            board,
            dice_spec,
            players,
            positions: PositionIndex::new(),
            queue,
            rules: RuleChain::standard(DEFAULT_PENALTY_STREAK),
            dice,
            sink,
            phase: TurnPhase::AwaitingTurn(PlayerId::new(0)),
            turns: 0,
        };

        for id in PlayerId::all(count) {
            let cell = engine.players[id].position;
            engine.players[id].position = crate::board::START_CELL;
            engine.place_player(id, cell);
        }
        Ok(engine)
    }

    /// Validate `config`, generate a board and seat the roster.
    pub fn from_config(config: &GameConfig, dice: D, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = Board::new(config.board_size);
        let mut board_rng = GameRng::new(config.seed).for_context("board");
        EntityGenerator::new()
            .with_max_attempts(config.placement_attempts)
            .populate(&mut board, &mut board_rng);

        let engine = Self::new(board, Player::roster(config), config.dice(), dice, sink)?;
        Ok(engine.with_rules(RuleChain::standard(config.penalty_streak)))
    }

    /// Replace the rule chain (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: RuleChain) -> Self {
        self.rules = rules;
        self
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Dice rolled each turn.
    pub fn dice_spec(&self) -> DiceSpec {
        self.dice_spec
    }

    /// All players.
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// One player.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Occupied cells.
    pub fn positions(&self) -> &PositionIndex {
        &self.positions
    }

    /// Turn order, next to act first.
    pub fn queue(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.queue.iter().copied()
    }

    /// The rule chain.
    pub fn rules(&self) -> &RuleChain {
        &self.rules
    }

    /// Current phase.
    pub fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Turns played so far.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// The winner, once there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::Concluded(winner) => Some(winner),
            _ => None,
        }
    }

    /// The result, once the game is over.
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.winner().map(|winner| GameOutcome {
            winner,
            turns: self.turns,
        })
    }

    /// The narration sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The narration sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The dice source.
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Put `player` on `cell`, evicting any occupant to the start cell.
    ///
    /// Returns the evicted player. Intended for scenario setup; turns move
    /// players through the same path.
    pub fn place_player(&mut self, player: PlayerId, cell: u32) -> Option<PlayerId> {
        let old = self.players[player].position;
        self.positions.vacate(old, player);

        let evicted = self
            .positions
            .occupant(cell)
            .filter(|&occupant| occupant != player);
        if let Some(occupant) = evicted {
            let from = self.positions.send_to_start(&mut self.players, occupant);
            self.emit(GameEvent::Evicted {
                player: occupant,
                by: player,
                from,
            });
        }

        self.players[player].position = cell;
        let _ = self.positions.place(cell, player);
        evicted
    }

    /// Resolve one full turn. Returns `None` once the game is over.
    pub fn step(&mut self) -> Option<TurnReport> {
        if matches!(self.phase, TurnPhase::Concluded(_)) {
            return None;
        }
        let player = self.queue.pop_front()?;
        self.phase = TurnPhase::AwaitingTurn(player);
        self.turns += 1;
        let turn = self.turns;
        self.emit(GameEvent::TurnStarted { player, turn });

        let rolls = self.dice.roll_set(&self.players[player], self.dice_spec);
        self.emit(GameEvent::Rolled {
            player,
            rolls: rolls.clone(),
        });
        self.phase = TurnPhase::Resolving {
            player,
            rolls: rolls.clone(),
        };

        let from = self.players[player].position;
        let candidate = from + rolls.sum();
        let winning_cell = self.board.winning_cell();
        let mut round = RoundContext::new();
        let mut report = TurnReport {
            turn,
            player,
            rolls: rolls.clone(),
            from,
            candidate,
            to: from,
            overshoot: false,
            triggered: None,
            evicted: None,
            repeat_turn: false,
            won: false,
        };

        report.repeat_turn = if candidate > winning_cell {
            report.overshoot = true;
            self.emit(GameEvent::Overshoot {
                player,
                position: from,
                candidate,
            });
            self.evaluate_rules(player, &rolls, &mut round, Some(RuleKind::RepeatTurn))
        } else {
            let landing = self.board.resolve(candidate);
            report.triggered = self.board.entity_at(candidate).copied();
            if let Some(entity) = report.triggered {
                self.emit(GameEvent::EntityTriggered {
                    player,
                    kind: entity.kind(),
                    from: candidate,
                    to: landing,
                });
            }
            report.evicted = self.place_player(player, landing);
            self.emit(GameEvent::Landed {
                player,
                cell: landing,
            });
            self.evaluate_rules(player, &rolls, &mut round, None)
        };
        round.clear();

        report.to = self.players[player].position;
        debug!(
            turn,
            %player,
            from,
            candidate,
            to = report.to,
            repeat_turn = report.repeat_turn,
            "turn resolved"
        );

        if report.to == winning_cell {
            report.won = true;
            self.phase = TurnPhase::Concluded(player);
            self.emit(GameEvent::Won { player, turns: turn });
            return Some(report);
        }

        if report.repeat_turn {
            self.queue.push_front(player);
        } else {
            self.queue.push_back(player);
        }
        self.emit(GameEvent::TurnEnded {
            player,
            repeat_turn: report.repeat_turn,
        });
        if let Some(&next) = self.queue.front() {
            self.phase = TurnPhase::AwaitingTurn(next);
        }
        Some(report)
    }

    /// Play until someone wins.
    ///
    /// Automated dice always finish eventually; with scripted or operator
    /// dice this runs for as long as the input keeps the race going.
    pub fn play(&mut self) -> Option<GameOutcome> {
        while self.step().is_some() {}
        self.outcome()
    }

    /// Play at most `max_turns` more turns. `None` if nobody has won by then.
    pub fn play_with_limit(&mut self, max_turns: u32) -> Option<GameOutcome> {
        for _ in 0..max_turns {
            if self.step().is_none() {
                break;
            }
        }
        self.outcome()
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.emit(&event, &self.players);
    }

    fn evaluate_rules(
        &mut self,
        player: PlayerId,
        rolls: &RollSet,
        round: &mut RoundContext,
        only: Option<RuleKind>,
    ) -> bool {
        let mut ctx = RuleContext {
            player,
            rolls,
            dice: self.dice_spec,
            board: &self.board,
            players: &mut self.players,
            positions: &mut self.positions,
            round,
            events: &mut self.sink,
        };
        match only {
            Some(kind) => self.rules.evaluate_kind(kind, &mut ctx),
            None => self.rules.evaluate(&mut ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_CELL;
    use crate::core::Strategy;
    use crate::dice::ScriptedDice;
    use crate::engine::RecordingSink;

    fn engine(
        board: Board,
        player_count: usize,
        rolls: impl IntoIterator<Item = u8>,
    ) -> TurnEngine<ScriptedDice, RecordingSink> {
        let players = PlayerMap::new(player_count, |id| {
            Player::automated(id, format!("Bot{}", id.index() + 1), Strategy::UniformRandom)
        });
        TurnEngine::new(
            board,
            players,
            DiceSpec::new(1, 6),
            ScriptedDice::single(rolls),
            RecordingSink::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_roster_size() {
        let players = PlayerMap::new(1, |id| Player::human(id, "solo"));
        let result = TurnEngine::new(
            Board::new(10),
            players,
            DiceSpec::default(),
            ScriptedDice::single([]),
            RecordingSink::new(),
        );
        assert_eq!(result.err(), Some(ConfigError::PlayerCount(1)));
    }

    #[test]
    fn test_normal_turn_goes_to_back() {
        let mut engine = engine(Board::new(10), 3, [4]);
        let report = engine.step().unwrap();

        assert_eq!(report.turn, 1);
        assert_eq!(report.to, 5);
        assert!(!report.repeat_turn);
        assert_eq!(
            engine.queue().collect::<Vec<_>>(),
            vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]
        );
        assert_eq!(engine.phase(), &TurnPhase::AwaitingTurn(PlayerId::new(1)));
    }

    #[test]
    fn test_max_face_goes_to_front() {
        let mut engine = engine(Board::new(10), 2, [6]);
        let report = engine.step().unwrap();

        assert!(report.repeat_turn);
        assert_eq!(engine.queue().next(), Some(PlayerId::new(0)));
        assert_eq!(engine.positions().occupant(7), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_exact_landing_wins() {
        let mut engine = engine(Board::new(10), 2, [4]);
        engine.place_player(PlayerId::new(0), 96);

        let report = engine.step().unwrap();
        assert!(report.won);
        assert_eq!(engine.winner(), Some(PlayerId::new(0)));
        assert_eq!(
            engine.outcome(),
            Some(GameOutcome { winner: PlayerId::new(0), turns: 1 })
        );
        assert!(engine.step().is_none());
    }

    #[test]
    fn test_setup_positions_are_indexed() {
        let players = PlayerMap::new(2, |id| {
            let mut p = Player::automated(id, "bot", Strategy::UniformRandom);
            p.position = 10 + id.index() as u32;
            p
        });
        let engine = TurnEngine::new(
            Board::new(10),
            players,
            DiceSpec::default(),
            ScriptedDice::single([]),
            RecordingSink::new(),
        )
        .unwrap();

        assert_eq!(engine.positions().occupant(10), Some(PlayerId::new(0)));
        assert_eq!(engine.positions().occupant(11), Some(PlayerId::new(1)));
        assert!(engine.positions().is_consistent_with(engine.players()));
    }

    #[test]
    fn test_place_player_evicts() {
        let mut engine = engine(Board::new(10), 2, []);
        engine.place_player(PlayerId::new(0), 30);

        let evicted = engine.place_player(PlayerId::new(1), 30);
        assert_eq!(evicted, Some(PlayerId::new(0)));
        assert_eq!(engine.player(PlayerId::new(0)).unwrap().position, START_CELL);
        assert!(engine.positions().is_consistent_with(engine.players()));
    }
}
