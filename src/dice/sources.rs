//! Concrete dice sources.

use std::collections::VecDeque;

use super::{DiceSource, DiceSpec, RollSet};
use crate::core::{GameRng, Player, PlayerKind, Strategy};

/// Uniformly random dice for every player.
#[derive(Clone, Debug)]
pub struct RandomDice {
    rng: GameRng,
}

impl RandomDice {
    /// Dice drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Dice on the "dice" stream of `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed).for_context("dice"))
    }

    /// One uniform roll set.
    pub fn roll(&mut self, spec: DiceSpec) -> RollSet {
        Strategy::UniformRandom.roll(&mut self.rng, spec)
    }
}

impl DiceSource for RandomDice {
    fn roll_set(&mut self, _player: &Player, spec: DiceSpec) -> RollSet {
        self.roll(spec)
    }
}

/// Predetermined roll sets, handed out in order regardless of player.
///
/// Once the script runs out, rolls fall back to uniform random dice.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<RollSet>,
    fallback: RandomDice,
}

impl ScriptedDice {
    /// Script the given roll sets.
    pub fn new<I, R>(rolls: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RollSet>,
    {
        Self {
            script: rolls.into_iter().map(Into::into).collect(),
            fallback: RandomDice::from_seed(0),
        }
    }

    /// Script single-die turns, one face per turn.
    pub fn single(faces: impl IntoIterator<Item = u8>) -> Self {
        Self::new(faces.into_iter().map(|f| RollSet::from_slice(&[f])))
    }

    /// Append a roll set to the script.
    pub fn push(&mut self, rolls: impl Into<RollSet>) {
        self.script.push_back(rolls.into());
    }

    /// Roll sets left in the script.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_set(&mut self, _player: &Player, spec: DiceSpec) -> RollSet {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.roll(spec))
    }
}

/// Reads dice faces for a human player.
///
/// Implementations handle malformed input themselves (re-prompting) and
/// always return a valid roll set.
pub trait OperatorInput {
    /// Ask the operator for `player`'s faces.
    fn read_roll(&mut self, player: &Player, spec: DiceSpec) -> RollSet;
}

/// Dice at a mixed table: humans ask their operator, automated players
/// follow their strategy.
#[derive(Debug)]
pub struct SeatedDice<I> {
    rng: GameRng,
    operator: I,
}

impl<I: OperatorInput> SeatedDice<I> {
    /// Seat an operator next to an RNG for the automated players.
    pub fn new(rng: GameRng, operator: I) -> Self {
        Self { rng, operator }
    }

    /// The operator input.
    pub fn operator(&self) -> &I {
        &self.operator
    }
}

impl<I: OperatorInput> DiceSource for SeatedDice<I> {
    fn roll_set(&mut self, player: &Player, spec: DiceSpec) -> RollSet {
        match player.kind {
            PlayerKind::Human => self.operator.read_roll(player, spec),
            PlayerKind::Automated(strategy) => strategy.roll(&mut self.rng, spec),
        }
    }
}
