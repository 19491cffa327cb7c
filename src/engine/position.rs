//! Which player stands on which cell.

use rustc_hash::FxHashMap;

use crate::board::START_CELL;
use crate::core::{Player, PlayerId, PlayerMap};

/// Occupied cells, at most one player per cell.
///
/// The start cell is shared by any number of players and is never recorded.
/// Callers remove a player's old cell before inserting the new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionIndex {
    cells: FxHashMap<u32, PlayerId>,
}

impl PositionIndex {
    /// Empty index: everyone on the start cell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The player on `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: u32) -> Option<PlayerId> {
        self.cells.get(&cell).copied()
    }

    /// Record `player` on `cell`. Returns whoever was recorded there before.
    ///
    /// Placing on the start cell records nothing.
    pub fn place(&mut self, cell: u32, player: PlayerId) -> Option<PlayerId> {
        if cell == START_CELL {
            return None;
        }
        self.cells.insert(cell, player).filter(|&previous| previous != player)
    }

    /// Forget `player` on `cell`. Leaves the cell alone if someone else holds it.
    pub fn vacate(&mut self, cell: u32, player: PlayerId) -> bool {
        if self.occupant(cell) == Some(player) {
            self.cells.remove(&cell);
            true
        } else {
            false
        }
    }

    /// Move `player` back to the start cell. Returns the cell it left.
    pub fn send_to_start(&mut self, players: &mut PlayerMap<Player>, player: PlayerId) -> u32 {
        let from = players[player].position;
        self.vacate(from, player);
        players[player].position = START_CELL;
        from
    }

    /// Number of recorded cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Nobody off the start cell?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// (cell, player) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, PlayerId)> + '_ {
        self.cells.iter().map(|(&cell, &player)| (cell, player))
    }

    /// Does the index agree with the players' own positions?
    ///
    /// Every player off the start cell is recorded on its cell and nothing
    /// else is recorded.
    #[must_use]
    pub fn is_consistent_with(&self, players: &PlayerMap<Player>) -> bool {
        let off_start = players
            .iter()
            .filter(|(_, p)| p.position != START_CELL)
            .count();
        off_start == self.cells.len()
            && players
                .iter()
                .filter(|(_, p)| p.position != START_CELL)
                .all(|(id, p)| self.occupant(p.position) == Some(id))
    }
}
