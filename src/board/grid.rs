//! The numbered race board.

use rustc_hash::FxHashMap;

use super::entity::{Entity, EntityKind};
use super::START_CELL;
use crate::core::BoardError;

/// An `n x n` board with cells `1..=n*n` and at most one entity per trigger cell.
///
/// The board is filled once during setup and only read during play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u32,
    winning_cell: u32,
    entities: FxHashMap<u32, Entity>,
}

impl Board {
    /// Create an empty board of edge `size`.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size,
            winning_cell: size * size,
            entities: FxHashMap::default(),
        }
    }

    /// Board edge `n`.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// The last cell, `n * n`. Landing here exactly wins.
    #[must_use]
    pub fn winning_cell(&self) -> u32 {
        self.winning_cell
    }

    /// Add an entity after checking it against the board.
    ///
    /// Neither end may sit on the start cell, the winning cell, or off the
    /// board, and the trigger cell must be free.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), BoardError> {
        let (start, end) = (entity.start(), entity.end());
        let inside = |cell: u32| cell > START_CELL && cell < self.winning_cell;
        if !inside(start) || !inside(end) {
            return Err(BoardError::BoundaryCell { start, end });
        }
        if self.entities.contains_key(&start) {
            return Err(BoardError::OccupiedTrigger(start));
        }
        self.entities.insert(start, entity);
        Ok(())
    }

    /// Where a player landing on `cell` comes to rest.
    ///
    /// Exactly one hop: a trigger cell yields its entity's end, which is
    /// never resolved further.
    #[must_use]
    pub fn resolve(&self, cell: u32) -> u32 {
        self.entities.get(&cell).map_or(cell, Entity::end)
    }

    /// The entity triggered by `cell`, if any.
    #[must_use]
    pub fn entity_at(&self, cell: u32) -> Option<&Entity> {
        self.entities.get(&cell)
    }

    /// Does `cell` trigger an entity?
    #[must_use]
    pub fn is_trigger(&self, cell: u32) -> bool {
        self.entities.contains_key(&cell)
    }

    /// All entities in arbitrary order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// All entities ordered by trigger cell.
    #[must_use]
    pub fn entities_sorted(&self) -> Vec<Entity> {
        let mut all: Vec<Entity> = self.entities.values().copied().collect();
        all.sort_by_key(Entity::start);
        all
    }

    /// Number of entities of one kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind() == kind).count()
    }

    /// Total number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Does the board have no entities?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// One line per entity plus a totals line.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut lines: Vec<String> = self.entities_sorted().iter().map(ToString::to_string).collect();
        lines.push(format!(
            "Total: {} snakes, {} ladders",
            self.count(EntityKind::Setback),
            self.count(EntityKind::Shortcut)
        ));
        lines.join("\n")
    }
}
