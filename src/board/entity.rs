//! Shortcuts and setbacks.

use serde::{Deserialize, Serialize};

use crate::core::BoardError;

/// Which way an entity moves a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Ladder: climbs to a higher cell.
    Shortcut,
    /// Snake: drops to a lower cell.
    Setback,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Shortcut => f.write_str("Ladder"),
            EntityKind::Setback => f.write_str("Snake"),
        }
    }
}

/// A link from a trigger cell to a destination cell.
///
/// Construction enforces direction: shortcuts climb, setbacks drop.
/// Board-level constraints (boundary cells, duplicate triggers) are
/// checked by `Board::add_entity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    kind: EntityKind,
    start: u32,
    end: u32,
}

impl Entity {
    /// Create a shortcut. Requires `start < end`.
    pub fn shortcut(start: u32, end: u32) -> Result<Self, BoardError> {
        if start >= end {
            return Err(BoardError::ShortcutDirection { start, end });
        }
        Ok(Self {
            kind: EntityKind::Shortcut,
            start,
            end,
        })
    }

    /// Create a setback. Requires `start > end`.
    pub fn setback(start: u32, end: u32) -> Result<Self, BoardError> {
        if start <= end {
            return Err(BoardError::SetbackDirection { start, end });
        }
        Ok(Self {
            kind: EntityKind::Setback,
            start,
            end,
        })
    }

    /// Create an entity of the given kind.
    pub fn new(kind: EntityKind, start: u32, end: u32) -> Result<Self, BoardError> {
        match kind {
            EntityKind::Shortcut => Self::shortcut(start, end),
            EntityKind::Setback => Self::setback(start, end),
        }
    }

    /// Shortcut or setback.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Trigger cell.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Destination cell.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} -> {}", self.kind, self.start, self.end)
    }
}
