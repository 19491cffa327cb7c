//! The board: numbered cells, shortcuts and setbacks.
//!
//! - `Entity`: a shortcut ("ladder") or setback ("snake")
//! - `Board`: cell range, winning cell, trigger index, single-hop resolution
//! - `EntityGenerator`: random best-effort placement with cycle avoidance

pub mod entity;
pub mod grid;
pub mod generator;

pub use entity::{Entity, EntityKind};
pub use grid::Board;
pub use generator::{
    would_create_cycle, EntityGenerator, GenerationReport, Placement, DEFAULT_ATTEMPTS, MIN_TRAVEL,
};

/// Every player starts here. Any number of players may share it.
pub const START_CELL: u32 = 1;
