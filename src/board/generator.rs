//! Random placement of shortcuts and setbacks.
//!
//! For a board of edge `n` the generator tries to place `n - 3` setbacks,
//! then `n - 3` shortcuts. Each entity gets a bounded number of random
//! attempts; an entity that never finds a valid spot is skipped, so the
//! final counts are best-effort.
//!
//! ## Placement windows
//!
//! - Setback: start in `[n + 2, n² - 2]`, end in `[2, min(start - 5, n² - 1)]`
//! - Shortcut: start in `[2, n² - n - 2]`, end in `[start + 5, n² - 1]`
//!
//! A candidate is rejected if either cell already triggers an entity, if it
//! would close a cycle through existing entities, or if the board refuses it.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::entity::{Entity, EntityKind};
use super::grid::Board;
use crate::core::GameRng;

/// Minimum distance a shortcut climbs or a setback drops.
pub const MIN_TRAVEL: u32 = 5;

/// Default number of random attempts per entity.
pub const DEFAULT_ATTEMPTS: u32 = 100;

/// Outcome of trying to place one entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The entity was added to the board.
    Placed(Entity),
    /// Every attempt failed; the entity is skipped.
    NotPlaced {
        /// Attempts spent.
        attempts: u32,
    },
}

impl Placement {
    /// Was the entity placed?
    #[must_use]
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

/// Totals from one generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entities requested per kind (`n - 3`).
    pub requested: u32,
    /// Setbacks placed.
    pub setbacks: u32,
    /// Shortcuts placed.
    pub shortcuts: u32,
    /// Entities skipped after exhausting their attempts.
    pub skipped: u32,
}

/// Places random entities on a board.
#[derive(Clone, Copy, Debug)]
pub struct EntityGenerator {
    max_attempts: u32,
}

impl Default for EntityGenerator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl EntityGenerator {
    /// Generator with the default attempt budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempts per entity.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Fill `board` with `n - 3` setbacks and `n - 3` shortcuts, best-effort.
    pub fn populate(&self, board: &mut Board, rng: &mut GameRng) -> GenerationReport {
        let requested = board.size().saturating_sub(3);
        let mut report = GenerationReport {
            requested,
            ..GenerationReport::default()
        };

        for kind in [EntityKind::Setback, EntityKind::Shortcut] {
            for _ in 0..requested {
                match self.place(kind, board, rng) {
                    Placement::Placed(_) => match kind {
                        EntityKind::Setback => report.setbacks += 1,
                        EntityKind::Shortcut => report.shortcuts += 1,
                    },
                    Placement::NotPlaced { attempts } => {
                        debug!(%kind, attempts, "entity skipped after exhausting attempts");
                        report.skipped += 1;
                    }
                }
            }
        }

        info!(
            requested,
            setbacks = report.setbacks,
            shortcuts = report.shortcuts,
            skipped = report.skipped,
            "board generated"
        );
        report
    }

    /// Try to place one entity of `kind`.
    pub fn place(&self, kind: EntityKind, board: &mut Board, rng: &mut GameRng) -> Placement {
        for _ in 0..self.max_attempts {
            let Some((start, end)) = candidate(kind, board.size(), rng) else {
                continue;
            };

            if start == end || board.is_trigger(start) || board.is_trigger(end) {
                continue;
            }
            if would_create_cycle(board, start, end) {
                continue;
            }
            let Ok(entity) = Entity::new(kind, start, end) else {
                continue;
            };
            if board.add_entity(entity).is_ok() {
                return Placement::Placed(entity);
            }
        }

        Placement::NotPlaced {
            attempts: self.max_attempts,
        }
    }
}

/// Draw one `(start, end)` pair, or `None` when the windows are empty.
fn candidate(kind: EntityKind, size: u32, rng: &mut GameRng) -> Option<(u32, u32)> {
    let winning = size * size;
    match kind {
        EntityKind::Setback => {
            let (min_start, max_start) = (size + 2, winning.checked_sub(2)?);
            if min_start > max_start {
                return None;
            }
            let start = rng.gen_inclusive(min_start, max_start);

            let min_end = 2;
            let max_end = start.checked_sub(MIN_TRAVEL)?.min(winning - 1);
            if max_end < min_end {
                return None;
            }
            Some((start, rng.gen_inclusive(min_end, max_end)))
        }
        EntityKind::Shortcut => {
            let (min_start, max_start) = (2, winning.checked_sub(size + 2)?);
            if min_start > max_start {
                return None;
            }
            let start = rng.gen_inclusive(min_start, max_start);

            let (min_end, max_end) = (start + MIN_TRAVEL, winning - 1);
            if min_end > max_end {
                return None;
            }
            Some((start, rng.gen_inclusive(min_end, max_end)))
        }
    }
}

/// Would adding `start -> end` close a loop through existing entities?
///
/// Chases `end` through the board's triggers. Reaching `start` again is a
/// cycle; reaching a plain cell, or a cell already seen, is not.
#[must_use]
pub fn would_create_cycle(board: &Board, start: u32, end: u32) -> bool {
    let mut visited = FxHashSet::default();
    let mut current = end;

    while let Some(entity) = board.entity_at(current) {
        if !visited.insert(current) {
            return false;
        }
        current = entity.end();
        if current == start {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(size: u32, seed: u64) -> (Board, GenerationReport) {
        let mut board = Board::new(size);
        let mut rng = GameRng::new(seed);
        let report = EntityGenerator::new().populate(&mut board, &mut rng);
        (board, report)
    }

    #[test]
    fn test_populate_respects_windows() {
        let (board, report) = generated(10, 42);

        assert_eq!(report.requested, 7);
        assert_eq!(
            (report.setbacks + report.shortcuts) as usize,
            board.len()
        );
        assert!(report.setbacks <= 7 && report.shortcuts <= 7);

        for entity in board.entities() {
            let (start, end) = (entity.start(), entity.end());
            assert!((2..=99).contains(&start));
            assert!((2..=99).contains(&end));
            match entity.kind() {
                EntityKind::Setback => {
                    assert!((12..=98).contains(&start));
                    assert!(start - end >= MIN_TRAVEL);
                }
                EntityKind::Shortcut => {
                    assert!((2..=88).contains(&start));
                    assert!(end - start >= MIN_TRAVEL);
                }
            }
        }
    }

    #[test]
    fn test_populate_is_deterministic() {
        let (a, _) = generated(12, 7);
        let (b, _) = generated(12, 7);
        assert_eq!(a.entities_sorted(), b.entities_sorted());
    }

    #[test]
    fn test_small_boards_request_nothing() {
        for size in 2..=3 {
            let (board, report) = generated(size, 1);
            assert_eq!(report.requested, 0);
            assert!(board.is_empty());
        }
    }

    #[test]
    fn test_crowded_board_skips_instead_of_looping() {
        // n = 4 leaves setback starts in [6, 14] and ends in [2, start - 5]
        let mut board = Board::new(4);
        let mut rng = GameRng::new(3);
        let generator = EntityGenerator::new().with_max_attempts(5);

        let mut placed = 0;
        for _ in 0..50 {
            if generator.place(EntityKind::Setback, &mut board, &mut rng).is_placed() {
                placed += 1;
            }
        }

        assert!(placed < 50);
        assert_eq!(board.count(EntityKind::Setback), placed);
    }

    #[test]
    fn test_zero_attempts_never_places() {
        let mut board = Board::new(10);
        let mut rng = GameRng::new(1);
        let generator = EntityGenerator::new().with_max_attempts(0);

        assert_eq!(
            generator.place(EntityKind::Shortcut, &mut board, &mut rng),
            Placement::NotPlaced { attempts: 0 }
        );
    }

    #[test]
    fn test_setback_window_too_low_yields_no_candidate() {
        // start 6 would need an end in [2, 1]
        let mut rng = GameRng::new(0);
        for _ in 0..200 {
            if let Some((start, end)) = candidate(EntityKind::Setback, 4, &mut rng) {
                assert!(start >= 7);
                assert!((2..=start - MIN_TRAVEL).contains(&end));
            }
        }
    }

    #[test]
    fn test_cycle_detection() {
        let mut board = Board::new(10);
        board.add_entity(Entity::shortcut(10, 30).unwrap()).unwrap();
        board.add_entity(Entity::setback(30, 20).unwrap()).unwrap();

        // 15 -> 10 -> 30 -> 20: never returns to 15
        assert!(!would_create_cycle(&board, 15, 10));
        // 20 -> 10 -> 30 -> 20 closes the loop
        assert!(would_create_cycle(&board, 20, 10));
        // plain destination
        assert!(!would_create_cycle(&board, 50, 60));
    }

    #[test]
    fn test_cycle_check_stops_on_revisit() {
        let mut board = Board::new(10);
        board.add_entity(Entity::shortcut(10, 30).unwrap()).unwrap();
        board.add_entity(Entity::setback(30, 10).unwrap()).unwrap();

        // existing 10 <-> 30 loop does not involve 50
        assert!(!would_create_cycle(&board, 50, 10));
    }
}
