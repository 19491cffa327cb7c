//! Property tests for board generation and whole races.

use proptest::prelude::*;

use ladder_race::board::{Board, EntityGenerator, EntityKind, START_CELL};
use ladder_race::core::{GameConfig, GameRng};
use ladder_race::dice::RandomDice;
use ladder_race::engine::{RecordingSink, TurnEngine};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_entities_stay_inside(seed in any::<u64>(), size in 4u32..=15) {
        let mut board = Board::new(size);
        let mut rng = GameRng::new(seed);
        let report = EntityGenerator::new().populate(&mut board, &mut rng);
        let winning = size * size;

        prop_assert_eq!(report.requested, size - 3);
        prop_assert!(board.count(EntityKind::Setback) as u32 <= size - 3);
        prop_assert!(board.count(EntityKind::Shortcut) as u32 <= size - 3);

        for entity in board.entities() {
            prop_assert!(entity.start() > START_CELL && entity.start() < winning);
            prop_assert!(entity.end() > START_CELL && entity.end() < winning);
            match entity.kind() {
                EntityKind::Shortcut => prop_assert!(entity.end() > entity.start()),
                EntityKind::Setback => prop_assert!(entity.end() < entity.start()),
            }
        }
    }

    #[test]
    fn resolution_is_one_hop(seed in any::<u64>(), size in 4u32..=15) {
        let mut board = Board::new(size);
        EntityGenerator::new().populate(&mut board, &mut GameRng::new(seed));

        for cell in START_CELL..=board.winning_cell() {
            let expected = board.entity_at(cell).map_or(cell, |e| e.end());
            prop_assert_eq!(board.resolve(cell), expected);
        }
    }

    #[test]
    fn races_finish_with_one_winner(seed in any::<u64>(), players in 2usize..=6, size in 4u32..=8) {
        let config = GameConfig::new()
            .with_board_size(size)
            .with_players(players)
            .with_seed(seed);
        let mut engine =
            TurnEngine::from_config(&config, RandomDice::from_seed(seed), RecordingSink::new())
                .unwrap();

        let mut steps = 0u32;
        while engine.step().is_some() {
            steps += 1;
            prop_assert!(engine.positions().is_consistent_with(engine.players()));
            prop_assert!(steps < 200_000);
        }

        let outcome = engine.outcome().unwrap();
        let at_goal = engine
            .players()
            .iter()
            .filter(|(_, p)| p.position == engine.board().winning_cell())
            .count();
        prop_assert_eq!(at_goal, 1);
        prop_assert_eq!(
            engine.player(outcome.winner).unwrap().position,
            engine.board().winning_cell()
        );
    }
}
