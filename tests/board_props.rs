use battleship_arena::{
    decode, encode, plan_fleet, Board, PlacementPlanner, Position, StrikeOutcome, BOARD_SIZE,
    FLEET, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn struck_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = plan_fleet(&mut rng).unwrap();
    let strikes = rng.random_range(0..BOARD_SIZE * BOARD_SIZE);
    for _ in 0..strikes {
        let x = rng.random_range(0..BOARD_SIZE);
        let y = rng.random_range(0..BOARD_SIZE);
        board.strike(Position::new(x, y)).unwrap();
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn planned_fleet_is_complete(seed in any::<u64>(), cap in 0usize..8) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = PlacementPlanner::new(cap).plan(&mut rng).unwrap();
        prop_assert_eq!(board.validate_fleet(), Ok(()));
        prop_assert_eq!(board.occupied_count(), TOTAL_SHIP_CELLS);
        for kind in FLEET {
            prop_assert_eq!(board.ship_cells(kind).len(), kind.size());
        }
        prop_assert!(board.hits().is_empty());
        prop_assert!(board.misses().is_empty());
    }

    #[test]
    fn codec_round_trip(seed in any::<u64>()) {
        let board = struck_board(seed);
        let decoded = decode(&encode(&board)).unwrap();
        prop_assert_eq!(decoded, board);
    }

    #[test]
    fn strike_idempotent(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let mut board = struck_board(seed);
        let pos = Position::new(x, y);
        board.strike(pos).unwrap();
        let after_first = board.clone();
        prop_assert_eq!(board.strike(pos), Ok(StrikeOutcome::Repeat));
        prop_assert_eq!(&board, &after_first);
        prop_assert!(board.is_hit(pos) ^ board.is_miss(pos));
    }

    #[test]
    fn hits_and_misses_partition_struck_cells(seed in any::<u64>()) {
        let board = struck_board(seed);
        prop_assert!((*board.hits() & *board.misses()).is_empty());
        for pos in board.hits() {
            prop_assert!(board.tile(pos).unwrap().ship().is_some());
        }
        for pos in board.misses() {
            prop_assert!(board.tile(pos).unwrap().is_empty());
        }
    }
}
