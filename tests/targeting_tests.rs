use battleship_arena::{
    legal_targets, plan_fleet, select_target, BoardError, PositionSet, StrikeOutcome, BOARD_SIZE,
};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn exhausts_board_in_exactly_one_hundred_calls() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut oracle = plan_fleet(&mut rng).unwrap();
    let mut hits = PositionSet::new();
    let mut misses = PositionSet::new();

    for call in 0..BOARD_SIZE * BOARD_SIZE {
        assert_eq!(legal_targets(&hits, &misses).len(), 100 - call);
        let target = select_target(&mut rng, &hits, &misses).unwrap();
        match oracle.strike(target).unwrap() {
            StrikeOutcome::Hit(_) | StrikeOutcome::Sunk(_) => {
                assert!(hits.insert(target).unwrap());
            }
            StrikeOutcome::Miss => {
                assert!(misses.insert(target).unwrap());
            }
            StrikeOutcome::Repeat => panic!("{} chosen twice", target),
        }
    }

    assert_eq!(hits.len(), 17);
    assert_eq!(misses.len(), 83);
    assert_eq!(
        select_target(&mut rng, &hits, &misses),
        Err(BoardError::NoLegalTarget)
    );
}

#[test]
fn same_seed_same_choice() {
    let hits = PositionSet::new();
    let misses = PositionSet::new();
    let a = select_target(&mut SmallRng::seed_from_u64(9), &hits, &misses);
    let b = select_target(&mut SmallRng::seed_from_u64(9), &hits, &misses);
    assert_eq!(a, b);
}
