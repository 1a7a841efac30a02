//! Uniform-random strike selection against an opponent's board.
//! Only the opponent's hits and misses are consulted; ship placement is never
//! visible to the selector.

use rand::Rng;

use crate::common::BoardError;
use crate::position::{Position, PositionSet};

/// Positions not yet resolved as a hit or a miss.
pub fn legal_targets(hits: &PositionSet, misses: &PositionSet) -> PositionSet {
    !(*hits | *misses)
}

/// Pick one unresolved position uniformly at random.
pub fn select_target<R: Rng + ?Sized>(
    rng: &mut R,
    hits: &PositionSet,
    misses: &PositionSet,
) -> Result<Position, BoardError> {
    let candidates = legal_targets(hits, misses);
    if candidates.is_empty() {
        return Err(BoardError::NoLegalTarget);
    }
    let pick = rng.random_range(0..candidates.len());
    candidates.nth(pick).ok_or(BoardError::NoLegalTarget)
}

/// Same as [`select_target`] for hits and misses received as coordinate
/// lists. Off-grid coordinates rule nothing out and are ignored.
pub fn select_target_from_lists<R: Rng + ?Sized>(
    rng: &mut R,
    hits: &[Position],
    misses: &[Position],
) -> Result<Position, BoardError> {
    let on_grid = |list: &[Position]| {
        let mut set = PositionSet::new();
        for &pos in list.iter().filter(|p| p.in_bounds()) {
            let _ = set.insert(pos);
        }
        set
    };
    select_target(rng, &on_grid(hits), &on_grid(misses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BOARD_SIZE;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn never_picks_resolved_cells() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut hits = PositionSet::new();
        let mut misses = PositionSet::new();
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE - 1 {
                if (x + y) % 2 == 0 {
                    hits.insert(Position::new(x, y)).unwrap();
                } else {
                    misses.insert(Position::new(x, y)).unwrap();
                }
            }
        }
        for _ in 0..50 {
            let pos = select_target(&mut rng, &hits, &misses).unwrap();
            assert_eq!(pos.y, BOARD_SIZE - 1);
        }
    }

    #[test]
    fn last_cell_is_forced() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut only = PositionSet::new();
        only.insert(Position::new(6, 2)).unwrap();
        let misses = !only;
        assert_eq!(
            select_target(&mut rng, &PositionSet::new(), &misses),
            Ok(Position::new(6, 2))
        );
    }

    #[test]
    fn full_board_has_no_target() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(
            select_target(&mut rng, &PositionSet::full(), &PositionSet::new()),
            Err(BoardError::NoLegalTarget)
        );
    }

    #[test]
    fn lists_ignore_off_grid() {
        let mut rng = SmallRng::seed_from_u64(5);
        let misses: Vec<Position> = (0..BOARD_SIZE * BOARD_SIZE)
            .map(|i| Position::new(i % BOARD_SIZE, i / BOARD_SIZE))
            .filter(|p| *p != Position::new(0, 0))
            .chain([Position::new(42, 42)])
            .collect();
        assert_eq!(
            select_target_from_lists(&mut rng, &[], &misses),
            Ok(Position::new(0, 0))
        );
    }
}
