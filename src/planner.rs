//! Random, collision-free fleet layout.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::{BOARD_SIZE, DEFAULT_PLACEMENT_ATTEMPTS, FLEET};
use crate::position::Position;
use crate::ship::{max_anchor, ship_cells, Orientation, ShipKind};

/// Places the fleet by rejection sampling, one kind at a time in canonical
/// order.
///
/// Each kind gets `attempt_cap` random tries. Past the cap the planner scans
/// every free run for that kind and picks one uniformly, so a layout is
/// always found when one exists.
#[derive(Debug, Clone, Copy)]
pub struct PlacementPlanner {
    attempt_cap: usize,
}

impl Default for PlacementPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEMENT_ATTEMPTS)
    }
}

impl PlacementPlanner {
    pub fn new(attempt_cap: usize) -> Self {
        Self { attempt_cap }
    }

    pub fn attempt_cap(&self) -> usize {
        self.attempt_cap
    }

    /// Produce a fresh board with every ship placed and nothing struck.
    pub fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board, BoardError> {
        let mut board = Board::new();
        for kind in FLEET {
            self.place_ship(rng, &mut board, kind)?;
        }
        Ok(board)
    }

    /// Place a single `kind` onto `board`.
    pub fn place_ship<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        board: &mut Board,
        kind: ShipKind,
    ) -> Result<(), BoardError> {
        for _ in 0..self.attempt_cap {
            let cells = random_run(rng, kind)?;
            match board.place(kind, &cells) {
                Ok(()) => return Ok(()),
                Err(BoardError::Overlap { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        log::debug!(
            "no free run for {} after {} random attempts, scanning",
            kind,
            self.attempt_cap
        );
        let runs = free_runs(board, kind);
        if runs.is_empty() {
            return Err(BoardError::UnableToPlaceShip(kind));
        }
        let cells = &runs[rng.random_range(0..runs.len())];
        board.place(kind, cells)
    }
}

/// Plan a fleet with the default attempt cap.
pub fn plan_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, BoardError> {
    PlacementPlanner::default().plan(rng)
}

/// Random orientation, random anchor anywhere on the grid, then clamped
/// along the ship's axis so the run fits.
fn random_run<R: Rng + ?Sized>(rng: &mut R, kind: ShipKind) -> Result<Vec<Position>, BoardError> {
    let orientation = if rng.random_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let mut x = rng.random_range(0..BOARD_SIZE);
    let mut y = rng.random_range(0..BOARD_SIZE);
    match orientation {
        Orientation::Horizontal => x = x.min(max_anchor(kind)),
        Orientation::Vertical => y = y.min(max_anchor(kind)),
    }
    ship_cells(kind, Position::new(x, y), orientation)
}

/// Every run of `kind` that fits on the grid without touching another ship.
fn free_runs(board: &Board, kind: ShipKind) -> Vec<Vec<Position>> {
    let occupied = board.occupied();
    let mut runs = Vec::new();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let Ok(cells) = ship_cells(kind, Position::new(x, y), orientation) else {
                    continue;
                };
                if cells.iter().all(|&p| !occupied.contains(p)) {
                    runs.push(cells);
                }
            }
        }
    }
    runs
}
