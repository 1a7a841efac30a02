use core::time::Duration;

use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// Canonical placement order of the fleet.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::PatrolBoat,
    ShipKind::Submarine,
    ShipKind::Destroyer,
    ShipKind::Battleship,
    ShipKind::Carrier,
];

/// Total number of ship segments in a complete fleet.
pub const TOTAL_SHIP_CELLS: usize = 2 + 3 + 3 + 4 + 5;

/// Random placement attempts per ship before the planner falls back to an
/// exhaustive scan of free runs.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Pause between two replayed log entries when spectating.
pub const REPLAY_STEP_DELAY: Duration = Duration::from_millis(500);

/// Upper bound on referee turns before a match is aborted.
pub const GAME_TURNS_LIMIT: usize = 10_000;
