//! Ship kinds and the geometry of placing them on the grid.

use alloc::vec::Vec;
use core::fmt;

use crate::common::BoardError;
use crate::config::BOARD_SIZE;
use crate::position::Position;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step along the ship's axis as `(dx, dy)`.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// The five kinds of ship in a fleet, each with a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    PatrolBoat,
    Submarine,
    Destroyer,
    Battleship,
    Carrier,
}

impl ShipKind {
    /// Number of tiles the ship occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::PatrolBoat => 2,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 3,
            ShipKind::Battleship => 4,
            ShipKind::Carrier => 5,
        }
    }

    /// Single-letter code used in the grid text encoding.
    pub const fn code(self) -> char {
        match self {
            ShipKind::PatrolBoat => 'P',
            ShipKind::Submarine => 'S',
            ShipKind::Destroyer => 'D',
            ShipKind::Battleship => 'B',
            ShipKind::Carrier => 'C',
        }
    }

    /// Inverse of [`ShipKind::code`].
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(ShipKind::PatrolBoat),
            'S' => Some(ShipKind::Submarine),
            'D' => Some(ShipKind::Destroyer),
            'B' => Some(ShipKind::Battleship),
            'C' => Some(ShipKind::Carrier),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::PatrolBoat => "Patrol Boat",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Battleship => "Battleship",
            ShipKind::Carrier => "Carrier",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells covered by `kind` anchored at `anchor` and extending along
/// `orientation`. Fails if any cell would leave the grid.
pub fn ship_cells(
    kind: ShipKind,
    anchor: Position,
    orientation: Orientation,
) -> Result<Vec<Position>, BoardError> {
    if !anchor.in_bounds() {
        return Err(BoardError::OutOfBounds { x: anchor.x, y: anchor.y });
    }
    let (dx, dy) = orientation.step();
    let len = kind.size();
    let end = Position::new(anchor.x + dx * (len - 1), anchor.y + dy * (len - 1));
    if !end.in_bounds() {
        return Err(BoardError::OutOfBounds { x: end.x, y: end.y });
    }
    Ok((0..len)
        .map(|i| Position::new(anchor.x + dx * i, anchor.y + dy * i))
        .collect())
}

/// Checks that `cells` form one straight, gap-free run of `kind.size()`
/// cells. Order of `cells` does not matter.
pub(crate) fn is_contiguous_run(kind: ShipKind, cells: &[Position]) -> bool {
    if cells.len() != kind.size() {
        return false;
    }
    let min_x = cells.iter().map(|p| p.x).min().unwrap_or(0);
    let min_y = cells.iter().map(|p| p.y).min().unwrap_or(0);
    let anchor = Position::new(min_x, min_y);
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .filter_map(|o| ship_cells(kind, anchor, o).ok())
        .any(|run| run.iter().all(|p| cells.contains(p)))
}

/// Largest anchor coordinate along the ship's axis that keeps it on the grid.
pub(crate) fn max_anchor(kind: ShipKind) -> usize {
    BOARD_SIZE - kind.size()
}
