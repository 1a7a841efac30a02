//! One player's grid of tiles plus the hits and misses recorded against it.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, FleetError, StrikeOutcome};
use crate::config::{BOARD_SIZE, FLEET};
use crate::position::{Position, PositionSet};
use crate::ship::{is_contiguous_run, ShipKind};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    #[default]
    Empty,
    Occupied(ShipKind),
}

impl Tile {
    pub fn is_empty(self) -> bool {
        matches!(self, Tile::Empty)
    }

    pub fn ship(self) -> Option<ShipKind> {
        match self {
            Tile::Empty => None,
            Tile::Occupied(kind) => Some(kind),
        }
    }
}

pub(crate) type Grid = [[Tile; BOARD_SIZE]; BOARD_SIZE];

/// Grid of tiles indexed `[y][x]`, with hit and miss sets.
///
/// Occupancy only changes through [`Board::place`]; strikes only ever add
/// to `hits` or `misses`.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Grid,
    hits: PositionSet,
    misses: PositionSet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, nothing struck).
    pub fn new() -> Self {
        Board {
            tiles: [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE],
            hits: PositionSet::new(),
            misses: PositionSet::new(),
        }
    }

    /// Assemble a board from decoded parts without cross-checking the
    /// hit/miss sets against the tiles.
    pub(crate) fn from_parts(tiles: Grid, hits: PositionSet, misses: PositionSet) -> Self {
        Board {
            tiles,
            hits,
            misses,
        }
    }

    pub fn tile(&self, pos: Position) -> Result<Tile, BoardError> {
        let pos = pos.check()?;
        Ok(self.tiles[pos.y][pos.x])
    }

    pub fn hits(&self) -> &PositionSet {
        &self.hits
    }

    pub fn misses(&self) -> &PositionSet {
        &self.misses
    }

    pub fn is_hit(&self, pos: Position) -> bool {
        self.hits.contains(pos)
    }

    pub fn is_miss(&self, pos: Position) -> bool {
        self.misses.contains(pos)
    }

    /// Every occupied cell.
    pub fn occupied(&self) -> PositionSet {
        let mut set = PositionSet::new();
        for pos in self.positions() {
            if !self.tiles[pos.y][pos.x].is_empty() {
                // positions() only yields on-grid cells
                let _ = set.insert(pos);
            }
        }
        set
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().len()
    }

    /// Cells occupied by `kind`, in row-major order.
    pub fn ship_cells(&self, kind: ShipKind) -> Vec<Position> {
        self.positions()
            .filter(|p| self.tiles[p.y][p.x] == Tile::Occupied(kind))
            .collect()
    }

    /// Whether every cell of `kind` has been hit. A kind absent from the
    /// board is never sunk.
    pub fn is_sunk(&self, kind: ShipKind) -> bool {
        let cells = self.ship_cells(kind);
        !cells.is_empty() && cells.iter().all(|&p| self.hits.contains(p))
    }

    /// Returns `true` while some occupied cell has not been hit.
    pub fn has_alive_ships(&self) -> bool {
        !(self.occupied() & !self.hits).is_empty()
    }

    /// Commit `cells` as occupied by `kind`.
    pub fn place(&mut self, kind: ShipKind, cells: &[Position]) -> Result<(), BoardError> {
        for &cell in cells {
            cell.check()?;
        }
        if !is_contiguous_run(kind, cells) {
            return Err(BoardError::InvalidShipShape {
                kind,
                cells: cells.len(),
            });
        }
        if self
            .positions()
            .any(|p| self.tiles[p.y][p.x] == Tile::Occupied(kind))
        {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        if let Some(taken) = cells.iter().find(|p| !self.tiles[p.y][p.x].is_empty()) {
            return Err(BoardError::Overlap {
                x: taken.x,
                y: taken.y,
            });
        }
        for cell in cells {
            self.tiles[cell.y][cell.x] = Tile::Occupied(kind);
        }
        Ok(())
    }

    /// Resolve a strike at `pos`. Striking a resolved position is a no-op
    /// reported as [`StrikeOutcome::Repeat`].
    pub fn strike(&mut self, pos: Position) -> Result<StrikeOutcome, BoardError> {
        let pos = pos.check()?;
        if self.hits.contains(pos) || self.misses.contains(pos) {
            return Ok(StrikeOutcome::Repeat);
        }
        match self.tiles[pos.y][pos.x] {
            Tile::Occupied(kind) => {
                self.hits.insert(pos)?;
                if self.is_sunk(kind) {
                    Ok(StrikeOutcome::Sunk(kind))
                } else {
                    Ok(StrikeOutcome::Hit(kind))
                }
            }
            Tile::Empty => {
                self.misses.insert(pos)?;
                Ok(StrikeOutcome::Miss)
            }
        }
    }

    /// Check that the board carries exactly one straight run of each kind
    /// with the right length.
    pub fn validate_fleet(&self) -> Result<(), FleetError> {
        for kind in FLEET {
            let cells = self.ship_cells(kind);
            if cells.is_empty() {
                return Err(FleetError::MissingShip(kind));
            }
            if cells.len() != kind.size() {
                return Err(FleetError::WrongLength {
                    kind,
                    expected: kind.size(),
                    found: cells.len(),
                });
            }
            if !is_contiguous_run(kind, &cells) {
                return Err(FleetError::NotContiguous(kind));
            }
        }
        Ok(())
    }

    pub(crate) fn tiles(&self) -> &Grid {
        &self.tiles
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position::new(x, y)))
    }
}

/// Renders the canonical grid text.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.tiles.iter().enumerate() {
            for tile in row {
                let ch = match tile {
                    Tile::Empty => '.',
                    Tile::Occupied(kind) => kind.code(),
                };
                write!(f, "{}", ch)?;
            }
            if y + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n{}\n  hits: {:?},\n  misses: {:?}\n}}",
            self, self.hits, self.misses
        )
    }
}
