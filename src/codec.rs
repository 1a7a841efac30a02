//! Canonical text encoding of a board.
//!
//! The grid is `BOARD_SIZE` rows of `BOARD_SIZE` characters, `.` for open
//! water or the ship's letter code, rows joined by `\n` with no trailing
//! newline. Hits and misses never appear in the grid text; they travel as
//! separate coordinate lists.

use alloc::string::String;
use alloc::vec::Vec;

use crate::board::{Board, Grid, Tile};
use crate::common::CodecError;
use crate::config::BOARD_SIZE;
use crate::position::{Position, PositionSet};
use crate::ship::ShipKind;

/// Wire form of a board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedBoard {
    pub grid: String,
    #[cfg_attr(feature = "std", serde(default))]
    pub hits: Vec<Position>,
    #[cfg_attr(feature = "std", serde(default))]
    pub misses: Vec<Position>,
}

impl EncodedBoard {
    /// Grid text only, with no hits or misses.
    pub fn from_grid(grid: impl Into<String>) -> Self {
        Self {
            grid: grid.into(),
            hits: Vec::new(),
            misses: Vec::new(),
        }
    }
}

/// Encode `board`; hits and misses are listed in row-major order.
pub fn encode(board: &Board) -> EncodedBoard {
    EncodedBoard {
        grid: encode_grid(board),
        hits: board.hits().iter().collect(),
        misses: board.misses().iter().collect(),
    }
}

pub fn encode_grid(board: &Board) -> String {
    let mut out = String::with_capacity(BOARD_SIZE * (BOARD_SIZE + 1));
    for (y, row) in board.tiles().iter().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|tile| match tile {
            Tile::Empty => '.',
            Tile::Occupied(kind) => kind.code(),
        }));
    }
    out
}

/// Decode a board. Hits and misses are inserted as given; they are not
/// checked against the tiles (see [`Board::validate_fleet`] and friends for
/// callers that need that).
pub fn decode(encoded: &EncodedBoard) -> Result<Board, CodecError> {
    let tiles = decode_tiles(&encoded.grid)?;
    let hits = PositionSet::try_from_iter(encoded.hits.iter().copied())?;
    let misses = PositionSet::try_from_iter(encoded.misses.iter().copied())?;
    Ok(Board::from_parts(tiles, hits, misses))
}

/// Decode grid text into a board with no hits or misses.
pub fn decode_grid(grid: &str) -> Result<Board, CodecError> {
    let tiles = decode_tiles(grid)?;
    Ok(Board::from_parts(tiles, PositionSet::new(), PositionSet::new()))
}

fn decode_tiles(grid: &str) -> Result<Grid, CodecError> {
    let mut tiles = [[Tile::Empty; BOARD_SIZE]; BOARD_SIZE];
    let rows: Vec<&str> = grid.split('\n').collect();
    if rows.len() != BOARD_SIZE {
        return Err(CodecError::WrongRowCount {
            expected: BOARD_SIZE,
            found: rows.len(),
        });
    }
    for (row, line) in rows.iter().enumerate() {
        let mut width = 0;
        for (col, ch) in line.chars().enumerate() {
            width += 1;
            let tile = match ch {
                '.' => Tile::Empty,
                _ => match ShipKind::from_code(ch) {
                    Some(kind) => Tile::Occupied(kind),
                    None => return Err(CodecError::InvalidShipCode { ch, row, col }),
                },
            };
            if col < BOARD_SIZE {
                tiles[row][col] = tile;
            }
        }
        if width != BOARD_SIZE {
            return Err(CodecError::WrongRowLength {
                row,
                expected: BOARD_SIZE,
                found: width,
            });
        }
    }
    Ok(tiles)
}
