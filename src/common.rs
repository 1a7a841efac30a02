//! Common types for the arena: error enums and strike outcomes.

use alloc::string::String;
use core::fmt;

use crate::ship::ShipKind;

/// Result of applying a strike to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeOutcome {
    /// Landed on a ship that still has unhit segments.
    Hit(ShipKind),
    /// Landed on the last unhit segment of a ship.
    Sunk(ShipKind),
    /// Landed on open water.
    Miss,
    /// The position was already resolved; nothing changed.
    Repeat,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Position lies outside the grid.
    OutOfBounds { x: usize, y: usize },
    /// Placement collides with a ship already on the board.
    Overlap { x: usize, y: usize },
    /// Cells are not one straight run of the ship's length.
    InvalidShipShape { kind: ShipKind, cells: usize },
    /// This kind of ship is already on the board.
    ShipAlreadyPlaced(ShipKind),
    /// Neither random attempts nor the exhaustive scan found room.
    UnableToPlaceShip(ShipKind),
    /// Every position of the board is already a hit or a miss.
    NoLegalTarget,
    /// The board does not carry a valid complete fleet.
    Fleet(FleetError),
}

/// Reasons a board fails whole-fleet validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    MissingShip(ShipKind),
    WrongLength {
        kind: ShipKind,
        expected: usize,
        found: usize,
    },
    NotContiguous(ShipKind),
}

impl From<FleetError> for BoardError {
    fn from(err: FleetError) -> Self {
        BoardError::Fleet(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { x, y } => {
                write!(f, "Position ({}, {}) is out of bounds", x, y)
            }
            BoardError::Overlap { x, y } => {
                write!(f, "Ship placement overlaps another ship at ({}, {})", x, y)
            }
            BoardError::InvalidShipShape { kind, cells } => write!(
                f,
                "{} needs {} contiguous cells in a line, got {} cells",
                kind,
                kind.size(),
                cells
            ),
            BoardError::ShipAlreadyPlaced(kind) => write!(f, "{} is already placed", kind),
            BoardError::UnableToPlaceShip(kind) => write!(f, "Unable to place {}", kind),
            BoardError::NoLegalTarget => write!(f, "Nowhere left to strike"),
            BoardError::Fleet(e) => write!(f, "Invalid fleet: {}", e),
        }
    }
}

impl fmt::Display for FleetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetError::MissingShip(kind) => write!(f, "{} is missing", kind),
            FleetError::WrongLength {
                kind,
                expected,
                found,
            } => write!(f, "{} has {} tiles, expected {}", kind, found, expected),
            FleetError::NotContiguous(kind) => {
                write!(f, "{} tiles are not in one straight line", kind)
            }
        }
    }
}

/// Errors returned when decoding the grid text encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Character is neither `.` nor a ship code.
    InvalidShipCode { ch: char, row: usize, col: usize },
    WrongRowCount { expected: usize, found: usize },
    WrongRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A hit or miss coordinate could not be stored on the board.
    Board(BoardError),
}

impl From<BoardError> for CodecError {
    fn from(err: BoardError) -> Self {
        CodecError::Board(err)
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidShipCode { ch, row, col } => write!(
                f,
                "Unexpected ship code {:?} at row {}, column {}",
                ch, row, col
            ),
            CodecError::WrongRowCount { expected, found } => {
                write!(f, "Expected {} grid rows, got {}", expected, found)
            }
            CodecError::WrongRowLength {
                row,
                expected,
                found,
            } => write!(
                f,
                "Expected {} columns in grid row {}, got {}",
                expected, row, found
            ),
            CodecError::Board(e) => write!(f, "{}", e),
        }
    }
}

/// Errors preventing a match log from being replayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The log does not open with two snapshots of distinct players.
    MalformedLog(String),
    /// A snapshot's board could not be decoded.
    Codec { index: usize, source: CodecError },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::MalformedLog(reason) => write!(f, "Malformed match log: {}", reason),
            ReplayError::Codec { index, source } => {
                write!(f, "Log entry {} has an undecodable board: {}", index, source)
            }
        }
    }
}

/// Errors raised by the match referee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The action does not fit the current phase of the match.
    UnexpectedAction(&'static str),
    /// A player acted out of turn.
    NotYourTurn,
    /// The player is not part of this match.
    UnknownPlayer,
    /// The submitted board or strike was rejected.
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnexpectedAction(expected) => {
                write!(f, "Unexpected action, expected {}", expected)
            }
            GameError::NotYourTurn => write!(f, "Player acted out of turn"),
            GameError::UnknownPlayer => write!(f, "Player is not part of this match"),
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for FleetError {}
#[cfg(feature = "std")]
impl std::error::Error for CodecError {}
#[cfg(feature = "std")]
impl std::error::Error for ReplayError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
