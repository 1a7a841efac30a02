//! Players of a match and the ordered log of what happened in it.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::codec::EncodedBoard;
use crate::position::Position;

/// Opaque player identifier assigned by the coordinating service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which of the two players: the one who placed first or second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// Exactly two distinct players.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerPair {
    first: PlayerId,
    second: PlayerId,
}

impl PlayerPair {
    /// `None` if both identifiers are equal.
    pub fn new(first: PlayerId, second: PlayerId) -> Option<Self> {
        if first == second {
            None
        } else {
            Some(Self { first, second })
        }
    }

    pub fn get(&self, seat: Seat) -> &PlayerId {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    pub fn seat(&self, id: &PlayerId) -> Option<Seat> {
        if *id == self.first {
            Some(Seat::First)
        } else if *id == self.second {
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// The opponent of `id`, if `id` plays in this match.
    pub fn other(&self, id: &PlayerId) -> Option<&PlayerId> {
        self.seat(id).map(|seat| self.get(seat.other()))
    }

    pub fn first(&self) -> &PlayerId {
        &self.first
    }

    pub fn second(&self) -> &PlayerId {
        &self.second
    }
}

/// One recorded event of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "snake_case"))]
pub enum LogEntry {
    /// A player's fleet as submitted, with no hits or misses.
    PlacementSnapshot {
        player_id: PlayerId,
        board: EncodedBoard,
    },
    Strike {
        attacker_id: PlayerId,
        position: Position,
    },
    GameOver {
        winner_id: PlayerId,
    },
    /// The match was interrupted by a failure.
    Error {
        message: String,
    },
    /// Any entry type this build does not know about.
    #[cfg_attr(feature = "std", serde(other))]
    Unrecognized,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::PlacementSnapshot { player_id, .. } => {
                write!(f, "{} placed their fleet", player_id)
            }
            LogEntry::Strike {
                attacker_id,
                position,
            } => write!(f, "{} strikes at {}", attacker_id, position),
            LogEntry::GameOver { winner_id } => write!(f, "Game over, {} wins", winner_id),
            LogEntry::Error { message } => write!(f, "Error: {}", message),
            LogEntry::Unrecognized => write!(f, "(unrecognized entry)"),
        }
    }
}

/// Append-only, ordered sequence of log entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct MatchLog {
    entries: Vec<LogEntry>,
}

impl MatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Winner recorded by a `GameOver` entry, if any.
    pub fn winner(&self) -> Option<&PlayerId> {
        self.entries.iter().find_map(|e| match e {
            LogEntry::GameOver { winner_id } => Some(winner_id),
            _ => None,
        })
    }
}

impl From<Vec<LogEntry>> for MatchLog {
    fn from(entries: Vec<LogEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<LogEntry> for MatchLog {
    fn from_iter<I: IntoIterator<Item = LogEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
