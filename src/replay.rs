//! Step-by-step reconstruction of both players' boards from a match log.
//!
//! The replayer owns the log and the two boards. Its cursor starts past the
//! two placement snapshots and moves forward by exactly one entry per
//! [`Replayer::step`], whatever that entry is. Pacing and cancellation live
//! in the async driver; stepping here is immediate.

use crate::board::Board;
use crate::codec;
use crate::common::{ReplayError, StrikeOutcome};
use crate::match_log::{LogEntry, MatchLog, PlayerId, PlayerPair, Seat};
use crate::position::Position;

use alloc::format;

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent {
    /// A strike was applied to the defender's board.
    Strike {
        defender: Seat,
        position: Position,
        outcome: StrikeOutcome,
    },
    /// The entry carries no board change.
    Skipped,
    /// A strike that could not be applied: unknown attacker or off-grid.
    Rejected { index: usize },
}

#[derive(Debug, Clone)]
pub struct Replayer {
    log: MatchLog,
    players: PlayerPair,
    boards: [Board; 2],
    cursor: usize,
}

impl Replayer {
    /// Bind both players to their starting boards from the two opening
    /// snapshots.
    pub fn new(log: MatchLog) -> Result<Self, ReplayError> {
        let (first_id, first) = snapshot(&log, 0)?;
        let (second_id, second) = snapshot(&log, 1)?;
        let players = PlayerPair::new(first_id.clone(), second_id.clone()).ok_or_else(|| {
            ReplayError::MalformedLog(format!("both snapshots belong to {}", first_id))
        })?;
        Ok(Self {
            log,
            players,
            boards: [first, second],
            cursor: 2,
        })
    }

    /// Process the entry under the cursor and advance. `None` once the log
    /// is exhausted.
    pub fn step(&mut self) -> Option<StepEvent> {
        let index = self.cursor;
        let entry = self.log.get(index)?;
        let event = match entry {
            LogEntry::Strike {
                attacker_id,
                position,
            } => match self.players.seat(attacker_id) {
                Some(attacker) => {
                    let defender = attacker.other();
                    match self.boards[defender.index()].strike(*position) {
                        Ok(outcome) => StepEvent::Strike {
                            defender,
                            position: *position,
                            outcome,
                        },
                        Err(e) => {
                            log::warn!("log entry {}: {}", index, e);
                            StepEvent::Rejected { index }
                        }
                    }
                }
                None => {
                    log::warn!("log entry {}: unknown attacker {}", index, attacker_id);
                    StepEvent::Rejected { index }
                }
            },
            _ => StepEvent::Skipped,
        };
        self.cursor += 1;
        Some(event)
    }

    /// Apply every remaining entry immediately. Returns the number of steps.
    pub fn run_to_end(&mut self) -> usize {
        let mut steps = 0;
        while self.step().is_some() {
            steps += 1;
        }
        steps
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.log.len()
    }

    /// Index of the next entry to process.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Most recently processed entry.
    pub fn last_entry(&self) -> Option<&LogEntry> {
        self.log.get(self.cursor - 1)
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    pub fn players(&self) -> &PlayerPair {
        &self.players
    }

    pub fn board(&self, seat: Seat) -> &Board {
        &self.boards[seat.index()]
    }

    pub fn board_of(&self, player: &PlayerId) -> Option<&Board> {
        self.players.seat(player).map(|seat| self.board(seat))
    }
}

fn snapshot(log: &MatchLog, index: usize) -> Result<(&PlayerId, Board), ReplayError> {
    match log.get(index) {
        Some(LogEntry::PlacementSnapshot { player_id, board }) => {
            let decoded = codec::decode_grid(&board.grid)
                .map_err(|source| ReplayError::Codec { index, source })?;
            Ok((player_id, decoded))
        }
        Some(_) => Err(ReplayError::MalformedLog(format!(
            "entry {} is not a placement snapshot",
            index
        ))),
        None => Err(ReplayError::MalformedLog(format!(
            "log ends before entry {}",
            index
        ))),
    }
}
