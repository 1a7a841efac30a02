use alloc::string::String;

use crate::board::Board;
use crate::codec::{self, EncodedBoard};
use crate::common::{GameError, StrikeOutcome};
use crate::match_log::{LogEntry, MatchLog, PlayerId, PlayerPair, Seat};
use crate::position::{Position, PositionSet};

/// Current phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for this player's fleet.
    AwaitingField(Seat),
    /// Waiting for this player's strike.
    AwaitingStrike(Seat),
    GameOver { winner: Seat },
}

/// Referee for a single two-player match.
///
/// The first player submits a fleet, then the second, then strikes
/// alternate starting with the first player. Every accepted action is
/// appended to the match log.
#[derive(Debug, Clone)]
pub struct MatchGame {
    game_id: String,
    players: PlayerPair,
    boards: [Option<Board>; 2],
    phase: Phase,
    log: MatchLog,
}

impl MatchGame {
    pub fn new(game_id: impl Into<String>, players: PlayerPair) -> Self {
        Self {
            game_id: game_id.into(),
            players,
            boards: [None, None],
            phase: Phase::AwaitingField(Seat::First),
            log: MatchLog::new(),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn players(&self) -> &PlayerPair {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn log(&self) -> &MatchLog {
        &self.log
    }

    pub fn into_log(self) -> MatchLog {
        self.log
    }

    pub fn board(&self, seat: Seat) -> Option<&Board> {
        self.boards[seat.index()].as_ref()
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        match self.phase {
            Phase::GameOver { winner } => Some(self.players.get(winner)),
            _ => None,
        }
    }

    /// Hits and misses on the opponent's board, as visible to `seat`.
    pub fn opponent_marks(&self, seat: Seat) -> Option<(&PositionSet, &PositionSet)> {
        self.board(seat.other()).map(|b| (b.hits(), b.misses()))
    }

    /// Accept `player`'s fleet. Any hits or misses on `board` are dropped.
    pub fn accept_field(&mut self, player: &PlayerId, board: &Board) -> Result<(), GameError> {
        let seat = self.players.seat(player).ok_or(GameError::UnknownPlayer)?;
        match self.phase {
            Phase::AwaitingField(expected) if expected == seat => {}
            Phase::AwaitingField(_) => return Err(GameError::NotYourTurn),
            _ => return Err(GameError::UnexpectedAction("a strike")),
        }
        board
            .validate_fleet()
            .map_err(|e| GameError::Board(e.into()))?;

        let fresh = Board::from_parts(*board.tiles(), PositionSet::new(), PositionSet::new());
        self.log.push(LogEntry::PlacementSnapshot {
            player_id: player.clone(),
            board: EncodedBoard::from_grid(codec::encode_grid(&fresh)),
        });
        self.boards[seat.index()] = Some(fresh);
        self.phase = match seat {
            Seat::First => Phase::AwaitingField(Seat::Second),
            Seat::Second => Phase::AwaitingStrike(Seat::First),
        };
        Ok(())
    }

    /// Apply `attacker`'s strike to the opponent's board. The turn passes to
    /// the defender, or the match ends when the defender has no ships left.
    pub fn accept_strike(
        &mut self,
        attacker: &PlayerId,
        position: Position,
    ) -> Result<StrikeOutcome, GameError> {
        let seat = self.players.seat(attacker).ok_or(GameError::UnknownPlayer)?;
        match self.phase {
            Phase::AwaitingStrike(expected) if expected == seat => {}
            Phase::AwaitingStrike(_) => return Err(GameError::NotYourTurn),
            Phase::AwaitingField(_) => return Err(GameError::UnexpectedAction("a fleet")),
            Phase::GameOver { .. } => return Err(GameError::UnexpectedAction("nothing")),
        }
        let defender = seat.other();
        let board = self.boards[defender.index()]
            .as_mut()
            .ok_or(GameError::UnexpectedAction("a fleet"))?;
        let outcome = board.strike(position)?;
        let alive = board.has_alive_ships();

        self.log.push(LogEntry::Strike {
            attacker_id: attacker.clone(),
            position,
        });
        if alive {
            self.phase = Phase::AwaitingStrike(defender);
        } else {
            self.phase = Phase::GameOver { winner: seat };
            self.log.push(LogEntry::GameOver {
                winner_id: attacker.clone(),
            });
        }
        Ok(outcome)
    }

    /// Record a failure that interrupted the match.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.log.push(LogEntry::Error {
            message: message.into(),
        });
    }
}
