#![cfg(feature = "std")]

//! Terminal rendering for spectators.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::board::{Board, Tile};
use crate::config::BOARD_SIZE;
use crate::match_log::{PlayerId, Seat};
use crate::position::Position;
use crate::replay::Replayer;
use crate::runner::MatchRecord;

const GAP: &str = "      ";

/// Red background for a struck ship cell.
const HIT_ON: &str = "\x1b[41m";
const RESET: &str = "\x1b[0m";

fn cell(board: &Board, pos: Position) -> String {
    let ship = match board.tile(pos) {
        Ok(Tile::Occupied(kind)) => Some(kind.code()),
        _ => None,
    };
    match ship {
        Some(code) if board.is_hit(pos) => format!("{}{}{}", HIT_ON, code, RESET),
        // a hit always lands on a ship, but keep the marker if a log disagrees
        None if board.is_hit(pos) => format!("{}X{}", HIT_ON, RESET),
        _ if board.is_miss(pos) => "o".to_string(),
        Some(code) => code.to_string(),
        None => ".".to_string(),
    }
}

/// Column numbers, 0-based like the `(x, y)` in log entries.
fn header() -> String {
    let mut line = String::from("   ");
    for x in 0..BOARD_SIZE {
        let _ = write!(line, " {}", x);
    }
    line
}

fn row(board: &Board, y: usize) -> String {
    let mut line = format!("{:2} ", y);
    for x in 0..BOARD_SIZE {
        line.push(' ');
        line.push_str(&cell(board, Position::new(x, y)));
    }
    line
}

/// Both boards side by side, the most recent log entry, and the player
/// names under their boards.
pub fn render_match(replayer: &Replayer) -> String {
    let first = replayer.board(Seat::First);
    let second = replayer.board(Seat::Second);
    let width = header().len();

    let mut out = String::new();
    let _ = writeln!(out, "{}{}{}", header(), GAP, header());
    for y in 0..BOARD_SIZE {
        let _ = writeln!(out, "{}{}{}", row(first, y), GAP, row(second, y));
    }
    let players = replayer.players();
    let _ = writeln!(
        out,
        "{:^width$}{}{:^width$}",
        players.first().as_str(),
        GAP,
        players.second().as_str(),
        width = width
    );
    let _ = writeln!(out, "Legend: P/S/D/B/C=Ship (red when hit)  o=Miss  .=Water");
    if let Some(entry) = replayer.last_entry() {
        let _ = writeln!(out, "Last: {}", entry);
    }
    out
}

/// Clear the terminal and draw the match.
pub fn print_match(replayer: &Replayer) {
    print!("\x1b[2J\x1b[H{}", render_match(replayer));
}

/// Wins per player, most wins first, ties broken by name.
pub fn leaderboard(records: &[MatchRecord]) -> Vec<(PlayerId, usize)> {
    let mut wins: BTreeMap<PlayerId, usize> = BTreeMap::new();
    for record in records {
        wins.entry(record.players.first().clone()).or_default();
        wins.entry(record.players.second().clone()).or_default();
        if let Some(winner) = &record.winner {
            *wins.entry(winner.clone()).or_default() += 1;
        }
    }
    let mut table: Vec<_> = wins.into_iter().collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

/// One line per record: index, game id, state, and both players with `[W]`
/// beside the winner. Records without a winner are shown as aborted.
pub fn render_games(records: &[MatchRecord]) -> String {
    let mut out = String::new();
    for (index, record) in records.iter().enumerate() {
        let won = |p: &PlayerId| record.winner.as_ref() == Some(p);
        let first = record.players.first();
        let second = record.players.second();
        let first = if won(first) {
            format!("[W] {}", first)
        } else {
            first.to_string()
        };
        let second = if won(second) {
            format!("{} [W]", second)
        } else {
            second.to_string()
        };
        let state = if record.winner.is_some() {
            "finished"
        } else {
            "aborted"
        };
        let _ = writeln!(
            out,
            "{:>4}) {:<16} {:<8} {:>24} vs {:<24}",
            index, record.game_id, state, first, second
        );
    }
    out
}

pub fn render_leaderboard(table: &[(PlayerId, usize)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<24} {:>5}", "#", "Player", "Wins");
    for (rank, (player, wins)) in table.iter().enumerate() {
        let _ = writeln!(out, "{:>4}  {:<24} {:>5}", rank + 1, player.as_str(), wins);
    }
    out
}
