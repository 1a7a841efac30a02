#![cfg(feature = "std")]

//! Drives a whole match between two bots and records it.

use crate::codec;
use crate::config::GAME_TURNS_LIMIT;
use crate::game::{MatchGame, Phase};
use crate::match_log::{MatchLog, PlayerId, PlayerPair, Seat};
use crate::protocol::BotApi;

/// Outcome of a finished (or aborted) match.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    pub game_id: String,
    pub players: PlayerPair,
    /// `None` when the match was interrupted by an error.
    pub winner: Option<PlayerId>,
    pub log: MatchLog,
}

/// Run a match between `first` and `second`. The first player places and
/// strikes first.
///
/// Agent failures and rejected actions do not fail the call: they are
/// recorded as an `Error` entry and the match ends without a winner.
pub async fn run_match<A, B>(
    game_id: &str,
    players: PlayerPair,
    first: &mut A,
    second: &mut B,
) -> MatchRecord
where
    A: BotApi + ?Sized,
    B: BotApi + ?Sized,
{
    let mut game = MatchGame::new(game_id, players.clone());
    if let Err(e) = drive(&mut game, first, second).await {
        log::warn!("Game {} interrupted: {:#}", game_id, e);
        game.record_error(format!("{:#}", e));
    }
    let winner = game.winner().cloned();
    if let Some(w) = &winner {
        log::info!("Game {} won by {}", game_id, w);
    }
    MatchRecord {
        game_id: game_id.to_string(),
        players,
        winner,
        log: game.into_log(),
    }
}

async fn drive<A, B>(game: &mut MatchGame, first: &mut A, second: &mut B) -> anyhow::Result<()>
where
    A: BotApi + ?Sized,
    B: BotApi + ?Sized,
{
    let game_id = game.game_id().to_string();
    for seat in [Seat::First, Seat::Second] {
        let encoded = match seat {
            Seat::First => first.get_field(&game_id).await?,
            Seat::Second => second.get_field(&game_id).await?,
        };
        let board = codec::decode(&encoded)?;
        let player = game.players().get(seat).clone();
        game.accept_field(&player, &board)?;
    }

    for _ in 0..GAME_TURNS_LIMIT {
        let attacker = match game.phase() {
            Phase::AwaitingStrike(seat) => seat,
            Phase::GameOver { .. } => return Ok(()),
            Phase::AwaitingField(_) => anyhow::bail!("fleets were not accepted"),
        };
        let (hits, misses) = match game.opponent_marks(attacker) {
            Some((hits, misses)) => (
                hits.iter().collect::<Vec<_>>(),
                misses.iter().collect::<Vec<_>>(),
            ),
            None => anyhow::bail!("opponent has no board"),
        };
        let position = match attacker {
            Seat::First => first.get_strike(&game_id, &hits, &misses).await?,
            Seat::Second => second.get_strike(&game_id, &hits, &misses).await?,
        };
        let player = game.players().get(attacker).clone();
        let outcome = game.accept_strike(&player, position)?;
        log::debug!("{} strikes {}: {:?}", player, position, outcome);
    }
    if matches!(game.phase(), Phase::GameOver { .. }) {
        return Ok(());
    }
    anyhow::bail!("aborted after {} turns", GAME_TURNS_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::RandomBot;
    use crate::codec::EncodedBoard;
    use crate::match_log::LogEntry;
    use crate::position::Position;

    struct Broken;

    #[async_trait::async_trait]
    impl BotApi for Broken {
        async fn get_field(&mut self, _game_id: &str) -> anyhow::Result<EncodedBoard> {
            Ok(EncodedBoard::from_grid(vec![".........."; 10].join("\n")))
        }

        async fn get_strike(
            &mut self,
            _game_id: &str,
            _hits: &[Position],
            _misses: &[Position],
        ) -> anyhow::Result<Position> {
            anyhow::bail!("no strikes here")
        }
    }

    fn pair() -> PlayerPair {
        PlayerPair::new(PlayerId::new("p1"), PlayerId::new("p2")).unwrap()
    }

    #[tokio::test]
    async fn random_bots_finish() {
        let mut a = RandomBot::from_seed("a", 1);
        let mut b = RandomBot::from_seed("b", 2);
        let record = run_match("g", pair(), &mut a, &mut b).await;
        let winner = record.winner.clone().unwrap();
        assert_eq!(record.log.winner(), Some(&winner));
        assert!(matches!(
            record.log.entries().last(),
            Some(LogEntry::GameOver { .. })
        ));
    }

    #[tokio::test]
    async fn empty_fleet_is_recorded_as_error() {
        let mut a = RandomBot::from_seed("a", 1);
        let mut b = Broken;
        let record = run_match("g", pair(), &mut a, &mut b).await;
        assert_eq!(record.winner, None);
        assert_eq!(record.log.len(), 2);
        assert!(matches!(record.log.get(1), Some(LogEntry::Error { .. })));
    }
}
