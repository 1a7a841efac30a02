#![cfg(feature = "std")]

//! The agent: a random-placement, random-strike bot and the TCP service
//! that exposes it.

use std::future::Future;
use std::io;
use std::net::SocketAddr;

use anyhow::anyhow;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;

use crate::codec::{self, EncodedBoard};
use crate::common::BoardError;
use crate::planner::PlacementPlanner;
use crate::position::Position;
use crate::protocol::BotApi;
use crate::skeleton::Skeleton;
use crate::targeting::select_target_from_lists;
use crate::transport::tcp::TcpTransport;

/// Places its fleet at random and strikes uniformly among unresolved cells.
///
/// Requests are independent: the bot keeps no per-game state, so one
/// instance may serve any number of games.
pub struct RandomBot {
    name: String,
    planner: PlacementPlanner,
    rng: SmallRng,
}

impl RandomBot {
    pub fn new(name: impl Into<String>, rng: SmallRng) -> Self {
        Self {
            name: name.into(),
            planner: PlacementPlanner::default(),
            rng,
        }
    }

    pub fn from_seed(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, SmallRng::seed_from_u64(seed))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait::async_trait]
impl BotApi for RandomBot {
    async fn get_field(&mut self, game_id: &str) -> anyhow::Result<EncodedBoard> {
        log::info!("[{}] GetField for game {}", self.name, game_id);
        let board = self.planner.plan(&mut self.rng)?;
        Ok(EncodedBoard::from_grid(codec::encode_grid(&board)))
    }

    async fn get_strike(
        &mut self,
        game_id: &str,
        hits: &[Position],
        misses: &[Position],
    ) -> anyhow::Result<Position> {
        log::info!(
            "[{}] GetStrike for game {} ({} hits, {} misses)",
            self.name,
            game_id,
            hits.len(),
            misses.len()
        );
        match select_target_from_lists(&mut self.rng, hits, misses) {
            Ok(position) => Ok(position),
            Err(BoardError::NoLegalTarget) => {
                log::warn!("[{}] no legal target left in game {}", self.name, game_id);
                Err(anyhow!(BoardError::NoLegalTarget))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Pause after a failed accept, so a persistent failure such as running out
/// of file descriptors does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Accept connections on `listener` forever, serving each one with a fresh
/// bot from `factory` on its own task. A failed accept is logged and the
/// service keeps listening.
pub async fn serve<B, F>(listener: TcpListener, factory: F) -> anyhow::Result<()>
where
    B: BotApi + 'static,
    F: FnMut() -> B,
{
    log::info!("Bot listening on {}", listener.local_addr()?);
    let listener = &listener;
    accept_loop(move || listener.accept(), factory).await
}

async fn accept_loop<A, Fut, B, F>(mut accept: A, mut factory: F) -> anyhow::Result<()>
where
    A: FnMut() -> Fut,
    Fut: Future<Output = io::Result<(TcpStream, SocketAddr)>>,
    B: BotApi + 'static,
    F: FnMut() -> B,
{
    loop {
        let (stream, peer) = match accept().await {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("Accept failed: {}", e);
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        log::debug!("Connection from {}", peer);
        let mut skeleton = Skeleton::new(factory(), TcpTransport::new(stream));
        tokio::spawn(async move {
            if let Err(e) = skeleton.run().await {
                log::warn!("Connection from {} ended: {:#}", peer, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::Stub;
    use std::io::ErrorKind;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_accept_keeps_serving() -> anyhow::Result<()> {
        let listener = Arc::new(TcpListener::bind("127.0.0.1:0").await?);
        let addr = listener.local_addr()?;
        let mut failures = 2;
        let accept = move || {
            let listener = listener.clone();
            let fail = failures > 0;
            failures -= 1;
            async move {
                if fail {
                    Err(io::Error::from(ErrorKind::ConnectionAborted))
                } else {
                    listener.accept().await
                }
            }
        };
        let service = tokio::spawn(accept_loop(accept, || RandomBot::from_seed("bot", 4)));

        let mut stub = Stub::new(TcpTransport::connect(addr).await?);
        let field = stub.get_field("after-failures").await?;
        assert_eq!(field.grid.lines().count(), 10);
        assert!(!service.is_finished());

        service.abort();
        Ok(())
    }
}
