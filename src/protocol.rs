#![cfg(feature = "std")]

use crate::codec::EncodedBoard;
use crate::position::Position;

/// Version exchanged in the `Hello` handshake. Peers with a different
/// version are refused.
pub const PROTOCOL_VERSION: u32 = 1;

/// Frames exchanged between a match runner and a remote bot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Message {
    /// Handshake, sent first by the client and echoed by the server.
    Hello { version: u32 },
    /// Ask the bot for its fleet layout.
    GetFieldReq { game_id: String },
    GetFieldResp(EncodedBoard),
    /// Ask the bot for its next strike. Only the opponent's hits and misses
    /// are sent.
    GetStrikeReq {
        game_id: String,
        hits: Vec<Position>,
        misses: Vec<Position>,
    },
    GetStrikeResp(Position),
    /// The request could not be answered. The connection stays usable.
    Error { message: String },
}

/// What a bot exposes to the coordinating service.
#[async_trait::async_trait]
pub trait BotApi: Send {
    async fn get_field(&mut self, game_id: &str) -> anyhow::Result<EncodedBoard>;

    async fn get_strike(
        &mut self,
        game_id: &str,
        hits: &[Position],
        misses: &[Position],
    ) -> anyhow::Result<Position>;
}

#[async_trait::async_trait]
impl<B: BotApi + ?Sized> BotApi for Box<B> {
    async fn get_field(&mut self, game_id: &str) -> anyhow::Result<EncodedBoard> {
        (**self).get_field(game_id).await
    }

    async fn get_strike(
        &mut self,
        game_id: &str,
        hits: &[Position],
        misses: &[Position],
    ) -> anyhow::Result<Position> {
        (**self).get_strike(game_id, hits, misses).await
    }
}
