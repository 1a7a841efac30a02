#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::protocol::{BotApi, Message, PROTOCOL_VERSION};
use crate::transport::{is_peer_closed, Transport};

/// Server side of the bot RPC: answers requests on `transport` with `bot`.
pub struct Skeleton<B: BotApi, T: Transport> {
    bot: B,
    transport: T,
}

impl<B: BotApi, T: Transport> Skeleton<B, T> {
    pub fn new(bot: B, transport: T) -> Self {
        Self { bot, transport }
    }

    /// Handshake, then answer requests until the peer closes the
    /// connection. A malformed frame or a timeout ends the session with an
    /// error.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.transport
                    .send(Message::Hello {
                        version: PROTOCOL_VERSION,
                    })
                    .await?;
            }
            Message::Hello { version } => {
                let message = format!(
                    "Unsupported protocol version {} (expected {})",
                    version, PROTOCOL_VERSION
                );
                self.transport
                    .send(Message::Error {
                        message: message.clone(),
                    })
                    .await?;
                return Err(anyhow!(message));
            }
            _ => return Err(anyhow!("Expected handshake")),
        }

        loop {
            let msg = match self.transport.recv().await {
                Ok(msg) => msg,
                Err(e) if is_peer_closed(&e) => return Ok(()),
                Err(e) => return Err(e),
            };
            let reply = match msg {
                Message::GetFieldReq { game_id } => match self.bot.get_field(&game_id).await {
                    Ok(board) => Message::GetFieldResp(board),
                    Err(e) => Message::Error {
                        message: e.to_string(),
                    },
                },
                Message::GetStrikeReq {
                    game_id,
                    hits,
                    misses,
                } => match self.bot.get_strike(&game_id, &hits, &misses).await {
                    Ok(position) => Message::GetStrikeResp(position),
                    Err(e) => Message::Error {
                        message: e.to_string(),
                    },
                },
                other => Message::Error {
                    message: format!("Unexpected request: {:?}", other),
                },
            };
            self.transport.send(reply).await?;
        }
    }
}
