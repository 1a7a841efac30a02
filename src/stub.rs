#![cfg(feature = "std")]

use anyhow::anyhow;

use crate::codec::EncodedBoard;
use crate::position::Position;
use crate::protocol::{BotApi, Message, PROTOCOL_VERSION};
use crate::transport::Transport;

/// Client side of the bot RPC. Implements [`BotApi`] by forwarding each
/// call over `transport`.
pub struct Stub<T: Transport> {
    transport: T,
    handshaken: bool,
}

impl<T: Transport> Stub<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            handshaken: false,
        }
    }

    async fn ensure_handshake(&mut self) -> anyhow::Result<()> {
        if self.handshaken {
            return Ok(());
        }
        self.transport
            .send(Message::Hello {
                version: PROTOCOL_VERSION,
            })
            .await?;
        match self.transport.recv().await? {
            Message::Hello { version } if version == PROTOCOL_VERSION => {
                self.handshaken = true;
                Ok(())
            }
            Message::Error { message } => Err(anyhow!("Handshake refused: {}", message)),
            other => Err(anyhow!("Unexpected handshake reply: {:?}", other)),
        }
    }

    async fn call(&mut self, request: Message) -> anyhow::Result<Message> {
        self.ensure_handshake().await?;
        self.transport.send(request).await?;
        match self.transport.recv().await? {
            Message::Error { message } => Err(anyhow!("Bot error: {}", message)),
            reply => Ok(reply),
        }
    }
}

#[async_trait::async_trait]
impl<T: Transport> BotApi for Stub<T> {
    async fn get_field(&mut self, game_id: &str) -> anyhow::Result<EncodedBoard> {
        let request = Message::GetFieldReq {
            game_id: game_id.to_string(),
        };
        match self.call(request).await? {
            Message::GetFieldResp(board) => Ok(board),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }

    async fn get_strike(
        &mut self,
        game_id: &str,
        hits: &[Position],
        misses: &[Position],
    ) -> anyhow::Result<Position> {
        let request = Message::GetStrikeReq {
            game_id: game_id.to_string(),
            hits: hits.to_vec(),
            misses: misses.to_vec(),
        };
        match self.call(request).await? {
            Message::GetStrikeResp(position) => Ok(position),
            other => Err(anyhow!("Unexpected message: {:?}", other)),
        }
    }
}
