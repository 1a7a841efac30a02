use core::fmt;

use crate::protocol::Message;

/// Bidirectional, ordered channel of [`Message`] frames.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()>;
    /// Fails with [`PeerClosed`] when the peer ended the session between
    /// frames. Any other error is a fault.
    async fn recv(&mut self) -> anyhow::Result<Message>;
}

/// The peer closed the connection at a frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerClosed;

impl fmt::Display for PeerClosed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Connection closed by peer")
    }
}

impl std::error::Error for PeerClosed {}

pub fn is_peer_closed(err: &anyhow::Error) -> bool {
    err.is::<PeerClosed>()
}

pub mod in_memory;
pub mod tcp;
