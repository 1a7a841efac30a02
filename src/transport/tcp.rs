use std::io::ErrorKind;

use anyhow::anyhow;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};

use crate::protocol::Message;
use crate::transport::{PeerClosed, Transport};

/// Default timeout for a single send or receive (30 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest frame accepted, in bytes.
const MAX_MESSAGE_SIZE: u32 = 1_000_000;

/// Length-prefixed bincode frames over a TCP stream. Each frame is a
/// big-endian `u32` byte count followed by the encoded [`Message`].
pub struct TcpTransport {
    stream: TcpStream,
    timeout_duration: Duration,
    max_message_size: u32,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_timeout(stream, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(stream: TcpStream, timeout_duration: Duration) -> Self {
        Self {
            stream,
            timeout_duration,
            max_message_size: MAX_MESSAGE_SIZE,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }

    pub fn peer_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }
}

fn io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        ErrorKind::UnexpectedEof | ErrorKind::BrokenPipe => anyhow!("Connection closed by peer"),
        ErrorKind::ConnectionReset => anyhow!("Connection reset by peer"),
        _ => anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let data =
            bincode::serialize(&msg).map_err(|e| anyhow!("Serialization error: {}", e))?;
        if data.len() > self.max_message_size as usize {
            return Err(anyhow!(
                "Message too large: {} bytes (max: {})",
                data.len(),
                self.max_message_size
            ));
        }

        let send_op = async {
            let len = (data.len() as u32).to_be_bytes();
            self.stream.write_all(&len).await.map_err(io_error)?;
            self.stream.write_all(&data).await.map_err(io_error)?;
            anyhow::Ok(())
        };
        timeout(self.timeout_duration, send_op)
            .await
            .map_err(|_| anyhow!("Send timeout after {:?}", self.timeout_duration))?
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        let max = self.max_message_size;
        let recv_op = async {
            let mut len_buf = [0u8; 4];
            self.stream
                .read_exact(&mut len_buf)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => PeerClosed.into(),
                    _ => io_error(e),
                })?;
            let len = u32::from_be_bytes(len_buf);
            if len == 0 {
                return Err(anyhow!("Invalid message length: 0"));
            }
            if len > max {
                return Err(anyhow!("Message too large: {} bytes (max: {})", len, max));
            }

            let mut buf = vec![0u8; len as usize];
            self.stream
                .read_exact(&mut buf)
                .await
                .map_err(|e| match e.kind() {
                    ErrorKind::UnexpectedEof => anyhow!("Connection closed mid-frame"),
                    _ => io_error(e),
                })?;
            let msg = bincode::deserialize(&buf)
                .map_err(|e| anyhow!("Deserialization error: {}", e))?;
            anyhow::Ok(msg)
        };
        timeout(self.timeout_duration, recv_op)
            .await
            .map_err(|_| anyhow!("Receive timeout after {:?}", self.timeout_duration))?
    }
}
