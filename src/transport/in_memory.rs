use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use tokio::task::yield_now;

use crate::protocol::Message;
use crate::transport::{PeerClosed, Transport};

/// In-process transport: two queues shared by a connected pair.
pub struct InMemoryTransport {
    recv_queue: Arc<Mutex<VecDeque<Message>>>,
    send_queue: Arc<Mutex<VecDeque<Message>>>,
}

impl InMemoryTransport {
    pub fn pair() -> (Self, Self) {
        let q1 = Arc::new(Mutex::new(VecDeque::new()));
        let q2 = Arc::new(Mutex::new(VecDeque::new()));
        (
            Self {
                recv_queue: q1.clone(),
                send_queue: q2.clone(),
            },
            Self {
                recv_queue: q2,
                send_queue: q1,
            },
        )
    }
}

#[async_trait::async_trait]
impl Transport for InMemoryTransport {
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        // the peer's recv side is the only other holder
        if Arc::strong_count(&self.send_queue) == 1 {
            return Err(PeerClosed.into());
        }
        let mut queue = self
            .send_queue
            .lock()
            .map_err(|_| anyhow!("Queue lock poisoned"))?;
        queue.push_back(msg);
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<Message> {
        loop {
            let next = self
                .recv_queue
                .lock()
                .map_err(|_| anyhow!("Queue lock poisoned"))?
                .pop_front();
            if let Some(msg) = next {
                return Ok(msg);
            }
            if Arc::strong_count(&self.recv_queue) == 1 {
                return Err(PeerClosed.into());
            }
            yield_now().await;
        }
    }
}
