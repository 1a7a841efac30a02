#![cfg(feature = "std")]

//! Paced, cancellable replay on a background task.
//!
//! The task owns the [`Replayer`] and is its only writer. Observers see it
//! through the `on_step` callback, which runs on the task after every step.
//! Cancellation is checked at each step boundary and while waiting out the
//! delay, never in the middle of a step.

use std::time::Duration;

use anyhow::anyhow;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::replay::Replayer;

/// Handle to a running replay.
///
/// Dropping the handle cancels the replay.
pub struct ReplayHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<Replayer>,
}

impl ReplayHandle {
    /// Ask the replay to stop at the next step boundary.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task and take back the replayer, in its final state or
    /// wherever cancellation left it.
    pub async fn join(self) -> anyhow::Result<Replayer> {
        let ReplayHandle { cancel, task } = self;
        let result = task.await.map_err(|e| anyhow!("Replay task failed: {}", e));
        drop(cancel);
        result
    }
}

fn cancelled(rx: &watch::Receiver<bool>) -> bool {
    *rx.borrow() || rx.has_changed().is_err()
}

/// Run `replayer` to the end on a new task, calling `on_step` after every
/// step and sleeping `delay` between steps.
pub fn spawn_replay<F>(mut replayer: Replayer, delay: Duration, mut on_step: F) -> ReplayHandle
where
    F: FnMut(&Replayer) + Send + 'static,
{
    let (cancel, mut rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        while !cancelled(&rx) {
            if replayer.step().is_none() {
                break;
            }
            on_step(&replayer);
            if replayer.is_finished() {
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = rx.changed() => break,
            }
        }
        log::debug!("Replay stopped at entry {}", replayer.cursor());
        replayer
    });
    ReplayHandle { cancel, task }
}

/// Holds at most one running replay for a view.
#[derive(Default)]
pub struct ReplaySlot {
    current: Option<ReplayHandle>,
}

impl ReplaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is running and wait for it to stop, then start
    /// `replayer`. Once this returns, the previous replay's `on_step` will
    /// not run again.
    pub async fn start<F>(&mut self, replayer: Replayer, delay: Duration, on_step: F)
    where
        F: FnMut(&Replayer) + Send + 'static,
    {
        if let Some(previous) = self.current.take() {
            previous.cancel();
            if let Err(e) = previous.join().await {
                log::warn!("Previous replay did not stop cleanly: {}", e);
            }
        }
        self.current = Some(spawn_replay(replayer, delay, on_step));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the current replay, if any.
    pub async fn join(&mut self) -> anyhow::Result<Option<Replayer>> {
        match self.current.take() {
            Some(handle) => handle.join().await.map(Some),
            None => Ok(None),
        }
    }
}
