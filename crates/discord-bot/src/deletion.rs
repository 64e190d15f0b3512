//! Delayed message deletion.
//!
//! Announcements expire after a day and command replies after a few
//! seconds. Both go through one in-memory queue drained by a single worker
//! task. Pending deletions are not persisted: after a restart those
//! messages stay in the channel.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::Duration;

use serenity::model::id::{ChannelId, MessageId};
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::client::ChatClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PendingDeletion {
    due: Instant,
    channel: ChannelId,
    message: MessageId,
}

/// Handle to the deletion worker. Cheap to clone.
#[derive(Clone)]
pub struct DeletionQueue {
    tx: mpsc::UnboundedSender<PendingDeletion>,
}

impl DeletionQueue {
    /// Spawn the worker on the current tokio runtime.
    pub fn spawn(client: Arc<dyn ChatClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(client, rx));
        Self { tx }
    }

    /// Delete `message` once `after` has elapsed.
    pub fn schedule(&self, channel: ChannelId, message: MessageId, after: Duration) {
        let pending = PendingDeletion {
            due: Instant::now() + after,
            channel,
            message,
        };
        if self.tx.send(pending).is_err() {
            debug!(message = message.0, "Deletion worker stopped; message will not expire");
        }
    }
}

async fn run(client: Arc<dyn ChatClient>, mut rx: mpsc::UnboundedReceiver<PendingDeletion>) {
    let mut queue: BinaryHeap<Reverse<PendingDeletion>> = BinaryHeap::new();

    loop {
        let next_due = queue.peek().map(|Reverse(pending)| pending.due);

        tokio::select! {
            received = rx.recv() => match received {
                Some(pending) => queue.push(Reverse(pending)),
                // Every handle dropped: remaining deletions are abandoned.
                None => break,
            },
            _ = wait_until(next_due) => {
                let now = Instant::now();
                while let Some(Reverse(pending)) = queue.peek().copied() {
                    if pending.due > now {
                        break;
                    }
                    queue.pop();
                    // Already-deleted messages are expected here.
                    if let Err(e) = client.delete_message(pending.channel, pending.message).await {
                        debug!(message = pending.message.0, "Scheduled deletion skipped: {}", e);
                    }
                }
            }
        }
    }
}

async fn wait_until(due: Option<Instant>) {
    match due {
        Some(due) => sleep_until(due).await,
        None => std::future::pending().await,
    }
}
