//! Per-plugin event queues.
//!
//! Unbounded by default. A bounded mailbox drops the newest event when full,
//! so the event loop never waits on a slow plugin and the events a plugin
//! does receive stay in broadcast order.

use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::warn;

use crate::event::Event;

#[derive(Debug)]
enum Sender {
    Unbounded(mpsc::UnboundedSender<Arc<Event>>),
    Bounded(mpsc::Sender<Arc<Event>>),
}

#[derive(Debug)]
enum Receiver {
    Unbounded(mpsc::UnboundedReceiver<Arc<Event>>),
    Bounded(mpsc::Receiver<Arc<Event>>),
}

/// Sending side of one plugin's queue, held by the event loop.
#[derive(Debug)]
pub struct Mailbox {
    plugin: String,
    sender: Sender,
    dropped: u64,
}

/// Receiving side, owned by the plugin's actor task.
#[derive(Debug)]
pub struct Inbox {
    receiver: Receiver,
}

/// Create a mailbox pair. `capacity` of `None` means unbounded.
pub fn channel(plugin: impl Into<String>, capacity: Option<usize>) -> (Mailbox, Inbox) {
    let (sender, receiver) = match capacity {
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (Sender::Unbounded(tx), Receiver::Unbounded(rx))
        }
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity.max(1));
            (Sender::Bounded(tx), Receiver::Bounded(rx))
        }
    };

    let mailbox = Mailbox {
        plugin: plugin.into(),
        sender,
        dropped: 0,
    };
    (mailbox, Inbox { receiver })
}

impl Mailbox {
    pub fn plugin(&self) -> &str {
        &self.plugin
    }

    /// Events dropped so far because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Enqueue without waiting. Returns `false` once the actor is gone.
    pub fn deliver(&mut self, event: Arc<Event>) -> bool {
        match &self.sender {
            Sender::Unbounded(tx) => tx.send(event).is_ok(),
            Sender::Bounded(tx) => match tx.try_send(event) {
                Ok(()) => true,
                Err(TrySendError::Full(event)) => {
                    self.dropped += 1;
                    warn!(
                        plugin = %self.plugin,
                        command = %event.command,
                        dropped = self.dropped,
                        "Plugin mailbox full, dropping event"
                    );
                    true
                }
                Err(TrySendError::Closed(_)) => false,
            },
        }
    }
}

impl Inbox {
    /// Next event, or `None` once the event loop is gone.
    pub async fn recv(&mut self) -> Option<Arc<Event>> {
        match &mut self.receiver {
            Receiver::Unbounded(rx) => rx.recv().await,
            Receiver::Bounded(rx) => rx.recv().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use slirc_proto::Message;

    fn event(command: &str) -> Arc<Event> {
        Arc::new(Event::new(Message::new(command, ["x"]), Utc::now()))
    }

    #[tokio::test]
    async fn test_unbounded_preserves_order() {
        let (mut mailbox, mut inbox) = channel("p", None);
        for i in 0..100 {
            assert!(mailbox.deliver(event(&i.to_string())));
        }
        for i in 0..100 {
            assert_eq!(inbox.recv().await.unwrap().command, i.to_string());
        }
        assert_eq!(mailbox.dropped(), 0);
    }

    #[tokio::test]
    async fn test_bounded_drops_newest_when_full() {
        let (mut mailbox, mut inbox) = channel("slow", Some(2));
        for command in ["A", "B", "C", "D"] {
            assert!(mailbox.deliver(event(command)));
        }
        assert_eq!(mailbox.dropped(), 2);

        assert_eq!(inbox.recv().await.unwrap().command, "A");
        assert_eq!(inbox.recv().await.unwrap().command, "B");

        // Room again after draining
        assert!(mailbox.deliver(event("E")));
        assert_eq!(inbox.recv().await.unwrap().command, "E");
    }

    #[tokio::test]
    async fn test_deliver_reports_closed_actor() {
        let (mut unbounded, inbox) = channel("a", None);
        drop(inbox);
        assert!(!unbounded.deliver(event("A")));

        let (mut bounded, inbox) = channel("b", Some(4));
        drop(inbox);
        assert!(!bounded.deliver(event("A")));
    }

    #[tokio::test]
    async fn test_inbox_ends_when_mailbox_dropped() {
        let (mailbox, mut inbox) = channel("p", Some(1));
        drop(mailbox);
        assert!(inbox.recv().await.is_none());
    }
}
