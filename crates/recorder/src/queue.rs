//! Hand-off queue between producers and the drain task
//!
//! An unbounded FIFO of serialized records. Producers on any thread push
//! without blocking; the single drain task blocks on `pop` until a record
//! arrives. Records come out in the exact order they went in, across all
//! producers, because every producer writes into the one shared channel.
//!
//! The queue is deliberately unbounded: producers run on the host's
//! message-delivery paths and must never be stalled by disk latency. If the
//! sink is unhealthy the queue grows instead.

use tokio::sync::mpsc;

/// Create a connected hand-off queue pair
pub fn record_queue() -> (RecordSender, RecordReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        RecordSender { sender },
        RecordReceiver { receiver },
    )
}

/// Producer half of the hand-off queue
#[derive(Debug, Clone)]
pub struct RecordSender {
    sender: mpsc::UnboundedSender<String>,
}

impl RecordSender {
    /// Push a serialized record without blocking
    ///
    /// Fails only when the drain side is gone, returning the record to the
    /// caller; there is no transient failure mode.
    #[inline]
    pub fn push(&self, record: String) -> std::result::Result<(), String> {
        self.sender.send(record).map_err(|e| e.0)
    }

    /// Whether the drain side has been dropped
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Consumer half of the hand-off queue
#[derive(Debug)]
pub struct RecordReceiver {
    receiver: mpsc::UnboundedReceiver<String>,
}

impl RecordReceiver {
    /// Wait for the next record
    ///
    /// Returns `None` once every sender has been dropped and the queue is
    /// drained — the orderly-shutdown signal for the drain task.
    #[inline]
    pub async fn pop(&mut self) -> Option<String> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fifo_order() {
        let (sender, mut receiver) = record_queue();
        for i in 0..10 {
            sender.push(format!("record-{}", i)).unwrap();
        }
        for i in 0..10 {
            assert_eq!(receiver.pop().await.unwrap(), format!("record-{}", i));
        }
    }

    #[tokio::test]
    async fn test_pop_returns_none_after_senders_drop() {
        let (sender, mut receiver) = record_queue();
        sender.push("last".into()).unwrap();
        drop(sender);

        assert_eq!(receiver.pop().await.unwrap(), "last");
        assert!(receiver.pop().await.is_none());
    }

    #[tokio::test]
    async fn test_push_fails_when_receiver_gone() {
        let (sender, receiver) = record_queue();
        drop(receiver);

        assert!(sender.is_closed());
        let rejected = sender.push("orphan".into()).unwrap_err();
        assert_eq!(rejected, "orphan");
    }

    #[tokio::test]
    async fn test_cloned_senders_share_one_queue() {
        let (sender, mut receiver) = record_queue();
        let clone = sender.clone();

        sender.push("a".into()).unwrap();
        clone.push("b".into()).unwrap();
        drop(sender);
        drop(clone);

        assert_eq!(receiver.pop().await.unwrap(), "a");
        assert_eq!(receiver.pop().await.unwrap(), "b");
        assert!(receiver.pop().await.is_none());
    }
}
