//! Intercepted message events

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Local};

use crate::{ConnectionId, Direction, Payload};

/// One intercepted message plus its connection metadata
///
/// Immutable once constructed. The timestamp is captured at interception
/// time, not at serialization or write time.
#[derive(Debug, Clone)]
pub struct Event {
    /// Id of the connection that carried the message
    pub connection_id: ConnectionId,

    /// Origin URL of the connection, captured at establishment
    pub connection_url: Arc<str>,

    /// Which side sent the message
    pub direction: Direction,

    /// Interception time
    pub timestamp: DateTime<Local>,

    /// Message body
    pub payload: Payload,
}

impl Event {
    /// Build an event for a text message, stamping the current time
    pub fn text(
        connection_id: ConnectionId,
        connection_url: Arc<str>,
        direction: Direction,
        text: impl Into<String>,
    ) -> Self {
        Self {
            connection_id,
            connection_url,
            direction,
            timestamp: Local::now(),
            payload: Payload::Text(text.into()),
        }
    }

    /// Build an event for a binary message, stamping the current time
    pub fn binary(
        connection_id: ConnectionId,
        connection_url: Arc<str>,
        direction: Direction,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            connection_id,
            connection_url,
            direction,
            timestamp: Local::now(),
            payload: Payload::Binary(bytes.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_event() {
        let event = Event::text(
            ConnectionId::new(7),
            Arc::from("wss://example.com/feed"),
            Direction::ClientToServer,
            "ping",
        );
        assert_eq!(event.connection_id.value(), 7);
        assert_eq!(event.connection_url.as_ref(), "wss://example.com/feed");
        assert_eq!(event.payload, Payload::Text("ping".into()));
    }

    #[test]
    fn test_binary_event() {
        let event = Event::binary(
            ConnectionId::new(1),
            Arc::from("wss://example.com"),
            Direction::ServerToClient,
            vec![0xde, 0xad],
        );
        assert!(event.payload.is_binary());
        assert_eq!(event.payload.len(), 2);
    }
}
