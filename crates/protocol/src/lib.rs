//! wsrec - Protocol
//!
//! Core types that flow through the recorder:
//! - `Event` - one intercepted message plus its connection metadata
//! - `Direction` - which side of the connection sent the message
//! - `Payload` - text or opaque binary message body
//! - `ConnectionId` - process-lifetime-unique connection identifier
//! - `ConnectionRegistry` - concurrent id allocation and URL retention
//!
//! # Design Principles
//!
//! - **Immutable events**: an `Event` is constructed once at interception
//!   time and read exactly once by the serializer that formats it.
//! - **No I/O**: this crate holds data, never files or sockets.
//! - **Lock-free hot path**: id allocation is a single atomic increment;
//!   URL lookup is a sharded concurrent map read.

mod connection;
mod direction;
mod event;
mod payload;

pub use connection::{ConnectionId, ConnectionRegistry};
pub use direction::Direction;
pub use event::Event;
pub use payload::Payload;

// Re-export bytes for convenience
pub use bytes::Bytes;
