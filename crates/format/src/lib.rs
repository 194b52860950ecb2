//! wsrec - Format
//!
//! Pure serialization of intercepted message events into textual records.
//!
//! # Architecture
//!
//! ```text
//! [Event] ──→ serialize(&Event, &FormatOptions) ──→ [String record]
//!                         │
//!              ┌──────────┼──────────┐
//!             xml        csv        json
//! ```
//!
//! # Key Design
//!
//! - **Pure**: no I/O, no shared mutable state; safe to call concurrently
//!   from every producer without synchronization.
//! - **Enum dispatch**: one serializer module per `RecordFormat` variant,
//!   selected once per call.
//! - **Fixed field order**: id, direction, url, time, data — only fields
//!   enabled in the options snapshot are emitted.
//! - **Envelope ownership**: `RecordFormat` knows its file header/footer so
//!   the sink never special-cases formats.
//!
//! The serialized record does not include a trailing newline; the component
//! that commits records to the file appends it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use wsrec_format::{serialize, FormatOptions, RecordFormat};
//! use wsrec_protocol::{ConnectionId, Direction, Event};
//!
//! let event = Event::text(
//!     ConnectionId::new(1),
//!     Arc::from("wss://example.com/feed"),
//!     Direction::ClientToServer,
//!     "ping",
//! );
//! let options = FormatOptions {
//!     format: RecordFormat::Json,
//!     ..Default::default()
//! };
//! let record = serialize(&event, &options).unwrap();
//! assert!(record.starts_with('{'));
//! assert!(record.ends_with("},"));
//! ```

mod csv;
mod error;
mod fields;
mod json;
mod options;
mod record_format;
mod xml;

pub use error::{FormatError, Result};
pub use options::FormatOptions;
pub use record_format::RecordFormat;

use wsrec_protocol::Event;

/// Serialize one event into a textual record
///
/// The options snapshot is read-only for the duration of the call; callers
/// that support live reconfiguration swap the whole snapshot between calls,
/// never mid-record.
///
/// # Errors
///
/// - `FormatError::Unsupported` for `RecordFormat::Raw`
/// - `FormatError::InvalidUtf8` when a binary payload must be embedded as
///   text but does not decode
/// - `FormatError::InvalidTimeFormat` when the configured time pattern is
///   rejected by the formatter
pub fn serialize(event: &Event, options: &FormatOptions) -> Result<String> {
    match options.format {
        RecordFormat::Xml => xml::serialize(event, options),
        RecordFormat::Csv => csv::serialize(event, options),
        RecordFormat::Json => json::serialize(event, options),
        RecordFormat::Raw => Err(FormatError::Unsupported(RecordFormat::Raw)),
    }
}
