//! Serialization error types

use thiserror::Error;

use crate::RecordFormat;

/// Result type for serialization operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors produced while serializing a single event
///
/// Every variant is recoverable at the call site: the producing path drops
/// the one affected record and reports the failure, it never stops the
/// recording pipeline.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The configured format has no serializer
    #[error("output format '{0}' is not implemented")]
    Unsupported(RecordFormat),

    /// A binary payload had to be embedded as text but is not valid UTF-8
    #[error("binary payload of {len} bytes is not valid UTF-8")]
    InvalidUtf8 {
        /// Payload length in bytes
        len: usize,
        /// Underlying decode error
        #[source]
        source: std::str::Utf8Error,
    },

    /// The configured strftime pattern was rejected by the formatter
    #[error("invalid time format pattern '{pattern}'")]
    InvalidTimeFormat {
        /// The offending pattern
        pattern: String,
    },
}
