//! Recorder error types

use std::io;

use thiserror::Error;

use wsrec_format::RecordFormat;

/// Result type for recorder operations
pub type Result<T> = std::result::Result<T, RecorderError>;

/// Errors from sink and queue operations
#[derive(Debug, Error)]
pub enum RecorderError {
    /// The format cannot back a sink (currently only `raw`)
    #[error("cannot open a sink for unimplemented format '{0}'")]
    UnsupportedFormat(RecordFormat),

    /// Filesystem failure while opening, writing, or closing a sink
    #[error("sink I/O failure on '{path}': {source}")]
    Io {
        /// Destination path of the failing sink
        path: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An append arrived while no sink was current
    #[error("no sink is open to receive the record")]
    NoSink,

    /// An operation reached a sink that already wrote its footer
    #[error("sink on '{path}' is already closed")]
    SinkClosed {
        /// Destination path of the closed sink
        path: String,
    },
}

impl RecorderError {
    /// Wrap an I/O error with the sink path it occurred on
    pub(crate) fn io(path: &std::path::Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
