//! Durable output sink with envelope state machine
//!
//! A sink is one output file plus the format-specific envelope framing
//! around its records. The state machine is strictly one-way:
//!
//! ```text
//! Unopened ──header──→ EnvelopeOpen ──footer──→ Closed (terminal)
//! ```
//!
//! The format is fixed at open time; a sink is never reformatted in place.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use wsrec_format::RecordFormat;

use crate::{RecorderError, Result};

/// Envelope lifecycle state of a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkState {
    /// Destination not created yet
    Unopened,
    /// Header written; records may be appended
    EnvelopeOpen,
    /// Footer written; no further writes permitted
    Closed,
}

/// One durable output destination
#[derive(Debug)]
pub struct Sink {
    path: PathBuf,
    format: RecordFormat,
    state: SinkState,
    writer: Option<BufWriter<File>>,
}

impl Sink {
    /// Create the destination file and write the envelope header
    ///
    /// On any failure the partially created destination handle is released
    /// and the error propagates; no sink comes into existence.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for `raw`; `Io` for filesystem failures.
    pub fn open(path: impl Into<PathBuf>, format: RecordFormat) -> Result<Self> {
        let path = path.into();
        if !format.is_supported() {
            return Err(RecorderError::UnsupportedFormat(format));
        }

        let file = File::create(&path).map_err(|e| RecorderError::io(&path, e))?;
        let mut sink = Self {
            path,
            format,
            state: SinkState::Unopened,
            writer: Some(BufWriter::new(file)),
        };

        sink.write_all(format.header())?;
        sink.state = SinkState::EnvelopeOpen;

        tracing::debug!(path = %sink.path.display(), format = %format, "sink opened");
        Ok(sink)
    }

    /// Append one record followed by a newline, flushing before returning
    ///
    /// The flush bounds loss on abrupt process termination to the record
    /// currently in flight.
    pub fn append(&mut self, record: &str) -> Result<()> {
        if self.state != SinkState::EnvelopeOpen {
            return Err(RecorderError::SinkClosed {
                path: self.path.display().to_string(),
            });
        }
        self.write_all(record)?;
        self.write_all("\n")
    }

    /// Write the envelope footer and release the destination
    ///
    /// On failure the sink stays `EnvelopeOpen` and keeps accepting
    /// appends, so a failed close during a swap leaves a working sink
    /// behind.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            SinkState::Closed => {
                return Err(RecorderError::SinkClosed {
                    path: self.path.display().to_string(),
                })
            }
            SinkState::Unopened => {
                self.state = SinkState::Closed;
                self.writer = None;
                return Ok(());
            }
            SinkState::EnvelopeOpen => {}
        }

        self.write_all(self.format.footer())?;
        self.state = SinkState::Closed;
        self.writer = None;

        tracing::debug!(path = %self.path.display(), "sink closed");
        Ok(())
    }

    /// Destination path
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format fixed at open time
    #[inline]
    pub fn format(&self) -> RecordFormat {
        self.format
    }

    /// Current envelope state
    #[inline]
    pub fn state(&self) -> SinkState {
        self.state
    }

    /// Write text and force it to the file
    fn write_all(&mut self, text: &str) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| RecorderError::SinkClosed {
            path: self.path.display().to_string(),
        })?;
        writer
            .write_all(text.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| RecorderError::io(&self.path, e))
    }
}
