//! Sink ownership and the hot-swap protocol
//!
//! `SinkManager` is the single owner of the current sink. Every read or
//! mutation of "which sink is current" happens under one mutex, shared by
//! `append` and the swap protocol; no other component holds a sink
//! reference.
//!
//! # Hot swap
//!
//! Replacing the active sink while the drain task may be appending:
//!
//! 1. Construct the new sink fully (header written) *outside* the lock.
//!    The current sink keeps accepting appends throughout.
//! 2. Take the lock: close the current sink (footer + release), then
//!    publish the new sink.
//! 3. A close failure aborts the swap — the new sink is torn down, the old
//!    sink stays current and keeps accepting appends, the error propagates.
//! 4. An open failure aborts before the lock is ever taken; the old sink is
//!    never touched.
//!
//! The lock is the sole serialization point: a record committed before the
//! swap lands in the old file, one committed after lands in the new file,
//! and at no instant are zero or two sinks accepting appends.

use std::path::PathBuf;

use parking_lot::Mutex;

use wsrec_format::RecordFormat;

use crate::sink::Sink;
use crate::Result;

/// Owner and mutual-exclusion domain of the current sink
#[derive(Debug, Default)]
pub struct SinkManager {
    current: Mutex<Option<Sink>>,
}

impl SinkManager {
    /// Create a manager with no current sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record to the current sink, flushing before returning
    ///
    /// # Errors
    ///
    /// `NoSink` when no sink is current — the caller is informed and
    /// decides what to do with the record; `Io` on write failure.
    pub fn append(&self, record: &str) -> Result<()> {
        let mut current = self.current.lock();
        match current.as_mut() {
            Some(sink) => sink.append(record),
            None => Err(crate::RecorderError::NoSink),
        }
    }

    /// Replace the current sink with a freshly opened one
    ///
    /// Also serves as the initial open: with no current sink the close step
    /// is a no-op and the new sink is simply published.
    pub fn swap(&self, path: impl Into<PathBuf>, format: RecordFormat) -> Result<()> {
        // Step 1: unsynchronized with append — only the not-yet-visible
        // sink is touched here.
        let new_sink = Sink::open(path, format)?;

        // Step 2: the single serialization point for "which sink is
        // current".
        let mut current = self.current.lock();
        if let Some(old) = current.as_mut() {
            if let Err(e) = old.close() {
                // Step 3: abort. Dropping the new sink releases its handle;
                // the old sink stays current and still accepts appends.
                tracing::error!(
                    new_path = %new_sink.path().display(),
                    error = %e,
                    "sink swap aborted, old sink kept"
                );
                drop(new_sink);
                return Err(e);
            }
        }
        *current = Some(new_sink);
        Ok(())
    }

    /// Close the current sink, if any
    ///
    /// A no-op when no sink is current. On footer-write failure the sink
    /// stays current so the error can be retried or reported; on success
    /// the manager is left with no current sink.
    pub fn close(&self) -> Result<()> {
        let mut current = self.current.lock();
        if let Some(sink) = current.as_mut() {
            sink.close()?;
        }
        *current = None;
        Ok(())
    }

    /// Whether a sink is currently accepting appends
    pub fn is_open(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Path of the current sink, if any
    pub fn current_path(&self) -> Option<PathBuf> {
        self.current.lock().as_ref().map(|s| s.path().to_path_buf())
    }

    /// Format of the current sink, if any
    pub fn current_format(&self) -> Option<RecordFormat> {
        self.current.lock().as_ref().map(|s| s.format())
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;
