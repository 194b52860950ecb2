//! Recorder metrics

use std::sync::atomic::{AtomicU64, Ordering};

/// In-process counters for the recording pipeline
///
/// Updated lock-free from producers and the drain task; read via
/// `snapshot()`.
#[derive(Debug, Default)]
pub struct RecorderMetrics {
    /// Records serialized and handed to the queue
    records_enqueued: AtomicU64,

    /// Records committed to the sink
    records_written: AtomicU64,

    /// Events dropped because serialization failed
    serialize_errors: AtomicU64,

    /// Records dropped because the sink write failed
    write_errors: AtomicU64,

    /// Records dropped because no sink was open
    records_dropped_no_sink: AtomicU64,

    /// Messages skipped while recording was disabled
    records_skipped_disabled: AtomicU64,

    /// Messages dropped for an unregistered connection id
    unknown_connection: AtomicU64,

    /// Successful output file swaps
    sink_swaps: AtomicU64,
}

impl RecorderMetrics {
    /// Create a zeroed metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_enqueued(&self) {
        self.records_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_written(&self) {
        self.records_written.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_serialize_error(&self) {
        self.serialize_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped_no_sink(&self) {
        self.records_dropped_no_sink.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_skipped_disabled(&self) {
        self.records_skipped_disabled.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_unknown_connection(&self) {
        self.unknown_connection.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_sink_swap(&self) {
        self.sink_swaps.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time snapshot of all counters
    pub fn snapshot(&self) -> RecorderMetricsSnapshot {
        RecorderMetricsSnapshot {
            records_enqueued: self.records_enqueued.load(Ordering::Relaxed),
            records_written: self.records_written.load(Ordering::Relaxed),
            serialize_errors: self.serialize_errors.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            records_dropped_no_sink: self.records_dropped_no_sink.load(Ordering::Relaxed),
            records_skipped_disabled: self.records_skipped_disabled.load(Ordering::Relaxed),
            unknown_connection: self.unknown_connection.load(Ordering::Relaxed),
            sink_swaps: self.sink_swaps.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of recorder metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderMetricsSnapshot {
    pub records_enqueued: u64,
    pub records_written: u64,
    pub serialize_errors: u64,
    pub write_errors: u64,
    pub records_dropped_no_sink: u64,
    pub records_skipped_disabled: u64,
    pub unknown_connection: u64,
    pub sink_swaps: u64,
}
