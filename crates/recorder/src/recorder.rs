//! Host-facing recorder facade
//!
//! The host event source calls the `on_*` entry points from any thread or
//! task; they do only CPU work (serialize + queue push) and report
//! failures instead of raising, so the host's delivery paths are never
//! stalled or crashed by the recorder.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;
use chrono::Local;
use tokio::task::JoinHandle;

use wsrec_format::{serialize, FormatOptions};
use wsrec_protocol::{Bytes, ConnectionId, ConnectionRegistry, Direction, Event};

use crate::drain::drain_records;
use crate::queue::{record_queue, RecordSender};
use crate::{RecorderMetrics, RecorderMetricsSnapshot, Result, SinkManager};

/// Default output file name, stamped with the startup time
///
/// `websocket-messages-<timestamp>.dat` in the current directory.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "websocket-messages-{}.dat",
        Local::now().format("%Y-%m-%d_%H-%M-%S-%3f")
    ))
}

/// Startup configuration for a recorder
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Initial output file path
    pub output: PathBuf,

    /// Initial serialization options; the sink opens with their format
    pub options: FormatOptions,

    /// Whether messages are recorded from the start
    pub enabled: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output: default_output_path(),
            options: FormatOptions::default(),
            enabled: true,
        }
    }
}

impl RecorderConfig {
    /// Config with a specific output path, other settings default
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Config with specific format options
    #[must_use]
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }
}

/// The always-on message recorder
///
/// Owns the connection registry, the options snapshot, the hand-off queue
/// sender, the sink manager, and the drain task. Entry points are safe to
/// call concurrently from any number of threads.
pub struct Recorder {
    registry: ConnectionRegistry,
    options: ArcSwap<FormatOptions>,
    enabled: AtomicBool,
    sender: RecordSender,
    manager: Arc<SinkManager>,
    metrics: Arc<RecorderMetrics>,
    drain: JoinHandle<()>,
}

impl Recorder {
    /// Open the initial sink and spawn the drain task
    ///
    /// Must be called within a tokio runtime. Fails if the initial sink
    /// cannot be opened (bad path, unimplemented format); nothing is
    /// spawned in that case.
    pub fn start(config: RecorderConfig) -> Result<Self> {
        let manager = Arc::new(SinkManager::new());
        manager.swap(config.output.clone(), config.options.format)?;

        let metrics = Arc::new(RecorderMetrics::new());
        let (sender, receiver) = record_queue();
        let drain = tokio::spawn(drain_records(
            receiver,
            Arc::clone(&manager),
            Arc::clone(&metrics),
        ));

        tracing::info!(
            path = %config.output.display(),
            format = %config.options.format,
            enabled = config.enabled,
            "recorder started"
        );

        Ok(Self {
            registry: ConnectionRegistry::new(),
            options: ArcSwap::from_pointee(config.options),
            enabled: AtomicBool::new(config.enabled),
            sender,
            manager,
            metrics,
            drain,
        })
    }

    /// Register a new connection and return its recorder-assigned id
    pub fn on_connected(&self, url: impl Into<Arc<str>>) -> ConnectionId {
        let id = self.registry.register(url);
        tracing::debug!(connection = %id, "connection registered");
        id
    }

    /// Record an intercepted text message
    ///
    /// Returns promptly; failures are reported and counted, never raised.
    pub fn on_text_message(&self, id: ConnectionId, text: impl Into<String>, direction: Direction) {
        let Some(url) = self.check_deliverable(id) else {
            return;
        };
        self.enqueue(Event::text(id, url, direction, text));
    }

    /// Record an intercepted binary message
    ///
    /// Returns promptly; failures are reported and counted, never raised.
    pub fn on_binary_message(
        &self,
        id: ConnectionId,
        bytes: impl Into<Bytes>,
        direction: Direction,
    ) {
        let Some(url) = self.check_deliverable(id) else {
            return;
        };
        self.enqueue(Event::binary(id, url, direction, bytes));
    }

    /// Atomically replace the serialization options snapshot
    ///
    /// In-flight serializations finish with the snapshot they loaded; no
    /// call ever observes a half-applied change. The current sink keeps
    /// its open-time format until the next `change_output`.
    pub fn reconfigure(&self, options: FormatOptions) {
        self.options.store(Arc::new(options));
        tracing::info!("format options reconfigured");
    }

    /// Hot-swap the output file
    ///
    /// The new sink opens with the current options' format. On failure the
    /// previous output file remains current and the error is returned for
    /// the caller to surface (e.g. roll back a pending settings change).
    pub fn change_output(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let format = self.options.load().format;
        self.manager.swap(path.clone(), format)?;
        self.metrics.record_sink_swap();
        tracing::info!(path = %path.display(), format = %format, "output file swapped");
        Ok(())
    }

    /// Pause or resume recording; messages arriving while paused are
    /// skipped without error
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
        tracing::info!(enabled, "recording toggled");
    }

    /// Whether messages are currently being recorded
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Clone of the current options snapshot
    pub fn options(&self) -> FormatOptions {
        self.options.load().as_ref().clone()
    }

    /// Path of the current output file
    pub fn output_path(&self) -> Option<PathBuf> {
        self.manager.current_path()
    }

    /// Number of connections observed so far
    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    /// Point-in-time snapshot of the pipeline counters
    pub fn metrics(&self) -> RecorderMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Drain every queued record, close the sink, and stop
    ///
    /// All records pushed before this call are committed to the output
    /// file. A footer-write failure is the returned error.
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            sender,
            manager,
            drain,
            metrics,
            ..
        } = self;

        // Dropping the only sender closes the queue; the drain task
        // commits the backlog and exits.
        drop(sender);
        if let Err(e) = drain.await {
            tracing::error!(error = %e, "drain task failed during shutdown");
        }

        let snapshot = metrics.snapshot();
        tracing::info!(
            records_written = snapshot.records_written,
            serialize_errors = snapshot.serialize_errors,
            write_errors = snapshot.write_errors,
            "recorder shutting down"
        );

        manager.close()
    }

    /// Resolve the URL for a message, honoring the enabled toggle
    fn check_deliverable(&self, id: ConnectionId) -> Option<Arc<str>> {
        if !self.enabled.load(Ordering::Relaxed) {
            self.metrics.record_skipped_disabled();
            return None;
        }
        let url = self.registry.url(id);
        if url.is_none() {
            self.metrics.record_unknown_connection();
            tracing::warn!(connection = %id, "message for unregistered connection dropped");
        }
        url
    }

    /// Serialize with the current snapshot and hand off to the drain task
    fn enqueue(&self, event: Event) {
        let options = self.options.load();
        match serialize(&event, &options) {
            Ok(record) => {
                if self.sender.push(record).is_err() {
                    // Drain side gone: only happens if the worker died,
                    // which is fatal for the pipeline
                    tracing::error!(connection = %event.connection_id, "record queue disconnected, record lost");
                } else {
                    self.metrics.record_enqueued();
                }
            }
            Err(e) => {
                self.metrics.record_serialize_error();
                tracing::warn!(
                    connection = %event.connection_id,
                    error = %e,
                    "failed to serialize message, record dropped"
                );
            }
        }
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("enabled", &self.is_enabled())
            .field("output", &self.manager.current_path())
            .field("connections", &self.registry.len())
            .finish()
    }
}
