//! wsrec - Recorder
//!
//! The concurrent core of the recorder: the hand-off queue between many
//! producers and one consumer, the durable sink with its envelope state
//! machine, the hot-swap protocol, and the host-facing `Recorder` facade.
//!
//! # Architecture
//!
//! ```text
//! [Host callbacks]                                     [Disk]
//!   on_connected ──→ ConnectionRegistry
//!   on_text_message ─┐
//!   on_binary_message┼─→ serialize ──→ RecordQueue ──→ drain task ──→ SinkManager ──→ file
//!                    │    (pure)       (unbounded)      (single)       (mutex)
//!   reconfigure ─────┘                                    ▲
//!   change_output ────────────────────────────────────────┘ (hot swap)
//! ```
//!
//! # Key Design
//!
//! - **Producers never block on I/O**: serialization is pure CPU work and
//!   the queue push is unbounded and non-blocking; only the single drain
//!   task touches the file.
//! - **One mutual-exclusion domain**: the current sink is mutated solely
//!   under the `SinkManager` mutex, shared by `append` and the swap
//!   protocol. At every instant exactly one sink is the append target.
//! - **Hot swap**: a replacement sink is fully constructed (envelope header
//!   written) before the lock is taken; the old sink is closed and the new
//!   one published inside the lock; any failure aborts the swap and leaves
//!   the old sink current.
//! - **Failure containment**: a failed serialization or append drops that
//!   one record, reports it, and never stops the pipeline.
//!
//! # Example
//!
//! ```ignore
//! use wsrec_recorder::{Recorder, RecorderConfig};
//! use wsrec_protocol::Direction;
//!
//! let recorder = Recorder::start(RecorderConfig::default())?;
//! let id = recorder.on_connected("wss://example.com/feed");
//! recorder.on_text_message(id, "ping", Direction::ClientToServer);
//! recorder.shutdown().await?;
//! ```

mod drain;
mod error;
mod manager;
mod metrics;
mod queue;
mod recorder;
mod sink;

pub use error::{RecorderError, Result};
pub use manager::SinkManager;
pub use metrics::{RecorderMetrics, RecorderMetricsSnapshot};
pub use queue::{record_queue, RecordReceiver, RecordSender};
pub use recorder::{default_output_path, Recorder, RecorderConfig};
pub use sink::{Sink, SinkState};

// Re-export the types host code needs alongside the facade
pub use wsrec_format::{FormatOptions, RecordFormat};
pub use wsrec_protocol::{ConnectionId, Direction, Event, Payload};
