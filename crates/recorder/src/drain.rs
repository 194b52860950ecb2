//! Drain task
//!
//! The single consumer of the hand-off queue. It is the only component
//! that performs blocking file I/O; one failed append drops that record,
//! reports it, and never stops the loop. The loop ends only when every
//! producer handle is gone and the queue is empty — the orderly-shutdown
//! path.

use std::sync::Arc;

use crate::{RecordReceiver, RecorderError, RecorderMetrics, SinkManager};

/// Run the drain loop until the queue closes
///
/// Exactly one instance may run per recorder; the sink manager's mutex
/// assumes a single appending agent on the drain side.
pub(crate) async fn drain_records(
    mut receiver: RecordReceiver,
    manager: Arc<SinkManager>,
    metrics: Arc<RecorderMetrics>,
) {
    tracing::debug!("drain task started");

    while let Some(record) = receiver.pop().await {
        match manager.append(&record) {
            Ok(()) => metrics.record_written(),
            Err(RecorderError::NoSink) => {
                metrics.record_dropped_no_sink();
                tracing::error!(record_len = record.len(), "no sink open, record dropped");
            }
            Err(e) => {
                metrics.record_write_error();
                tracing::error!(error = %e, record_len = record.len(), "append failed, record dropped");
            }
        }
    }

    tracing::debug!("drain task finished");
}
