//! Region-started notifications emitted by the prober.

use qrs_common::catalog::Region;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

/// Write side of the progress stream.
///
/// The prober owns the sink for the duration of a run and drops it when the run returns,
/// so a receiver sees the end of the stream exactly when the result is ready.
#[derive(Debug, Clone, Default)]
pub enum ProgressSink {
    /// Every event is delivered. Emitting waits for queue capacity, so the receiver must
    /// be drained concurrently for the whole run.
    Reliable(mpsc::Sender<Region>),
    /// Best effort. Events that do not fit in the queue are dropped.
    Lossy(mpsc::Sender<Region>),
    #[default]
    Discard,
}

impl ProgressSink {
    /// A reliable sink and its receiver over a queue of `capacity` events.
    pub fn reliable(capacity: usize) -> (Self, mpsc::Receiver<Region>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::Reliable(tx), rx)
    }

    /// A lossy sink and its receiver over a queue of `capacity` events.
    pub fn lossy(capacity: usize) -> (Self, mpsc::Receiver<Region>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::Lossy(tx), rx)
    }

    /// Announces that the probe for `region` is being dispatched.
    ///
    /// A receiver that has gone away is not an error; the event is simply lost.
    pub async fn emit(&self, region: Region) {
        match self {
            ProgressSink::Reliable(tx) => {
                if let Err(err) = tx.send(region).await {
                    debug!(region = %err.0, "progress receiver closed");
                }
            }
            ProgressSink::Lossy(tx) => match tx.try_send(region) {
                Ok(()) => {}
                Err(TrySendError::Full(region)) => {
                    warn!(%region, "progress queue full, event dropped");
                }
                Err(TrySendError::Closed(region)) => {
                    debug!(%region, "progress receiver closed");
                }
            },
            ProgressSink::Discard => {}
        }
    }
}
