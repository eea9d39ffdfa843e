//! Global busy indicator driven by the number of in-flight requests.
//!
//! Every request holds a [`PendingRequest`] guard for its whole lifetime; the
//! count goes up when the guard is created and down when it drops, whether
//! the call succeeded, failed, or was abandoned. Views subscribe to the count
//! and show the indicator while it is non-zero. Overlapping requests are only
//! counted: there is no queueing, cancellation, or ordering between them.

use std::sync::Arc;

use tokio::sync::watch;

/// Text shown next to the busy indicator.
pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone)]
pub struct LoadingTracker {
    pending: Arc<watch::Sender<usize>>,
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            pending: Arc::new(tx),
        }
    }

    /// Receiver that observes every change of the pending-request count.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.pending.subscribe()
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending() > 0
    }

    /// Marks one request as in flight until the returned guard is dropped.
    #[must_use = "the request is counted as settled as soon as the guard drops"]
    pub fn begin(&self) -> PendingRequest {
        self.pending.send_modify(|count| *count += 1);
        PendingRequest {
            pending: Arc::clone(&self.pending),
        }
    }
}

#[derive(Debug)]
pub struct PendingRequest {
    pending: Arc<watch::Sender<usize>>,
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.pending
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
