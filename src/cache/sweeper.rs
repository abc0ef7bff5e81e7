//! Periodic expiry sweeps.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::CacheInner;

/// Handle keeping a background sweeper alive.
///
/// The sweeper runs an expiry sweep on a fixed interval for as long as the
/// guard exists; dropping the guard stops the thread.
pub struct SweeperGuard {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl SweeperGuard {
    pub(crate) fn spawn(inner: Arc<CacheInner>, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let removed = inner.sweep();
                    if removed > 0 {
                        tracing::debug!("Expiry sweep removed {} entries", removed);
                    }
                }
                // Stop signal or guard dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for SweeperGuard {
    fn drop(&mut self) {
        drop(self.stop_tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
