//! Debounced flush scheduling.
//!
//! The debouncer owns a dedicated thread holding at most one armed deadline.
//! Every `touch` re-arms the deadline, so N touches inside the window
//! collapse into a single job run. `cancel` disarms without running.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

enum Control {
    Touch,
    Cancel,
}

/// Cancellable one-shot timer that coalesces rapid triggers.
pub(crate) struct Debouncer {
    tx: Option<Sender<Control>>,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Spawn the timer thread; `job` runs each time the window elapses
    /// without a new touch.
    pub fn new(window: Duration, job: impl Fn() + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel::<Control>();

        let handle = thread::spawn(move || {
            let mut deadline: Option<Instant> = None;
            loop {
                let control = match deadline {
                    None => match rx.recv() {
                        Ok(control) => control,
                        Err(_) => return, // owner dropped
                    },
                    Some(at) => {
                        let now = Instant::now();
                        if now >= at {
                            job();
                            deadline = None;
                            continue;
                        }
                        match rx.recv_timeout(at - now) {
                            Ok(control) => control,
                            Err(RecvTimeoutError::Timeout) => {
                                job();
                                deadline = None;
                                continue;
                            }
                            Err(RecvTimeoutError::Disconnected) => return,
                        }
                    }
                };

                match control {
                    Control::Touch => deadline = Some(Instant::now() + window),
                    Control::Cancel => deadline = None,
                }
            }
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    /// (Re)arm the timer for one full window from now.
    pub fn touch(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Control::Touch);
        }
    }

    /// Disarm any pending timer without running the job.
    pub fn cancel(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(Control::Cancel);
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // Closing the channel stops the thread; join so the job cannot run
        // past the owner's lifetime.
        drop(self.tx.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
