//! Background preload pipeline.
//!
//! Preloading fetches and decodes a thumbnail out-of-band so the gallery
//! backend generates the rendition ahead of browsing. Jobs run on a small
//! worker pool; each job reports completion through a one-shot channel held
//! by a [`PreloadHandle`]. Dropping a handle abandons the preload without
//! affecting the cache entry, which was written before the job was submitted.

mod http;

pub use http::HttpFetcher;

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Default number of worker threads in the pool.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Default number of thumbnails fetched concurrently per batch chunk.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Errors surfaced through [`PreloadHandle`].
///
/// A preload failure never invalidates the cached URL: the URL may still be
/// correct while the fetch failed transiently.
#[derive(Debug, thiserror::Error)]
pub enum PreloadError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned HTTP status {0}")]
    HttpStatus(u16),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Preload worker pool has shut down")]
    PoolShutdown,
}

/// Fetches and decodes one thumbnail by URL.
///
/// Implemented by [`HttpFetcher`] in production; tests plug in closures.
pub trait ThumbnailFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<(), PreloadError>;
}

impl<F> ThumbnailFetcher for F
where
    F: Fn(&str) -> Result<(), PreloadError> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<(), PreloadError> {
        self(url)
    }
}

struct PreloadJob {
    url: String,
    result_tx: Sender<Result<(), PreloadError>>,
}

/// Completion signal for one submitted preload.
pub struct PreloadHandle {
    result_rx: Receiver<Result<(), PreloadError>>,
}

impl PreloadHandle {
    /// Block until the preload finishes.
    pub fn wait(self) -> Result<(), PreloadError> {
        match self.result_rx.recv() {
            Ok(result) => result,
            Err(_) => Err(PreloadError::PoolShutdown),
        }
    }

    /// Poll for completion without blocking.
    pub fn try_wait(&self) -> Option<Result<(), PreloadError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(PreloadError::PoolShutdown)),
        }
    }
}

/// Outcome of a bulk preload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl PreloadReport {
    /// One-line summary for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Preloaded {}/{} thumbnails ({} failed)",
            self.succeeded, self.requested, self.failed
        )
    }
}

/// Worker pool executing preload jobs.
///
/// Workers pull jobs from a shared channel and ignore send failures on the
/// result channel, so abandoned handles are harmless. The pool drains and
/// exits when the `Preloader` is dropped.
pub struct Preloader {
    job_tx: Sender<PreloadJob>,
}

impl Preloader {
    /// Spawn `pool_size` workers executing jobs through `fetcher`.
    pub fn new(pool_size: usize, fetcher: Arc<dyn ThumbnailFetcher>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<PreloadJob>();
        let job_rx = Arc::new(Mutex::new(job_rx));

        for i in 0..pool_size.max(1) {
            let rx = Arc::clone(&job_rx);
            let fetcher = Arc::clone(&fetcher);
            let builder = thread::Builder::new().name(format!("preload-{}", i));
            let spawned = builder.spawn(move || loop {
                let job = {
                    let rx = rx.lock().unwrap();
                    match rx.recv() {
                        Ok(job) => job,
                        Err(_) => return, // channel closed
                    }
                };
                let result = fetcher.fetch(&job.url);
                // Ignore send errors (handle may have been dropped)
                let _ = job.result_tx.send(result);
            });
            if let Err(e) = spawned {
                tracing::warn!("Failed to spawn preload worker: {}", e);
            }
        }

        Self { job_tx }
    }

    /// Submit one URL for background fetch+decode.
    pub fn submit(&self, url: String) -> PreloadHandle {
        let (result_tx, result_rx) = mpsc::channel();
        let job = PreloadJob { url, result_tx };
        if self.job_tx.send(job).is_err() {
            // Pool is gone; the handle will report PoolShutdown on wait
            tracing::warn!("Preload pool unavailable, dropping job");
        }
        PreloadHandle { result_rx }
    }
}
