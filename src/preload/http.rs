//! HTTP fetcher decoding thumbnails with the `image` crate.

use std::time::Duration;

use super::{PreloadError, ThumbnailFetcher};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production fetcher: GET the URL and decode the response body.
///
/// Decoding mirrors what a browser does when preloading an image element; a
/// body that is not a valid image counts as a failed preload even when the
/// HTTP status was 200.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<(), PreloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| PreloadError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreloadError::HttpStatus(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .map_err(|e| PreloadError::Request(e.to_string()))?;

        image::load_from_memory(&bytes).map_err(|e| PreloadError::Decode(e.to_string()))?;
        Ok(())
    }
}
