// src/fetch/http.rs
// =============================================================================
// The Fetcher issues GET requests and hands back page text or image bytes.
//
// Key functionality:
// - One reqwest Client per run, cloned into every concurrent task
//   (connection pooling inside a batch)
// - Per-request timeout so a hung server can't stall the whole run
// - Non-2xx answers are logged AND returned as errors: an error page body
//   must never be parsed as if it were the real page
// =============================================================================

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::error::TransportError;

/// Makes the GET requests for one run.
///
/// Cloning a Fetcher is cheap: reqwest's Client is an Arc internally.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| TransportError::from_reqwest("<client>", e))?;

        Ok(Self { client })
    }

    /// GETs `url` and returns the body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))
    }

    /// GETs `url` and returns the raw body bytes.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.get(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;
        Ok(bytes.to_vec())
    }

    // Sends the request and rejects anything that isn't 2xx
    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "non-success response");
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why map every reqwest::Error through TransportError::from_reqwest?
//    - reqwest reports timeouts as ordinary errors with is_timeout() set
//    - We want the caller (and the final report) to see "timed out" as its
//      own case, the same way a link checker would show TIMEOUT
//
// 2. Why Vec<u8> instead of bytes::Bytes?
//    - The download stage writes the bytes once and drops them, so there is
//      no sharing to optimize and we avoid a direct `bytes` dependency
// -----------------------------------------------------------------------------
