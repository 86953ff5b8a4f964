//! HTTP retrieval of raw feed bodies.
//!
//! # Architecture
//!
//! - [`FetchText`]: the seam the processor depends on; one GET, text or failure
//! - [`HttpFetcher`]: the reqwest implementation used in production
//!
//! # TLS
//!
//! Several agency endpoints serve self-signed or expired certificates.
//! [`HttpFetcher`] owns a dedicated client with certificate validation turned
//! off; the relaxation never leaks into any other client in the process.
//!
//! No retries happen here. A failed fetch is reported once and the run moves on.

use crate::config::Settings;
use crate::error::{AppError, FetchFailure};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// `Accept` header sent with every request.
pub const ACCEPT_JSON: &str = "application/json, text/plain, */*";

/// Retrieve the body at a URL as text.
pub trait FetchText {
    /// Issue one GET. Any transport error, timeout or non-2xx status is a
    /// [`FetchFailure`] carrying no partial data.
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure>;
}

/// reqwest-backed [`FetchText`].
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Build a fetcher with the given client identifier and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] if the TLS backend cannot be initialised.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_JSON));

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        Self::new(&settings.user_agent, settings.timeout())
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FetchText for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        let t0 = Instant::now();
        let result: Result<String, reqwest::Error> = async {
            let response = self.client.get(url).send().await?.error_for_status()?;
            response.text().await
        }
        .await;
        let elapsed_ms = t0.elapsed().as_millis();

        match result {
            Ok(body) => {
                debug!(elapsed_ms, bytes = body.len(), "Fetched feed");
                Ok(body)
            }
            Err(e) => {
                warn!(elapsed_ms, timeout = e.is_timeout(), error = %e, "Fetch failed");
                Err(FetchFailure::new(url, e))
            }
        }
    }
}
