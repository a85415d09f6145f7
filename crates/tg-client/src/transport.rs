//! HTTP transport abstraction.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use ureq::Agent;

use crate::error::TransportError;

/// An HTTP response, whatever its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status (e.g. "Not Found"), may be empty.
    pub reason: String,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests for the guide client.
///
/// Implementations must return `Ok` for every response the server sends,
/// including error statuses, and `Err` only when no response was obtained.
pub trait Transport: Send + Sync + 'static {
    /// Issue a GET request for `url`.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Transport backed by a `ureq` agent.
///
/// `ureq` is blocking, so each request runs on tokio's blocking pool and the
/// calling task only awaits its completion.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    /// Create a transport with an optional global request timeout.
    ///
    /// `None` leaves ureq's own defaults in place.
    #[must_use]
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        let agent = self.agent.clone();
        let url = url.to_owned();
        async move {
            tokio::task::spawn_blocking(move || blocking_get(&agent, &url))
                .await
                .map_err(|e| TransportError::Task(e.to_string()))?
        }
    }
}

fn blocking_get(agent: &Agent, url: &str) -> Result<HttpResponse, TransportError> {
    debug!("GET {}", url);

    let response = agent
        .get(url)
        .header("Accept", "application/json")
        .call()?;

    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default().to_owned();
    let mut body_reader = response.into_body();

    // Raw bytes; decoding is the caller's job. An unreadable error body is
    // treated as empty so the status still gets through.
    let body = match body_reader.read_to_vec() {
        Ok(body) => body,
        Err(ureq::Error::BodyExceedsLimit(limit)) => {
            warn!("GET {} body exceeds {} bytes, discarding", url, limit);
            Vec::new()
        }
        Err(e) if status.is_success() => return Err(e.into()),
        Err(_) => Vec::new(),
    };

    debug!("GET {} -> {}", url, status.as_u16());
    Ok(HttpResponse {
        status: status.as_u16(),
        reason,
        body,
    })
}
