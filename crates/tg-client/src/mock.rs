//! Mock transport implementation for testing.
//!
//! Provides [`MockTransport`] for exercising the client without a backend.

use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::error::TransportError;
use crate::transport::{HttpResponse, Transport};

/// Holds a mocked response back until the test opens it.
///
/// Each [`open`](Self::open) releases one pending (or future) request.
#[derive(Clone, Debug, Default)]
pub struct MockGate {
    notify: Arc<Notify>,
}

impl MockGate {
    /// Create a closed gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Release one request waiting at this gate.
    pub fn open(&self) {
        self.notify.notify_one();
    }

    async fn wait(&self) {
        self.notify.notified().await;
    }
}

#[derive(Clone, Debug)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug)]
struct Route {
    path: String,
    reply: Reply,
    gate: Option<MockGate>,
}

/// Mock transport for testing.
///
/// Replies are matched by the URL path (everything after the host, including
/// the query string); the first route whose path is a prefix wins. Requests
/// that match no route fail as if the backend were unreachable. Every
/// requested URL is recorded.
///
/// # Example
///
/// ```ignore
/// use tg_client::{GuideClient, MockTransport};
///
/// let transport = MockTransport::new()
///     .with_json("/api/table_guide", 200, r##"{"table":"t","guide":"# T"}"##);
/// let client = GuideClient::with_transport("http://localhost:8000", transport);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with no routes; every request fails.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests under `path` with the given status and body.
    #[must_use]
    pub fn with_json(self, path: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.with_bytes(path, status, body.into().into_bytes())
    }

    /// Answer requests under `path` with the given status and raw body bytes.
    #[must_use]
    pub fn with_bytes(mut self, path: impl Into<String>, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.push(Route {
            path: path.into(),
            reply: Reply::Response(HttpResponse {
                status,
                reason: reason_phrase(status).to_owned(),
                body: body.into(),
            }),
            gate: None,
        });
        self
    }

    /// Fail requests under `path` with a transport error.
    #[must_use]
    pub fn with_failure(mut self, path: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes.push(Route {
            path: path.into(),
            reply: Reply::Failure(message.into()),
            gate: None,
        });
        self
    }

    /// Hold replies for the most recently added route until `gate` opens.
    ///
    /// # Panics
    ///
    /// Panics if no route has been added yet.
    #[must_use]
    pub fn gated(mut self, gate: &MockGate) -> Self {
        self.routes
            .last_mut()
            .expect("gated() requires a route")
            .gate = Some(gate.clone());
        self
    }

    /// URLs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requested URLs containing `fragment`.
    pub fn request_count(&self, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }

    fn route_for(&self, url: &str) -> Option<&Route> {
        let path = url_path(url);
        self.routes.iter().find(|route| path.starts_with(&route.path))
    }
}

impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(url.to_owned());

        let Some(route) = self.route_for(url) else {
            return Err(TransportError::Other(format!("connection refused: {url}")));
        };
        if let Some(gate) = &route.gate {
            gate.wait().await;
        }
        match &route.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Failure(message) => Err(TransportError::Other(message.clone())),
        }
    }
}

/// Strip scheme and authority, leaving path and query.
fn url_path(url: &str) -> &str {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .find('/')
        .map_or("/", |idx| &without_scheme[idx..])
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}
