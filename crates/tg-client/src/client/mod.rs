//! Guide backend client.
//!
//! Provides async access to the example index and guide endpoints on top of a
//! [`Transport`].

mod guide;
mod index;

use std::sync::atomic::{AtomicUsize, Ordering};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tg_config::ApiConfig;

use crate::transport::{Transport, UreqTransport};

/// Path of the example index endpoint.
const INDEX_PATH: &str = "/api/fixtures_index";

/// Path of the guide generation endpoint.
const GUIDE_PATH: &str = "/api/table_guide";

/// Characters left unescaped in query values: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Client for the table guide backend.
///
/// Holds no state between calls apart from an advisory count of guide
/// requests in flight, exposed through [`is_busy`](Self::is_busy) for UI
/// disabling.
pub struct GuideClient<T = UreqTransport> {
    transport: T,
    base_url: String,
    in_flight: AtomicUsize,
}

impl GuideClient<UreqTransport> {
    /// Create a client from the API configuration.
    #[must_use]
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config.timeout()))
    }
}

impl<T: Transport> GuideClient<T> {
    /// Create a client using a specific transport.
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_owned(),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether a guide request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Relaxed) > 0
    }

    fn index_url(&self) -> String {
        format!("{}{INDEX_PATH}", self.base_url)
    }

    fn guide_url(&self, table: &str) -> String {
        format!(
            "{}{GUIDE_PATH}?table={}",
            self.base_url,
            utf8_percent_encode(table, QUERY_VALUE_ENCODE_SET)
        )
    }
}

/// Marks a guide request as in flight for as long as it lives.
struct BusyGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> BusyGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
