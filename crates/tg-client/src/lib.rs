//! HTTP client for the table guide backend.
//!
//! The backend exposes two read endpoints:
//!
//! - `GET {base}/api/fixtures_index` lists example tables
//! - `GET {base}/api/table_guide?table=<name>` generates a markdown guide
//!
//! [`GuideClient`] performs exactly one request per call and normalizes every
//! failure into a [`GuideError`] whose `Display` is the message shown to the
//! user. The example index never fails: when the backend is unavailable the
//! client answers with [`fallback_examples`].
//!
//! Requests go through the [`Transport`] trait. [`UreqTransport`] is the real
//! implementation; `MockTransport` (behind the `mock` feature) scripts
//! responses for tests.

mod client;
mod error;
mod fallback;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod transport;
mod types;

pub use client::GuideClient;
pub use error::{GuideError, TransportError};
pub use fallback::fallback_examples;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockGate, MockTransport};
pub use transport::{HttpResponse, Transport, UreqTransport};
pub use types::{ExampleIndex, ExampleTable, GuideResult};
