//! Guide request controller.
//!
//! Ties the guide client and the markdown renderer together behind an explicit
//! state machine:
//!
//! - [`Model`] holds the observable [`AppState`], the table name input and the
//!   example list; [`Model::update`] is its pure transition function
//! - [`GuideController`] executes the resulting effects on a tokio runtime and
//!   feeds completions back as events
//! - [`AnalyticsSink`] receives fire-and-forget usage events; [`NoopSink`] is
//!   the default
//!
//! # Example
//!
//! ```no_run
//! use tg_app::GuideController;
//! use tg_client::{GuideClient, UreqTransport};
//!
//! # async fn run() {
//! let client = GuideClient::with_transport("http://localhost:8000", UreqTransport::default());
//! let mut controller = GuideController::new(client);
//! controller.mount();
//! controller.set_table_name("tracking.AdClickEvent");
//! controller.submit();
//! controller.settle().await;
//!
//! if let Some(document) = controller.document() {
//!     println!("{}", document.html);
//! }
//! # }
//! ```

mod analytics;
mod controller;
mod machine;

pub use analytics::{
    AnalyticsEvent, AnalyticsSink, EXAMPLE_SELECTED, GUIDE_ERROR, GUIDE_RENDERED,
    GUIDE_REQUESTED, NoopSink, TracingSink,
};
pub use controller::GuideController;
pub use machine::{AppState, Effect, Event, Model, RequestId};
