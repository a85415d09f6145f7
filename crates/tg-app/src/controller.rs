//! Guide request controller.
//!
//! Runs the [`Model`] against a real [`GuideClient`]: user actions are fed to
//! the state machine synchronously, fetch effects are spawned as tasks on the
//! current tokio runtime, and their completions come back as events through
//! [`next_event`](GuideController::next_event).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tg_client::{ExampleTable, GuideClient, GuideError, Transport, UreqTransport};
use tg_renderer::{RenderResult, render_guide};
use tokio::task::{self, JoinSet};
use tracing::{debug, info, warn};

use crate::analytics::{AnalyticsEvent, AnalyticsSink, NoopSink};
use crate::machine::{AppState, Effect, Event, Model, RequestId};

/// Owns the application state and drives guide requests.
///
/// Only one guide request is logically in flight at a time. A request that
/// was abandoned by [`reset`](Self::reset) may still complete; its result is
/// discarded by the state machine.
pub struct GuideController<T: Transport = UreqTransport> {
    client: Arc<GuideClient<T>>,
    model: Model,
    sink: Arc<dyn AnalyticsSink>,
    tasks: JoinSet<Event>,
    /// Guide fetch tasks still in `tasks`, by task id.
    guide_tasks: HashMap<task::Id, RequestId>,
    mounted: bool,
}

impl<T: Transport> GuideController<T> {
    /// Create a controller with analytics disabled.
    pub fn new(client: GuideClient<T>) -> Self {
        Self {
            client: Arc::new(client),
            model: Model::new(),
            sink: Arc::new(NoopSink),
            tasks: JoinSet::new(),
            guide_tasks: HashMap::new(),
            mounted: false,
        }
    }

    /// Install an analytics sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Start loading the example index.
    ///
    /// Fetches at most once per controller; later calls do nothing. The
    /// fetch never changes [`AppState`].
    ///
    /// Must be called within a tokio runtime.
    pub fn mount(&mut self) {
        if self.mounted {
            debug!("Controller already mounted");
            return;
        }
        self.mounted = true;

        let client = Arc::clone(&self.client);
        self.tasks.spawn(async move {
            Event::ExamplesLoaded(client.load_example_index().await)
        });
    }

    /// Replace the table name input.
    pub fn set_table_name(&mut self, name: impl Into<String>) {
        self.dispatch(Event::TableNameChanged(name.into()));
    }

    /// Request a guide for the current input.
    ///
    /// Must be called within a tokio runtime.
    pub fn submit(&mut self) {
        self.dispatch(Event::Submit);
    }

    /// Clear the current guide or error and return to idle.
    pub fn reset(&mut self) {
        self.dispatch(Event::Reset);
    }

    /// Fill the input with an example table name.
    pub fn select_example(&mut self, name: impl Into<String>) {
        self.dispatch(Event::ExampleSelected(name.into()));
    }

    /// Wait for the next in-flight fetch to complete and apply it.
    ///
    /// Returns `false` when nothing is in flight. A guide fetch task that
    /// panics or is cancelled settles its request as an error.
    pub async fn next_event(&mut self) -> bool {
        match self.tasks.join_next_with_id().await {
            Some(Ok((id, event))) => {
                self.guide_tasks.remove(&id);
                self.dispatch(event);
                true
            }
            Some(Err(e)) => {
                match self.guide_tasks.remove(&e.id()) {
                    Some(request) => {
                        warn!("Guide request {} task failed: {}", request, e);
                        self.dispatch(Event::GuideSettled {
                            request,
                            outcome: Err(GuideError::Interrupted(e.to_string())),
                        });
                    }
                    None => warn!("Example index task failed: {}", e),
                }
                true
            }
            None => false,
        }
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }

    pub fn state(&self) -> &AppState {
        self.model.state()
    }

    pub fn table_name(&self) -> &str {
        self.model.table_name()
    }

    /// Example tables; empty until the index fetch has been applied.
    pub fn examples(&self) -> &[ExampleTable] {
        self.model.examples()
    }

    /// Whether the examples are the built-in list rather than the backend's.
    pub fn examples_are_fallback(&self) -> bool {
        self.model.examples_are_fallback()
    }

    pub fn client(&self) -> &GuideClient<T> {
        &self.client
    }

    /// Whether the client has a guide request in flight.
    pub fn is_busy(&self) -> bool {
        self.client.is_busy()
    }

    /// Whether submitting right now would be accepted.
    pub fn can_submit(&self) -> bool {
        matches!(self.state(), AppState::Idle | AppState::Error(_))
    }

    /// Render the current guide, if the last request succeeded.
    pub fn document(&self) -> Option<RenderResult> {
        self.state()
            .guide()
            .map(|result| render_guide(&result.guide))
    }

    fn dispatch(&mut self, event: Event) {
        let name = event.name();
        let before = self.model.state().name();
        let effects = self.model.update(event);
        let after = self.model.state().name();
        if before != after {
            info!("Guide state {} -> {} on {}", before, after, name);
        }

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchGuide { request, table } => {
                debug!("Starting guide request {} for {}", request, table);
                let client = Arc::clone(&self.client);
                let handle = self.tasks.spawn(async move {
                    let outcome = client.fetch_guide(&table).await;
                    Event::GuideSettled { request, outcome }
                });
                self.guide_tasks.insert(handle.id(), request);
            }
            Effect::Track(event) => {
                let event = event
                    .with("table", self.model.table_name())
                    .with(
                        "timestamp",
                        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
                    );
                self.sink.track(&event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use std::future::Future;

    use pretty_assertions::assert_eq;
    use tg_client::{
        GuideResult, HttpResponse, MockGate, MockTransport, TransportError, fallback_examples,
    };

    use super::*;

    const INDEX: &str = "/api/fixtures_index";
    const GUIDE: &str = "/api/table_guide";

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl RecordingSink {
        fn names(&self) -> Vec<&'static str> {
            self.events.lock().unwrap().iter().map(|e| e.name).collect()
        }
    }

    impl AnalyticsSink for RecordingSink {
        fn track(&self, event: &AnalyticsEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    /// Panics on guide requests; the example index is unreachable.
    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn get(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
            let url = url.to_owned();
            async move {
                if url.contains("/api/table_guide") {
                    panic!("transport blew up on {url}");
                }
                Err(TransportError::Other("connection refused".to_owned()))
            }
        }
    }

    fn controller(transport: MockTransport) -> GuideController<MockTransport> {
        GuideController::new(GuideClient::with_transport(
            "http://localhost:8000",
            transport,
        ))
    }

    fn requests(controller: &GuideController<MockTransport>, fragment: &str) -> usize {
        controller.client.transport().request_count(fragment)
    }

    #[tokio::test]
    async fn test_submit_success_scenario() {
        let mut controller = controller(MockTransport::new().with_json(
            GUIDE,
            200,
            r##"{"table":"tracking.AdClickEvent","guide":"# Ad Click Event\n\n| col | type |\n|---|---|\n| id | int |"}"##,
        ));

        controller.set_table_name("tracking.AdClickEvent");
        controller.submit();
        assert!(controller.state().is_loading());
        assert!(!controller.can_submit());

        controller.settle().await;

        let result = controller.state().guide().unwrap();
        assert_eq!(result.table, "tracking.AdClickEvent");
        assert!(!result.guide.is_empty());

        let document = controller.document().unwrap();
        assert!(document.html.contains(r#"<h1 id="ad-click-event">"#));
        assert!(document.html.contains(r#"<div class="table-scroll">"#));
    }

    #[tokio::test]
    async fn test_submit_not_found_scenario() {
        let mut controller = controller(MockTransport::new().with_json(
            GUIDE,
            404,
            r#"{"detail":"Table not found"}"#,
        ));

        controller.set_table_name("nonexistent.Table");
        controller.submit();
        controller.settle().await;

        assert_eq!(
            controller.state(),
            &AppState::Error("Table not found".to_owned())
        );
        assert!(controller.document().is_none());
    }

    #[tokio::test]
    async fn test_empty_submit_issues_no_request() {
        let mut controller = controller(MockTransport::new());

        controller.set_table_name("   ");
        controller.submit();
        controller.settle().await;

        assert_eq!(
            controller.state().error_message(),
            Some("Please enter a table name")
        );
        assert!(controller.client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_noop() {
        let gate = MockGate::new();
        let mut controller = controller(
            MockTransport::new()
                .with_json(GUIDE, 200, r##"{"guide":"# G"}"##)
                .gated(&gate),
        );

        controller.set_table_name("a.Table");
        controller.submit();
        tokio::task::yield_now().await;
        controller.submit();
        assert!(controller.state().is_loading());
        assert!(controller.is_busy());

        gate.open();
        controller.settle().await;

        assert_eq!(requests(&controller, GUIDE), 1);
        assert!(controller.state().guide().is_some());
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_reset_after_success_clears_document() {
        let mut controller =
            controller(MockTransport::new().with_json(GUIDE, 200, r##"{"guide":"# G"}"##));

        controller.set_table_name("a.Table");
        controller.submit();
        controller.settle().await;
        assert!(controller.document().is_some());

        controller.reset();

        assert_eq!(controller.state(), &AppState::Idle);
        assert!(controller.document().is_none());
        assert_eq!(controller.table_name(), "a.Table");
    }

    #[tokio::test]
    async fn test_stale_completion_after_reset_is_ignored() {
        let gate = MockGate::new();
        let mut controller = controller(
            MockTransport::new()
                .with_json(GUIDE, 200, r##"{"guide":"# Stale"}"##)
                .gated(&gate),
        );

        controller.set_table_name("a.Table");
        controller.submit();
        controller.reset();
        gate.open();
        controller.settle().await;

        assert_eq!(controller.state(), &AppState::Idle);
        assert!(controller.document().is_none());
    }

    #[tokio::test]
    async fn test_stale_completion_does_not_override_newer_request() {
        let gate = MockGate::new();
        let mut controller = controller(
            MockTransport::new()
                .with_json("/api/table_guide?table=a.Table", 200, r##"{"guide":"# A"}"##)
                .gated(&gate)
                .with_json("/api/table_guide?table=b.Table", 200, r##"{"guide":"# B"}"##),
        );

        controller.set_table_name("a.Table");
        controller.submit();
        controller.reset();
        controller.set_table_name("b.Table");
        controller.submit();

        assert!(controller.next_event().await);
        assert_eq!(
            controller.state(),
            &AppState::Success(GuideResult {
                table: "b.Table".to_owned(),
                guide: "# B".to_owned(),
            })
        );

        gate.open();
        controller.settle().await;
        assert_eq!(controller.state().guide().unwrap().table, "b.Table");
    }

    #[tokio::test]
    async fn test_mount_fetches_index_once() {
        let mut controller = controller(MockTransport::new().with_json(
            INDEX,
            200,
            r#"{"tables":[{"name":"sales.OrderHeader","title":"Order Header"}]}"#,
        ));

        controller.mount();
        controller.mount();
        controller.settle().await;

        assert_eq!(requests(&controller, INDEX), 1);
        assert_eq!(controller.examples().len(), 1);
        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[tokio::test]
    async fn test_mount_failure_uses_fallback_without_error_state() {
        let mut controller = controller(MockTransport::new());

        controller.mount();
        controller.settle().await;

        assert_eq!(controller.examples(), fallback_examples().as_slice());
        assert!(controller.examples_are_fallback());
        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[tokio::test]
    async fn test_mount_success_is_not_fallback() {
        let body = serde_json::json!({ "tables": fallback_examples() }).to_string();
        let mut controller = controller(MockTransport::new().with_json(INDEX, 200, body));

        controller.mount();
        controller.settle().await;

        assert_eq!(controller.examples(), fallback_examples().as_slice());
        assert!(!controller.examples_are_fallback());
    }

    #[tokio::test]
    async fn test_panicking_guide_task_settles_as_error() {
        let sink = Arc::new(RecordingSink::default());
        let mut controller = GuideController::new(GuideClient::with_transport(
            "http://localhost:8000",
            PanickingTransport,
        ))
        .with_sink(Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        controller.mount();
        controller.set_table_name("a.Table");
        controller.submit();
        controller.settle().await;

        let message = controller.state().error_message().unwrap();
        assert!(message.starts_with("Guide request did not complete"), "{message}");
        assert!(controller.can_submit());
        assert!(!controller.is_busy());
        assert!(controller.examples_are_fallback());
        assert_eq!(
            sink.names(),
            vec!["ui.table_guide.requested", "ui.table_guide.error"]
        );
    }

    #[tokio::test]
    async fn test_panicking_task_after_reset_is_ignored() {
        let mut controller = GuideController::new(GuideClient::with_transport(
            "http://localhost:8000",
            PanickingTransport,
        ));

        controller.set_table_name("a.Table");
        controller.submit();
        controller.reset();
        controller.settle().await;

        assert_eq!(controller.state(), &AppState::Idle);
    }

    #[tokio::test]
    async fn test_index_and_guide_fetch_are_independent() {
        let gate = MockGate::new();
        let mut controller = controller(
            MockTransport::new()
                .with_json(INDEX, 200, r#"{"tables":[{"name":"x.Y"}]}"#)
                .gated(&gate)
                .with_json(GUIDE, 200, r##"{"guide":"# G"}"##),
        );

        controller.mount();
        controller.set_table_name("x.Y");
        controller.submit();

        assert!(controller.next_event().await);
        assert!(controller.state().guide().is_some());
        assert!(controller.examples().is_empty());

        gate.open();
        controller.settle().await;
        assert_eq!(controller.examples().len(), 1);
        assert!(controller.state().guide().is_some());
    }

    #[tokio::test]
    async fn test_example_selection_clears_error() {
        let mut controller = controller(MockTransport::new());

        controller.submit();
        assert!(controller.state().error_message().is_some());

        controller.select_example("event.FunnelStep");

        assert_eq!(controller.state(), &AppState::Idle);
        assert_eq!(controller.table_name(), "event.FunnelStep");
        assert!(controller.client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_backend_message() {
        let mut controller = controller(MockTransport::new());

        controller.set_table_name("a.Table");
        controller.submit();
        controller.settle().await;

        assert_eq!(
            controller.state().error_message(),
            Some("Failed to connect to the API server. Please ensure the backend is running.")
        );
        assert!(controller.can_submit());
    }

    #[tokio::test]
    async fn test_analytics_events_are_stamped() {
        let sink = Arc::new(RecordingSink::default());
        let mut controller = controller(
            MockTransport::new().with_json(GUIDE, 200, r##"{"guide":"# Guide"}"##),
        )
        .with_sink(Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        controller.select_example("sales.OrderHeader");
        controller.submit();
        controller.settle().await;

        assert_eq!(
            sink.names(),
            vec![
                "ui.table_guide.example_selected",
                "ui.table_guide.requested",
                "ui.table_guide.rendered",
            ]
        );
        let events = sink.events.lock().unwrap();
        let rendered = &events[2];
        assert_eq!(rendered.get("guide_length"), Some(&serde_json::json!(7)));
        assert_eq!(
            rendered.get("table"),
            Some(&serde_json::json!("sales.OrderHeader"))
        );
        let timestamp = rendered.get("timestamp").unwrap().as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_error_event_carries_message() {
        let sink = Arc::new(RecordingSink::default());
        let mut controller = controller(MockTransport::new().with_json(
            GUIDE,
            500,
            "oops",
        ))
        .with_sink(Arc::clone(&sink) as Arc<dyn AnalyticsSink>);

        controller.set_table_name("a.Table");
        controller.submit();
        controller.settle().await;

        let events = sink.events.lock().unwrap();
        let error = events.last().unwrap();
        assert_eq!(error.name, "ui.table_guide.error");
        assert_eq!(
            error.get("error_message"),
            Some(&serde_json::json!("HTTP 500: Internal Server Error"))
        );
    }
}
