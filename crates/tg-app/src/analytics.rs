//! Analytics sink.
//!
//! Events are fire-and-forget: a sink never reports failure back and the
//! controller behaves identically whichever sink is installed.

use serde_json::{Map, Value};
use tracing::info;

/// Guide requested from the input field.
pub const GUIDE_REQUESTED: &str = "ui.table_guide.requested";
/// Guide received and ready to render.
pub const GUIDE_RENDERED: &str = "ui.table_guide.rendered";
/// Guide request failed.
pub const GUIDE_ERROR: &str = "ui.table_guide.error";
/// Example table picked.
pub const EXAMPLE_SELECTED: &str = "ui.table_guide.example_selected";

/// A named event with a flat key/value payload.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyticsEvent {
    pub name: &'static str,
    pub properties: Map<String, Value>,
}

impl AnalyticsEvent {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            properties: Map::new(),
        }
    }

    /// Add or replace a property.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_owned(), value.into());
        self
    }

    pub(crate) fn requested(table: &str) -> Self {
        Self::new(GUIDE_REQUESTED)
            .with("table_name", table)
            .with("source", "manual_input")
    }

    pub(crate) fn rendered(table: &str, guide: &str) -> Self {
        Self::new(GUIDE_RENDERED)
            .with("table_name", table)
            .with("guide_length", guide.chars().count())
            .with("success", true)
    }

    pub(crate) fn error(table: &str, message: &str) -> Self {
        Self::new(GUIDE_ERROR)
            .with("table_name", table)
            .with("error_message", message)
    }

    pub(crate) fn example_selected(table: &str) -> Self {
        Self::new(EXAMPLE_SELECTED)
            .with("table_name", table)
            .with("source", "dropdown")
    }

    /// Property value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Receives analytics events.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn track(&self, _event: &AnalyticsEvent) {}
}

/// Logs every event at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&self, event: &AnalyticsEvent) {
        let properties = Value::Object(event.properties.clone());
        info!(event = event.name, properties = %properties, "analytics");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_requested_payload() {
        let event = AnalyticsEvent::requested("sales.OrderHeader");
        assert_eq!(event.name, "ui.table_guide.requested");
        assert_eq!(
            Value::Object(event.properties),
            json!({"table_name": "sales.OrderHeader", "source": "manual_input"})
        );
    }

    #[test]
    fn test_rendered_counts_characters() {
        let event = AnalyticsEvent::rendered("t", "# Übersicht");
        assert_eq!(event.get("guide_length"), Some(&json!(11)));
        assert_eq!(event.get("success"), Some(&json!(true)));
    }

    #[test]
    fn test_error_payload() {
        let event = AnalyticsEvent::error("t", "Table not found");
        assert_eq!(event.name, GUIDE_ERROR);
        assert_eq!(event.get("error_message"), Some(&json!("Table not found")));
    }

    #[test]
    fn test_example_selected_payload() {
        let event = AnalyticsEvent::example_selected("event.FunnelStep");
        assert_eq!(event.get("source"), Some(&json!("dropdown")));
        assert_eq!(event.get("table_name"), Some(&json!("event.FunnelStep")));
    }

    #[test]
    fn test_with_replaces_value() {
        let event = AnalyticsEvent::new("x").with("k", 1).with("k", "two");
        assert_eq!(event.properties.len(), 1);
        assert_eq!(event.get("k"), Some(&json!("two")));
    }

    #[test]
    fn test_sinks_accept_events() {
        let event = AnalyticsEvent::requested("t");
        NoopSink.track(&event);
        TracingSink.track(&event);
    }
}
