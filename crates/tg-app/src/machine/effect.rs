//! Outputs of the state machine, executed by the controller.

use super::RequestId;
use crate::analytics::AnalyticsEvent;

/// Work requested by a transition.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Start a guide fetch and report it back as `Event::GuideSettled`.
    FetchGuide {
        /// Token to report the completion under.
        request: RequestId,
        /// Trimmed, non-empty table name.
        table: String,
    },
    /// Emit an analytics event.
    Track(AnalyticsEvent),
}
