//! Application state.

use std::fmt;

use tg_client::GuideResult;

/// Token identifying one guide submission.
///
/// Completions carry the token of the submission that started them; a
/// completion whose token is not the one currently loading is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable state of a guide request.
///
/// Each variant carries exactly the data that is active in it, so a result
/// and an error can never be held at the same time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AppState {
    /// Nothing requested, or the last outcome was cleared.
    #[default]
    Idle,
    /// A guide request is in flight.
    Loading {
        /// Token of the in-flight request.
        request: RequestId,
        /// Trimmed table name that was submitted.
        table: String,
    },
    /// The last request produced a guide.
    Success(GuideResult),
    /// The last submission failed; holds the user-facing message.
    Error(String),
}

impl AppState {
    /// Short lowercase name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Success(_) => "success",
            Self::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// Guide content handed to the renderer, present only in `Success`.
    pub fn guide(&self) -> Option<&GuideResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Error message, present only in `Error`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Token of the in-flight request, present only in `Loading`.
    pub fn pending_request(&self) -> Option<RequestId> {
        match self {
            Self::Loading { request, .. } => Some(*request),
            _ => None,
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> GuideResult {
        GuideResult {
            table: "t".to_owned(),
            guide: "# T".to_owned(),
        }
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(AppState::default(), AppState::Idle);
        assert_eq!(AppState::default().name(), "idle");
    }

    #[test]
    fn test_accessors_match_variant() {
        let loading = AppState::Loading {
            request: RequestId::new(3),
            table: "t".to_owned(),
        };
        assert!(loading.is_loading());
        assert_eq!(loading.pending_request(), Some(RequestId::new(3)));
        assert!(loading.guide().is_none());
        assert!(loading.error_message().is_none());

        let success = AppState::Success(result());
        assert_eq!(success.guide(), Some(&result()));
        assert!(success.error_message().is_none());
        assert!(success.pending_request().is_none());

        let error = AppState::Error("boom".to_owned());
        assert_eq!(error.error_message(), Some("boom"));
        assert!(error.guide().is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(AppState::Error(String::new()).to_string(), "error");
        assert_eq!(RequestId::new(7).to_string(), "#7");
    }
}
