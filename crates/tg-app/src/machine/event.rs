//! Inputs to the state machine.

use tg_client::{ExampleIndex, GuideError, GuideResult};

use super::RequestId;

/// Something that happened: a user action or a completed fetch.
#[derive(Debug)]
pub enum Event {
    /// The table name input was edited.
    TableNameChanged(String),
    /// The user asked to generate a guide for the current input.
    Submit,
    /// The user asked to clear the current outcome.
    Reset,
    /// The user picked an example table.
    ExampleSelected(String),
    /// The example index fetch finished (backend list or fallback).
    ExamplesLoaded(ExampleIndex),
    /// A guide fetch finished.
    GuideSettled {
        /// Token of the submission that started the fetch.
        request: RequestId,
        /// What the client returned.
        outcome: Result<GuideResult, GuideError>,
    },
}

impl Event {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TableNameChanged(_) => "table_name_changed",
            Self::Submit => "submit",
            Self::Reset => "reset",
            Self::ExampleSelected(_) => "example_selected",
            Self::ExamplesLoaded(_) => "examples_loaded",
            Self::GuideSettled { .. } => "guide_settled",
        }
    }
}
