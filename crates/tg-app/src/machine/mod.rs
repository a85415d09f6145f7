//! Guide request state machine.
//!
//! [`Model::update`] is a pure transition function: it applies one [`Event`]
//! to the model and returns the [`Effect`]s the controller must run. It does no
//! I/O, so every transition can be tested without a runtime.
//!
//! ```text
//! Idle | Error  --submit-->          Loading   (empty name: --> Error)
//! Loading       --settled ok-->      Success
//! Loading       --settled err-->     Error
//! any           --reset-->           Idle      (in-flight request abandoned)
//! Error         --example-->         Idle
//! ```

mod effect;
mod event;
mod state;

pub use effect::Effect;
pub use event::Event;
pub use state::{AppState, RequestId};

use tg_client::{ExampleTable, GuideError};
use tracing::debug;

use crate::analytics::AnalyticsEvent;

/// Everything the controller owns: request state, input and example list.
#[derive(Debug, Default)]
pub struct Model {
    state: AppState,
    table_name: String,
    examples: Vec<ExampleTable>,
    examples_fallback: bool,
    last_request: u64,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current table name input, untrimmed.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Example tables loaded at mount; empty until the index fetch settles.
    pub fn examples(&self) -> &[ExampleTable] {
        &self.examples
    }

    /// Whether [`examples`](Self::examples) is the built-in list because the
    /// backend index was unusable.
    pub fn examples_are_fallback(&self) -> bool {
        self.examples_fallback
    }

    /// Apply `event` and return the effects to run, in order.
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::TableNameChanged(name) => {
                if self.ignore_while_loading("table_name_changed") {
                    return Vec::new();
                }
                self.table_name = name;
                Vec::new()
            }
            Event::Submit => self.submit(),
            Event::Reset => {
                if let Some(request) = self.state.pending_request() {
                    debug!("Abandoning guide request {}", request);
                }
                self.state = AppState::Idle;
                Vec::new()
            }
            Event::ExampleSelected(name) => {
                if self.ignore_while_loading("example_selected") {
                    return Vec::new();
                }
                if matches!(self.state, AppState::Error(_)) {
                    self.state = AppState::Idle;
                }
                let effect = Effect::Track(AnalyticsEvent::example_selected(&name));
                self.table_name = name;
                vec![effect]
            }
            Event::ExamplesLoaded(index) => {
                self.examples = index.tables;
                self.examples_fallback = index.fallback;
                Vec::new()
            }
            Event::GuideSettled { request, outcome } => {
                let AppState::Loading {
                    request: current,
                    table,
                } = &self.state
                else {
                    debug!("Ignoring guide completion {} in {} state", request, self.state);
                    return Vec::new();
                };
                if *current != request {
                    debug!("Ignoring stale guide completion {} (current {})", request, current);
                    return Vec::new();
                }

                let table = table.clone();
                match outcome {
                    Ok(result) => {
                        let effect = Effect::Track(AnalyticsEvent::rendered(&table, &result.guide));
                        self.state = AppState::Success(result);
                        vec![effect]
                    }
                    Err(err) => {
                        let message = err.to_string();
                        let effect = Effect::Track(AnalyticsEvent::error(&table, &message));
                        self.state = AppState::Error(message);
                        vec![effect]
                    }
                }
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        match self.state {
            AppState::Idle | AppState::Error(_) => {}
            AppState::Loading { .. } | AppState::Success(_) => {
                debug!("Ignoring submit in {} state", self.state);
                return Vec::new();
            }
        }

        let table = self.table_name.trim();
        if table.is_empty() {
            self.state = AppState::Error(GuideError::EmptyTableName.to_string());
            return Vec::new();
        }

        let table = table.to_owned();
        self.last_request += 1;
        let request = RequestId::new(self.last_request);
        self.state = AppState::Loading {
            request,
            table: table.clone(),
        };
        vec![
            Effect::Track(AnalyticsEvent::requested(&table)),
            Effect::FetchGuide { request, table },
        ]
    }

    fn ignore_while_loading(&self, event: &str) -> bool {
        if self.state.is_loading() {
            debug!("Ignoring {} while loading", event);
            return true;
        }
        false
    }
}
