//! `tg examples` command implementation.

use std::fmt::Write as _;
use std::io::Write as _;

use clap::Args;
use tg_client::ExampleTable;

use super::{BackendArgs, build_controller, describe_backend};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the examples command.
#[derive(Args)]
pub(crate) struct ExamplesArgs {
    #[command(flatten)]
    backend: BackendArgs,
}

impl ExamplesArgs {
    /// Execute the examples command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or stdout cannot be written. An
    /// unreachable backend is not an error: the built-in example list is shown
    /// instead.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.backend.load_config()?;
        output.backend(&describe_backend(&config));

        let mut controller = build_controller(&config);
        controller.mount();
        controller.settle().await;

        if controller.examples_are_fallback() {
            output.fallback_examples();
        }
        std::io::stdout()
            .lock()
            .write_all(listing(controller.examples()).as_bytes())?;
        Ok(())
    }
}

/// One name line and one indented description line per table.
fn listing(tables: &[ExampleTable]) -> String {
    let mut out = String::new();
    for table in tables {
        writeln!(out, "{}\n  {}", table.name, describe(table)).unwrap();
    }
    out
}

fn describe(table: &ExampleTable) -> String {
    let mut line = match (table.title.is_empty(), table.description.is_empty()) {
        (false, false) => format!("{}: {}", table.title, table.description),
        (false, true) => table.title.clone(),
        (true, false) => table.description.clone(),
        (true, true) => String::from("(no description)"),
    };
    if table.doc_count > 0 {
        line.push_str(&format!(" [{} docs]", table.doc_count));
    }
    line
}
