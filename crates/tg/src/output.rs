//! Status reporting for `tg` commands.
//!
//! All of it goes to stderr: stdout carries only guide content and example
//! listings, so both can be piped.

use std::fmt::Display;
use std::path::Path;

use console::{Style, Term};

/// Writes the progress and outcome lines of a command.
pub(crate) struct Output {
    term: Term,
    quiet: Style,
    done: Style,
    notice: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            quiet: Style::new().dim().for_stderr(),
            done: Style::new().green().for_stderr(),
            notice: Style::new().yellow().for_stderr(),
            failure: Style::new().red().for_stderr(),
        }
    }

    /// Which backend the command talks to.
    pub(crate) fn backend(&self, description: &str) {
        self.line(&self.quiet, format!("Backend: {description}"));
    }

    /// A guide request was submitted.
    pub(crate) fn generating(&self, table: &str) {
        self.line(&self.quiet, format!("Generating guide for {table}..."));
    }

    /// A guide was printed to stdout.
    pub(crate) fn generated(&self, table: &str, sections: usize) {
        self.line(
            &self.done,
            format!("Generated guide for {table} ({sections} sections)"),
        );
    }

    /// A guide was written to `path`.
    pub(crate) fn wrote(&self, table: &str, path: &Path) {
        self.line(
            &self.done,
            format!("Wrote guide for {table} to {}", path.display()),
        );
    }

    /// The example list is the built-in one.
    pub(crate) fn fallback_examples(&self) {
        self.line(
            &self.notice,
            "Backend index unavailable, showing built-in examples".to_owned(),
        );
    }

    /// The command failed.
    pub(crate) fn failure(&self, err: &impl Display) {
        self.line(&self.failure, format!("Error: {err}"));
    }

    fn line(&self, style: &Style, msg: String) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
