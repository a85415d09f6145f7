//! `tg generate` command implementation.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tg_app::{AppState, GuideController};
use tg_client::{GuideResult, Transport};
use tg_renderer::{RenderResult, TocEntry, escape_html};

use super::{BackendArgs, build_controller, describe_backend};
use crate::error::CliError;
use crate::output::Output;

/// Output format for a generated guide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Rendered HTML fragment (or page with --standalone).
    #[default]
    Html,
    /// JSON with the markdown, rendered HTML and table of contents.
    Json,
    /// The guide markdown as returned by the backend.
    Markdown,
}

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Fully qualified table name, e.g. tracking.AdClickEvent.
    table: String,

    #[command(flatten)]
    backend: BackendArgs,

    /// Write the guide to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Wrap HTML output in a complete page with a table of contents.
    #[arg(long)]
    standalone: bool,

    /// Enable verbose output (request and state transition logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the guide request fails, or the
    /// output cannot be written.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.backend.load_config()?;
        if !config.features.table_guide {
            return Err(CliError::Validation(
                "table guide is disabled (features.table_guide = false)".to_owned(),
            ));
        }
        output.backend(&describe_backend(&config));

        let mut controller = build_controller(&config);
        output.generating(self.table.trim());
        let (result, document) = request_guide(&mut controller, &self.table).await?;

        let rendered = render_output(&result, &document, self.format, self.standalone)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                output.wrote(&result.table, path);
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                if !rendered.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                output.generated(&result.table, document.toc.len());
            }
        }

        Ok(())
    }
}

/// Submit `table` and wait for the outcome.
///
/// The controller is never mounted, so no example index is fetched.
async fn request_guide<T: Transport>(
    controller: &mut GuideController<T>,
    table: &str,
) -> Result<(GuideResult, RenderResult), CliError> {
    controller.set_table_name(table);
    controller.submit();
    controller.settle().await;

    match controller.state() {
        AppState::Success(result) => {
            let document = controller.document().unwrap_or_default();
            Ok((result.clone(), document))
        }
        AppState::Error(message) => Err(CliError::Guide(message.clone())),
        state => Err(CliError::Guide(format!(
            "guide request did not complete (state: {state})"
        ))),
    }
}

#[derive(Serialize)]
struct JsonGuide<'a> {
    table: &'a str,
    guide: &'a str,
    html: &'a str,
    toc: &'a [TocEntry],
}

fn render_output(
    result: &GuideResult,
    document: &RenderResult,
    format: Format,
    standalone: bool,
) -> Result<String, CliError> {
    Ok(match format {
        Format::Markdown => result.guide.clone(),
        Format::Json => serde_json::to_string_pretty(&JsonGuide {
            table: &result.table,
            guide: &result.guide,
            html: &document.html,
            toc: &document.toc,
        })?,
        Format::Html if standalone => standalone_page(&result.table, document),
        Format::Html => document.html.clone(),
    })
}

/// Wrap rendered HTML in a minimal page titled with the table name.
fn standalone_page(table: &str, document: &RenderResult) -> String {
    let title = escape_html(table);
    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(page, "<title>{title} - Table Guide</title>").unwrap();
    page.push_str("</head>\n<body>\n");

    if !document.toc.is_empty() {
        page.push_str("<nav class=\"guide-toc\">\n<ul>\n");
        for entry in &document.toc {
            writeln!(
                page,
                "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
                entry.level,
                entry.id,
                escape_html(&entry.title)
            )
            .unwrap();
        }
        page.push_str("</ul>\n</nav>\n");
    }

    writeln!(page, "<main class=\"guide\" data-table=\"{title}\">").unwrap();
    page.push_str(&document.html);
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tg_client::{GuideClient, MockTransport};
    use tg_renderer::render_guide;

    use super::*;

    fn controller(transport: MockTransport) -> GuideController<MockTransport> {
        GuideController::new(GuideClient::with_transport(
            "http://localhost:8000",
            transport,
        ))
    }

    #[tokio::test]
    async fn test_request_guide_skips_example_index() {
        let mut controller = controller(
            MockTransport::new()
                .with_json("/api/fixtures_index", 200, r#"{"tables":[{"name":"a.B"}]}"#)
                .with_json("/api/table_guide", 200, r##"{"guide":"# Orders\n\n## Columns"}"##),
        );

        let (result, document) = request_guide(&mut controller, " sales.OrderHeader ")
            .await
            .unwrap();

        assert_eq!(result.table, "sales.OrderHeader");
        assert_eq!(document.toc.len(), 2);
        let requests = controller.client().transport().requests();
        assert_eq!(
            requests,
            vec!["http://localhost:8000/api/table_guide?table=sales.OrderHeader"]
        );
    }

    #[tokio::test]
    async fn test_request_guide_error_message() {
        let mut controller = controller(MockTransport::new().with_json(
            "/api/table_guide",
            404,
            r#"{"detail":"Table not found"}"#,
        ));

        let err = request_guide(&mut controller, "nonexistent.Table")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Table not found");
    }

    fn result(guide: &str) -> GuideResult {
        GuideResult {
            table: "sales.OrderHeader".to_owned(),
            guide: guide.to_owned(),
        }
    }

    #[test]
    fn test_markdown_output_is_raw_guide() {
        let guide = "# Orders\n\nOne row per order.\n";
        let rendered =
            render_output(&result(guide), &render_guide(guide), Format::Markdown, false).unwrap();
        assert_eq!(rendered, guide);
    }

    #[test]
    fn test_html_fragment() {
        let guide = "# Orders";
        let document = render_guide(guide);
        let rendered = render_output(&result(guide), &document, Format::Html, false).unwrap();
        assert_eq!(rendered, document.html);
    }

    #[test]
    fn test_json_output_fields() {
        let guide = "# Orders\n\n## Columns";
        let rendered =
            render_output(&result(guide), &render_guide(guide), Format::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["table"], "sales.OrderHeader");
        assert_eq!(value["guide"], guide);
        assert_eq!(value["toc"][1]["id"], "columns");
        assert_eq!(value["toc"][1]["level"], 2);
        assert!(value["html"].as_str().unwrap().contains("<h2 id=\"columns\">"));
    }

    #[test]
    fn test_standalone_page_has_title_and_toc() {
        let document = render_guide("# Orders\n\n## Join <Keys>");
        let page = standalone_page("sales.OrderHeader", &document);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>sales.OrderHeader - Table Guide</title>"));
        assert!(page.contains(r##"<a href="#orders">Orders</a>"##));
        assert!(page.contains(r##"<a href="#join-keys">Join &lt;Keys&gt;</a>"##));
        assert!(page.contains(&document.html));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_standalone_page_escapes_table_name() {
        let page = standalone_page("a<b", &render_guide("text"));
        assert!(page.contains("<title>a&lt;b - Table Guide</title>"));
        assert!(!page.contains("guide-toc"));
    }
}
