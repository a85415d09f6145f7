//! Markdown renderer for generated table guides.
//!
//! Guides arrive as arbitrary markdown from an external AI service. This crate
//! turns that text into HTML that is stable to navigate:
//!
//! - Headings of levels 1-4 carry an anchor id derived by [`anchor_id`]
//! - Tables are wrapped in a horizontally scrollable container with styled cells
//! - Inline code and fenced code blocks render distinctly
//! - Constructs the renderer does not support degrade to escaped text
//!
//! Shared functionality (lists, emphasis, links, headings) lives in the generic
//! [`MarkdownRenderer`], while format-specific elements (code, tables, images)
//! are delegated to a [`RenderBackend`].
//!
//! # Example
//!
//! ```
//! use tg_renderer::render_guide;
//!
//! let result = render_guide("## Column Reference\n\n`user_id` is the primary key.");
//! assert!(result.html.contains(r#"<h2 id="column-reference">"#));
//! assert_eq!(result.toc[0].id, "column-reference");
//! ```

mod backend;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html};
pub use util::anchor_id;

/// Render guide markdown to HTML with the default backend.
#[must_use]
pub fn render_guide(markdown: &str) -> RenderResult {
    MarkdownRenderer::<HtmlBackend>::new().render_markdown(markdown)
}
