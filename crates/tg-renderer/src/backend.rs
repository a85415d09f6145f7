//! Render backend trait for format-specific rendering.
//!
//! The generic renderer walks markdown events and handles structure; a backend
//! decides how code, tables and images look in the output format.

use pulldown_cmark::Alignment;

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - Code blocks and inline code spans
/// - Table containers and cells
/// - Images
pub trait RenderBackend {
    /// Render a fenced or indented code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Language from the fence info string (e.g., "sql"), if any
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render an inline code span.
    fn inline_code(code: &str, out: &mut String);

    /// Render everything that precedes the first table row.
    fn table_start(out: &mut String);

    /// Render everything that follows the last table row.
    fn table_end(out: &mut String);

    /// Render the opening tag of a table cell.
    fn table_cell_start(header: bool, alignment: Alignment, out: &mut String);

    /// Render the closing tag of a table cell.
    fn table_cell_end(header: bool, out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
