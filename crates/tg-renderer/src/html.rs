//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 with the class hooks the guide page styles against.

use std::fmt::Write;

use pulldown_cmark::Alignment;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// Class of the scroll container wrapped around every table.
const TABLE_WRAPPER_CLASS: &str = "table-scroll";
const TABLE_CLASS: &str = "guide-table";
const HEADER_CELL_CLASS: &str = "guide-th";
const DATA_CELL_CLASS: &str = "guide-td";
const INLINE_CODE_CLASS: &str = "inline-code";

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code class="language-*">` for code blocks
/// - `<code class="inline-code">` for inline code spans
/// - tables inside a horizontally scrollable `<div>`
/// - `<img>` for images
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn inline_code(code: &str, out: &mut String) {
        write!(
            out,
            r#"<code class="{INLINE_CODE_CLASS}">{}</code>"#,
            escape_html(code)
        )
        .unwrap();
    }

    fn table_start(out: &mut String) {
        write!(
            out,
            r#"<div class="{TABLE_WRAPPER_CLASS}"><table class="{TABLE_CLASS}">"#
        )
        .unwrap();
    }

    fn table_end(out: &mut String) {
        out.push_str("</table></div>");
    }

    fn table_cell_start(header: bool, alignment: Alignment, out: &mut String) {
        let (tag, class) = if header {
            ("th", HEADER_CELL_CLASS)
        } else {
            ("td", DATA_CELL_CLASS)
        };
        let style = match alignment {
            Alignment::Left => r#" style="text-align:left""#,
            Alignment::Center => r#" style="text-align:center""#,
            Alignment::Right => r#" style="text-align:right""#,
            Alignment::None => "",
        };
        write!(out, r#"<{tag} class="{class}"{style}>"#).unwrap();
    }

    fn table_cell_end(header: bool, out: &mut String) {
        out.push_str(if header { "</th>" } else { "</td>" });
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}
