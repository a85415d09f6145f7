//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Anchor id used when a heading has no usable characters.
const FALLBACK_ANCHOR: &str = "heading";

/// Derive the anchor id for a heading from its text content.
///
/// Lower-cases the text, drops every character outside `[a-z0-9]`, whitespace
/// and `-`, turns each whitespace run into a single `-`, then trims leading and
/// trailing dashes. Text with nothing left yields `"heading"`.
///
/// Identical text always yields an identical id, so links built from a
/// heading title keep working across renders.
///
/// # Examples
///
/// ```
/// use tg_renderer::anchor_id;
///
/// assert_eq!(anchor_id("Column Reference"), "column-reference");
/// assert_eq!(anchor_id("What's  New?"), "whats-new");
/// assert_eq!(anchor_id("!!!"), "heading");
/// ```
#[must_use]
pub fn anchor_id(text: &str) -> String {
    let mut id = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            in_whitespace = true;
            continue;
        }
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if in_whitespace {
            id.push('-');
            in_whitespace = false;
        }
        id.push(c);
    }

    let id = id.trim_matches('-');
    if id.is_empty() {
        FALLBACK_ANCHOR.to_owned()
    } else {
        id.to_owned()
    }
}

/// Schemes a link or image may point at. Anything else is dropped.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Return `url` if it is relative, a fragment, or uses an allowed scheme,
/// otherwise an empty string.
///
/// Whitespace and control characters are ignored when reading the scheme,
/// matching how browsers parse `java\tscript:`.
#[must_use]
pub(crate) fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    let prefix = &url[..colon];
    if prefix.contains(['/', '?', '#']) {
        return url;
    }

    let scheme: String = prefix
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if ALLOWED_SCHEMES.contains(&scheme.as_str()) {
        url
    } else {
        ""
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_id_basic() {
        assert_eq!(anchor_id("Hello World"), "hello-world");
        assert_eq!(anchor_id("Overview"), "overview");
    }

    #[test]
    fn test_anchor_id_strips_punctuation() {
        assert_eq!(anchor_id("What's New?"), "whats-new");
        assert_eq!(anchor_id("tracking.AdClickEvent"), "trackingadclickevent");
        assert_eq!(anchor_id("Step 1: Load (raw)"), "step-1-load-raw");
    }

    #[test]
    fn test_anchor_id_collapses_whitespace() {
        assert_eq!(anchor_id("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(anchor_id("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_anchor_id_keeps_existing_dashes() {
        assert_eq!(anchor_id("kebab-case"), "kebab-case");
        assert_eq!(anchor_id("a - b"), "a---b");
    }

    #[test]
    fn test_anchor_id_trims_dashes_and_spaces() {
        assert_eq!(anchor_id("  Spaces  "), "spaces");
        assert_eq!(anchor_id("--Edge--"), "edge");
        assert_eq!(anchor_id("- Bullet-like"), "bullet-like");
    }

    #[test]
    fn test_anchor_id_underscore_is_dropped() {
        assert_eq!(anchor_id("user_id"), "userid");
    }

    #[test]
    fn test_anchor_id_symbols_only_fallback() {
        assert_eq!(anchor_id("!!!"), "heading");
        assert_eq!(anchor_id("🚀 ✨"), "heading");
        assert_eq!(anchor_id("---"), "heading");
        assert_eq!(anchor_id(""), "heading");
    }

    #[test]
    fn test_anchor_id_non_ascii_letters_dropped() {
        assert_eq!(anchor_id("Café Métrics"), "caf-mtrics");
    }

    #[test]
    fn test_anchor_id_is_idempotent() {
        for text in ["Column Reference", "What's New?", "  x  y  ", "日本語", "A-B c"] {
            let once = anchor_id(text);
            assert_eq!(anchor_id(text), once);
            assert_eq!(anchor_id(&once), once);
        }
    }

    #[test]
    fn test_safe_url_keeps_web_and_relative_targets() {
        for url in [
            "https://example.com/a?b=c",
            "HTTP://example.com",
            "mailto:data-team@example.com",
            "#column-reference",
            "lineage.png",
            "../tables/orders.md",
            "/docs/a:b",
            "?table=a.b",
            "",
        ] {
            assert_eq!(safe_url(url), url);
        }
    }

    #[test]
    fn test_safe_url_drops_script_and_data_targets() {
        for url in [
            "javascript:alert(1)",
            "JavaScript:alert(document.cookie)",
            " javascript:alert(1)",
            "java\tscript:alert(1)",
            "vbscript:msgbox",
            "data:text/html;base64,PHNjcmlwdD4=",
            "file:///etc/passwd",
        ] {
            assert_eq!(safe_url(url), "", "{url:?}");
        }
    }

    #[test]
    fn test_heading_level_to_num() {
        assert_eq!(heading_level_to_num(HeadingLevel::H1), 1);
        assert_eq!(heading_level_to_num(HeadingLevel::H4), 4);
        assert_eq!(heading_level_to_num(HeadingLevel::H6), 6);
    }
}
