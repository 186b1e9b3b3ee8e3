//! Body text formatting: escaping and light markup for article text.
//!
//! Article bodies are free text typed by editors, sometimes containing the
//! `%%` apostrophe placeholder the legacy ingest form produced, `**bold**`
//! spans, and whatever HTML someone pasted in. The output is an HTML fragment
//! in which the only tags are `<strong>` and `<br>`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Non-greedy bold span. Applied to escaped text only.
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Any line-break sequence: CRLF first so it is consumed as one break.
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\r|\n").unwrap());

/// Format raw article text into a safe HTML fragment.
///
/// The pipeline order is fixed and significant:
/// 1. `%%` becomes a literal apostrophe (legacy placeholder).
/// 2. `&`, `<`, `>` are entity-escaped, and only those.
/// 3. `**...**` spans become `<strong>...</strong>`.
/// 4. Line breaks become `<br>`.
///
/// Escaping strictly precedes the bold substitution. This is the security
/// invariant that makes the output injection-safe: by the time markup runs,
/// every angle bracket from the input is already an entity, so no input can
/// produce a tag other than the two introduced here. Reordering steps 2 and 3
/// reopens an injection path.
///
/// Never fails; absent input formats as the empty string.
pub fn format_body(raw: Option<&str>) -> String {
    let text = raw.unwrap_or("").replace("%%", "'");
    let escaped = escape_html(&text);
    let bolded = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    LINE_BREAK.replace_all(&bolded, "<br>").into_owned()
}

/// Entity-escape exactly `&`, `<`, and `>`. Ampersand first, so entities
/// produced here are not double-escaped.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_input() {
        assert_eq!(format_body(None), "");
        assert_eq!(format_body(Some("")), "");
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(format_body(Some("plain text")), "plain text");
    }

    #[test]
    fn test_bold_and_line_break() {
        assert_eq!(
            format_body(Some("a **b** c\nd")),
            "a <strong>b</strong> c<br>d"
        );
    }

    #[test]
    fn test_apostrophe_placeholder_is_literal() {
        // The placeholder resolves before escaping, to a literal apostrophe,
        // never an entity.
        assert_eq!(format_body(Some("it%%s fine")), "it's fine");
    }

    #[test]
    fn test_script_tag_is_escaped() {
        assert_eq!(
            format_body(Some("<script>alert(1)</script>")),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_precedes_bold_markup() {
        // Angle brackets inside a bold span are entities by the time the span
        // is wrapped, so the only tags in the output are the two we emit.
        assert_eq!(
            format_body(Some("**<b>**")),
            "<strong>&lt;b&gt;</strong>"
        );
    }

    #[test]
    fn test_ampersand_escaped_once() {
        assert_eq!(format_body(Some("a & b &amp; c")), "a &amp; b &amp;amp; c");
    }

    #[test]
    fn test_all_line_break_sequences() {
        assert_eq!(format_body(Some("a\r\nb\rc\nd")), "a<br>b<br>c<br>d");
    }

    #[test]
    fn test_bold_is_non_greedy() {
        assert_eq!(
            format_body(Some("**a** and **b**")),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_unclosed_bold_untouched() {
        assert_eq!(format_body(Some("**dangling")), "**dangling");
    }

    #[test]
    fn test_output_has_no_unescaped_angle_brackets() {
        let out = format_body(Some("x < y > z **<i>**\n<img src=x>"));
        let stripped = out.replace("<strong>", "").replace("</strong>", "").replace("<br>", "");
        assert!(!stripped.contains('<'));
        assert!(!stripped.contains('>'));
    }
}
