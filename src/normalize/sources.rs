//! Source link parsing for the heterogeneous `sources` field.
//!
//! The stored `sources` value has drifted through several shapes over the
//! site's lifetime: a real array, a JSON-encoded array string, a newline- or
//! comma- or pipe-delimited string, a single bare URL, and `"Label (url)"`
//! pairs. All shapes converge here on one ordered, deduplicated, validated
//! link list. Tokens that fail URL validation are silently dropped; an empty
//! result is the normal "no sources" state, not an error.

use crate::models::{Link, SourcesField};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use url::Url;

/// Matches a `"Label (https://url)"` token, label first, URL in trailing parens.
static LABELED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\((https?://[^)]+)\)\s*$").unwrap());

/// Strips a trailing dash separator (hyphen, en dash, or em dash) off a label.
static TRAILING_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-–—]\s*$").unwrap());

/// Parse a stored `sources` field into an ordered, deduplicated link list.
///
/// Shape discrimination happens once per record:
/// - an array contributes each element as one candidate token;
/// - a string bracketed like a JSON array is parsed as one (falling back to a
///   single opaque token on malformed JSON);
/// - otherwise exactly one delimiter class splits the string, chosen by
///   priority: newline, then comma, then pipe;
/// - a string matching none of the above is a single token.
///
/// Each token may carry an explicit `"Label (url)"` label; otherwise the label
/// is derived from the URL's registrable domain. Duplicate hrefs keep the
/// first occurrence, case-sensitive, in input order.
pub fn parse_sources(input: Option<&SourcesField>) -> Vec<Link> {
    let tokens = match input {
        None => Vec::new(),
        Some(SourcesField::List(items)) => items
            .iter()
            .filter(|value| !value.is_null())
            .map(value_to_token)
            .collect(),
        Some(SourcesField::Text(s)) => split_tokens(s),
        Some(SourcesField::Other(_)) => Vec::new(),
    };

    tokens
        .iter()
        .filter_map(|token| parse_token(token))
        .unique_by(|link| link.href.clone())
        .collect()
}

/// Render an array element as a candidate token; non-string entries use their
/// JSON rendering, matching how the legacy page stringified them.
fn value_to_token(value: &serde_json::Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

/// Split a raw sources string into candidate tokens.
fn split_tokens(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::Array(items)) => items
                .iter()
                .filter(|value| !value.is_null())
                .map(value_to_token)
                .collect(),
            // Malformed JSON, or valid JSON that is not an array: the whole
            // string becomes one opaque token and takes its chances as a URL.
            _ => vec![trimmed.to_string()],
        };
    }

    // Exactly one delimiter class applies, by priority.
    let pieces: Vec<&str> = if trimmed.contains('\n') {
        trimmed.split('\n').collect()
    } else if trimmed.contains(',') {
        trimmed.split(',').collect()
    } else if trimmed.contains('|') {
        trimmed.split('|').collect()
    } else {
        return vec![trimmed.to_string()];
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate one candidate token into a [`Link`], or drop it.
fn parse_token(token: &str) -> Option<Link> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let (href, explicit_label) = match LABELED.captures(token) {
        Some(caps) => {
            let label = TRAILING_DASH.replace(caps[1].trim(), "").trim().to_string();
            let label = if label.is_empty() { None } else { Some(label) };
            (caps[2].trim().to_string(), label)
        }
        None => (token.to_string(), None),
    };

    // Strict construction validates; the original href text is what gets
    // published, so dedup and display never see the parser's normalization.
    let parsed = match Url::parse(&href) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(token = %href, error = %e, "Dropping invalid source URL");
            return None;
        }
    };
    let host = parsed.host_str()?;

    let label = explicit_label.unwrap_or_else(|| registrable_domain(host));
    // A degenerate host like "www." derives an empty label; treat it like
    // the hostless case and drop the link.
    if label.is_empty() {
        debug!(token = %href, "Dropping source with empty derived label");
        return None;
    }
    Some(Link { href, label })
}

/// Derive a display label from a hostname.
///
/// Strips a leading `www.` and, for hostnames with more than two labels,
/// keeps the last two. Heuristic eTLD+1: wrong for multi-part public
/// suffixes like `co.uk`, accepted as good enough here.
fn registrable_domain(hostname: &str) -> String {
    let host = hostname.strip_prefix("www.").unwrap_or(hostname);
    let parts: Vec<&str> = host.split('.').collect();
    if parts.len() <= 2 {
        return host.to_string();
    }
    parts[parts.len() - 2..].join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SourcesField {
        SourcesField::Text(s.to_string())
    }

    #[test]
    fn test_single_valid_url() {
        let links = parse_sources(Some(&text("https://example.com/a")));
        assert_eq!(
            links,
            vec![Link {
                href: "https://example.com/a".to_string(),
                label: "example.com".to_string(),
            }]
        );
    }

    #[test]
    fn test_array_input() {
        let field = SourcesField::List(vec![
            serde_json::json!("https://a.com/x"),
            serde_json::json!("https://b.com/y"),
        ]);
        let links = parse_sources(Some(&field));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "https://a.com/x");
        assert_eq!(links[1].href, "https://b.com/y");
    }

    #[test]
    fn test_duplicate_hrefs_keep_first() {
        let field = SourcesField::List(vec![
            serde_json::json!("https://a.com/x"),
            serde_json::json!("https://a.com/x"),
        ]);
        assert_eq!(parse_sources(Some(&field)).len(), 1);
    }

    #[test]
    fn test_dedup_is_case_sensitive_exact() {
        let field = SourcesField::List(vec![
            serde_json::json!("https://a.com/X"),
            serde_json::json!("https://a.com/x"),
        ]);
        assert_eq!(parse_sources(Some(&field)).len(), 2);
    }

    #[test]
    fn test_comma_delimited_with_www_stripping() {
        let links = parse_sources(Some(&text(
            "https://www.example.com/a, https://example.com/b",
        )));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "https://www.example.com/a");
        assert_eq!(links[0].label, "example.com");
        assert_eq!(links[1].href, "https://example.com/b");
        assert_eq!(links[1].label, "example.com");
    }

    #[test]
    fn test_pipe_delimited() {
        let links = parse_sources(Some(&text("https://a.com/1|https://b.com/2")));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "a.com");
    }

    #[test]
    fn test_newline_has_priority_over_comma() {
        // The comma stays inside the second token and invalidates it.
        let links = parse_sources(Some(&text("https://a.com/1\nhttps://b.com/2,3")));
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].href, "https://b.com/2,3");
    }

    #[test]
    fn test_json_array_string() {
        let links = parse_sources(Some(&text(r#"["https://a.com/1", "https://b.com/2"]"#)));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].href, "https://a.com/1");
    }

    #[test]
    fn test_malformed_json_array_string_dropped() {
        // Not valid JSON, and the whole string is not a valid URL either.
        let links = parse_sources(Some(&text(r#"["https://a.com/1", oops"#)));
        assert!(links.is_empty());
    }

    #[test]
    fn test_labeled_source() {
        let links = parse_sources(Some(&text("Example Site (https://example.com)")));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "Example Site");
        assert_eq!(links[0].href, "https://example.com");
    }

    #[test]
    fn test_labeled_source_trailing_dash_stripped() {
        let links = parse_sources(Some(&text("Example Site - (https://example.com)")));
        assert_eq!(links[0].label, "Example Site");

        let links = parse_sources(Some(&text("Example Site — (https://example.com)")));
        assert_eq!(links[0].label, "Example Site");
    }

    #[test]
    fn test_labeled_source_empty_label_falls_back_to_domain() {
        let links = parse_sources(Some(&text("(https://news.example.com/story)")));
        assert_eq!(links[0].label, "example.com");
    }

    #[test]
    fn test_invalid_urls_silently_dropped() {
        let links = parse_sources(Some(&text("not a url, https://ok.com/a")));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "https://ok.com/a");
    }

    #[test]
    fn test_relative_url_dropped() {
        assert!(parse_sources(Some(&text("/relative/path"))).is_empty());
    }

    #[test]
    fn test_hostless_scheme_dropped() {
        assert!(parse_sources(Some(&text("mailto:someone@example.com"))).is_empty());
    }

    #[test]
    fn test_bare_www_host_dropped() {
        // "https://www./x" parses with hostname "www.", whose label derives
        // to the empty string; the link is dropped, never published with an
        // empty label.
        assert!(parse_sources(Some(&text("https://www./x"))).is_empty());
        for link in parse_sources(Some(&text("https://www./x, https://ok.com/a"))) {
            assert!(!link.label.is_empty());
        }
    }

    #[test]
    fn test_empty_and_absent_inputs() {
        assert!(parse_sources(None).is_empty());
        assert!(parse_sources(Some(&text(""))).is_empty());
        assert!(parse_sources(Some(&text("   "))).is_empty());
        assert!(parse_sources(Some(&SourcesField::Other(serde_json::json!(7)))).is_empty());
    }

    #[test]
    fn test_subdomain_label_keeps_last_two() {
        let links = parse_sources(Some(&text("https://lite.cnn.com/story")));
        assert_eq!(links[0].label, "cnn.com");
    }

    #[test]
    fn test_registrable_domain_heuristic() {
        assert_eq!(registrable_domain("www.example.com"), "example.com");
        assert_eq!(registrable_domain("example.com"), "example.com");
        assert_eq!(registrable_domain("a.b.example.com"), "example.com");
        // Known limitation of the last-two-labels approximation.
        assert_eq!(registrable_domain("news.bbc.co.uk"), "co.uk");
    }
}
