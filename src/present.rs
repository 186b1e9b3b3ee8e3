//! Presentation mapping from canonical articles to display blocks.
//!
//! The presenter is the sole interface the rendering layer consumes. It maps
//! one [`Article`] into an ordered list of plain-data [`DisplayBlock`]s and
//! performs no further parsing or validation, so any rendering technology can
//! consume the output through an adapter.

use crate::models::{Article, Link};
use crate::normalize::date::humanize_date;
use serde::Serialize;

/// One display block of a rendered article.
///
/// Serializes as a single-key object per block (`{"title": ...}` etc.); the
/// no-sources state serializes as the bare string `"no-sources"` so renderers
/// can distinguish it from an accidentally empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayBlock {
    Index(String),
    Title(String),
    Date(String),
    Body(String),
    Sources(Vec<Link>),
    NoSources,
}

/// Map a canonical article into its ordered display blocks.
///
/// Block order is fixed: index, title, date, body, sources. The date block is
/// included only when the article has a non-empty date; the canonical date
/// value is re-parsed here into a short human format when possible, and shown
/// verbatim otherwise.
pub fn present(article: &Article) -> Vec<DisplayBlock> {
    let mut blocks = vec![
        DisplayBlock::Index(article.id.clone()),
        DisplayBlock::Title(article.title.clone()),
    ];

    let date = humanize_date(&article.date_display);
    if !date.is_empty() {
        blocks.push(DisplayBlock::Date(date));
    }

    blocks.push(DisplayBlock::Body(article.body_html.clone()));

    if article.sources.is_empty() {
        blocks.push(DisplayBlock::NoSources);
    } else {
        blocks.push(DisplayBlock::Sources(article.sources.clone()));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Article {
        Article {
            id: "3".to_string(),
            title: "Headline".to_string(),
            date_display: "2025-09-18".to_string(),
            body_html: "body<br>text".to_string(),
            sources: vec![Link {
                href: "https://example.com/a".to_string(),
                label: "example.com".to_string(),
            }],
        }
    }

    #[test]
    fn test_block_order() {
        let blocks = present(&article());
        assert_eq!(
            blocks,
            vec![
                DisplayBlock::Index("3".to_string()),
                DisplayBlock::Title("Headline".to_string()),
                DisplayBlock::Date("18 Sep 2025".to_string()),
                DisplayBlock::Body("body<br>text".to_string()),
                DisplayBlock::Sources(vec![Link {
                    href: "https://example.com/a".to_string(),
                    label: "example.com".to_string(),
                }]),
            ]
        );
    }

    #[test]
    fn test_empty_date_omits_block() {
        let mut a = article();
        a.date_display = String::new();
        let blocks = present(&a);
        assert_eq!(blocks.len(), 4);
        assert!(!blocks.iter().any(|b| matches!(b, DisplayBlock::Date(_))));
    }

    #[test]
    fn test_unparseable_date_shown_verbatim() {
        let mut a = article();
        a.date_display = "circa 1999".to_string();
        let blocks = present(&a);
        assert!(blocks.contains(&DisplayBlock::Date("circa 1999".to_string())));
    }

    #[test]
    fn test_no_sources_block() {
        let mut a = article();
        a.sources.clear();
        let blocks = present(&a);
        assert_eq!(blocks.last(), Some(&DisplayBlock::NoSources));
    }

    #[test]
    fn test_block_serialization_shape() {
        let mut a = article();
        a.sources.clear();
        let json = serde_json::to_string(&present(&a)).unwrap();
        assert!(json.contains(r#"{"index":"3"}"#));
        assert!(json.contains(r#"{"title":"Headline"}"#));
        assert!(json.contains(r#""no-sources""#));
    }
}
