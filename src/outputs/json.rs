//! JSON artifact generation: the article dataset, the presenter feed, and
//! the build log.
//!
//! Artifacts are pretty-printed with 4-space indentation, matching the
//! formatting of the files already deployed, so diffs between builds stay
//! readable and the unchanged-file check is byte-stable.

use crate::models::Article;
use crate::present::DisplayBlock;
use crate::utils::write_if_changed;
use chrono::Utc;
use serde::Serialize;
use std::error::Error;
use tracing::{info, instrument};

/// Metadata about one build, written alongside the dataset.
///
/// `had_connection` distinguishes "the store returned nothing" from "the
/// store was unreachable"; the deploy workflow inspects it.
#[derive(Debug, Serialize)]
pub struct BuildLog {
    pub timestamp_utc: String,
    pub article_count: usize,
    pub had_connection: bool,
    pub store: Option<String>,
    pub warnings: Vec<String>,
}

impl BuildLog {
    pub fn new(article_count: usize, had_connection: bool, store: Option<String>) -> Self {
        let mut warnings = Vec::new();
        if !had_connection {
            warnings.push("No store connection established".to_string());
        }
        if article_count == 0 {
            warnings.push("Zero articles returned".to_string());
        }
        Self {
            timestamp_utc: Utc::now().to_rfc3339(),
            article_count,
            had_connection,
            store,
            warnings,
        }
    }
}

/// Serialize with 4-space indentation and a trailing newline.
fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    let mut out = String::from_utf8(buf)?;
    out.push('\n');
    Ok(out)
}

/// Write `articles.json`, the canonical dataset the page fetches.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, count = articles.len()))]
pub async fn write_articles(articles: &[Article], output_dir: &str) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/articles.json", output_dir.trim_end_matches('/'));
    write_if_changed(&path, &to_pretty_json(&articles)?).await?;
    info!(count = articles.len(), "Article dataset up to date");
    Ok(())
}

/// Write `display.json`, the presenter's block lists.
///
/// One array of display blocks per article, in publication order, for
/// renderers that consume pre-presented data instead of the raw dataset.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_display_feed(
    blocks: &[Vec<DisplayBlock>],
    output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/display.json", output_dir.trim_end_matches('/'));
    write_if_changed(&path, &to_pretty_json(&blocks)?).await?;
    Ok(())
}

/// Write `build_log.json`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir))]
pub async fn write_build_log(log: &BuildLog, output_dir: &str) -> Result<(), Box<dyn Error>> {
    let path = format!("{}/build_log.json", output_dir.trim_end_matches('/'));
    write_if_changed(&path, &to_pretty_json(&log)?).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Link;

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let articles = vec![Article {
            id: "1".to_string(),
            title: "T".to_string(),
            date_display: "2024-03-15".to_string(),
            body_html: String::new(),
            sources: vec![],
        }];
        let json = to_pretty_json(&articles).unwrap();
        assert!(json.contains("    \"id\": \"1\""));
        assert!(json.ends_with("]\n"));
    }

    #[test]
    fn test_build_log_warnings() {
        let log = BuildLog::new(0, false, None);
        assert_eq!(log.warnings.len(), 2);
        assert!(!log.had_connection);

        let log = BuildLog::new(3, true, Some("articles.json".to_string()));
        assert!(log.warnings.is_empty());
        assert_eq!(log.article_count, 3);
    }

    #[test]
    fn test_article_dataset_shape() {
        let articles = vec![Article {
            id: "a".to_string(),
            title: "T".to_string(),
            date_display: "2024-03-15".to_string(),
            body_html: "<strong>b</strong>".to_string(),
            sources: vec![Link {
                href: "https://a.com".to_string(),
                label: "a.com".to_string(),
            }],
        }];
        let json = to_pretty_json(&articles).unwrap();
        assert!(json.contains("\"dateDisplay\""));
        assert!(json.contains("\"bodyHtml\""));
        assert!(json.contains("\"label\": \"a.com\""));
    }
}
