//! Command-line interface definitions for Article Press.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Options that the CI workflow sets can also be provided via environment
//! variables.

use clap::Parser;

/// Default article limit when the configured value is absent or out of range.
const DEFAULT_LIMIT: usize = 5;

/// Command-line arguments for the Article Press build.
///
/// Exactly one record source is used per build: a local JSON snapshot
/// (`--input`) or an HTTP(S) endpoint (`--feed-url`).
///
/// # Examples
///
/// ```sh
/// # Build from a local snapshot
/// article_press --input ./articles_export.json --output-dir ./docs
///
/// # Build from the store endpoint, keeping the newest 10 articles
/// article_press --feed-url https://store.example.com/articles --limit 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a JSON file containing an array of raw article records
    #[arg(short, long, conflicts_with = "feed_url")]
    pub input: Option<String>,

    /// HTTP(S) endpoint returning a JSON array of raw article records
    #[arg(long, env = "ARTICLE_FEED_URL")]
    pub feed_url: Option<String>,

    /// Output directory for the static site artifacts
    #[arg(short, long, default_value = "docs")]
    pub output_dir: String,

    /// Maximum number of articles to publish
    #[arg(short, long, env = "ARTICLE_LIMIT", default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Allow a build with zero articles to succeed
    #[arg(long, env = "BUILD_ALLOW_EMPTY")]
    pub allow_empty: bool,
}

impl Cli {
    /// The article limit with the historical sanity bounds applied:
    /// zero or implausibly large values fall back to the default.
    pub fn effective_limit(&self) -> usize {
        if self.limit == 0 || self.limit >= 5000 {
            DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}
