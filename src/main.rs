//! # Article Press
//!
//! A static-site build for short news-style articles kept in a document
//! database. Raw records accumulate in loosely-structured, inconsistently
//! shaped fields; this tool normalizes them into a canonical, injection-safe
//! dataset and publishes the static artifacts the page is served from.
//!
//! ## Usage
//!
//! ```sh
//! article_press --feed-url https://store.example.com/articles -o ./docs
//! ```
//!
//! ## Architecture
//!
//! The build follows a pipeline architecture:
//! 1. **Fetch**: load raw records from a JSON snapshot or HTTP endpoint,
//!    ordered newest-first and truncated to the article limit
//! 2. **Normalize**: canonicalize dates, sources, and body text per record
//! 3. **Present**: map each canonical article to its ordered display blocks
//! 4. **Publish**: write `articles.json`, `display.json`, `build_log.json`,
//!    and the `index.html` shell, skipping unchanged files
//!
//! The normalization core is pure and total: a malformed field degrades to a
//! safe default, so one bad record never breaks the rest of the page.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod models;
mod normalize;
mod outputs;
mod present;
mod store;
mod utils;

use cli::Cli;
use models::Article;
use normalize::normalize_article;
use outputs::{json, site};
use present::present;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("article_press starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.input, ?args.feed_url, ?args.output_dir, "Parsed CLI arguments");
    let limit = args.effective_limit();
    if limit != args.limit {
        warn!(configured = args.limit, effective = limit, "Article limit out of range; using default");
    }

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Fetch raw records ----
    let (store_name, fetched) = if let Some(ref path) = args.input {
        (path.clone(), store::fetch_file(path, limit).await)
    } else if let Some(ref url) = args.feed_url {
        (url.clone(), store::fetch_url(url, limit).await)
    } else {
        error!("No record source configured; pass --input or --feed-url");
        return Err("no record source configured".into());
    };

    let (records, had_connection) = match fetched {
        Ok(records) => (records, true),
        Err(e) => {
            error!(store = %store_name, error = %e, "Failed to fetch records");
            (Vec::new(), false)
        }
    };
    info!(count = records.len(), store = %store_name, "Records ready for normalization");

    // ---- Normalize ----
    let articles: Vec<Article> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            // Batch position stands in for a document id when the record
            // carries no id of its own.
            let article = normalize_article(&(i + 1).to_string(), record);
            debug!(
                index = i,
                id = %article.id,
                title = %truncate_for_log(&article.title, 80),
                source_count = article.sources.len(),
                "Normalized article"
            );
            article
        })
        .collect();

    // ---- Present ----
    let display_feed: Vec<_> = articles.iter().map(present).collect();

    // ---- Publish artifacts ----
    json::write_articles(&articles, &args.output_dir).await?;
    json::write_display_feed(&display_feed, &args.output_dir).await?;

    let build_log = json::BuildLog::new(articles.len(), had_connection, Some(store_name));
    json::write_build_log(&build_log, &args.output_dir).await?;

    site::write_index_html(&args.output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = articles.len(),
        warnings = build_log.warnings.len(),
        "Build artifacts written"
    );

    // The build log is written even for a failed build so the deploy
    // workflow can report why the dataset did not refresh.
    if !had_connection {
        error!("Build failed: no store connection");
        return Err("no store connection".into());
    }
    if articles.is_empty() && !args.allow_empty {
        error!("Build failed: zero articles (pass --allow-empty to permit)");
        return Err("zero articles".into());
    }

    info!("Build completed successfully");
    Ok(())
}
