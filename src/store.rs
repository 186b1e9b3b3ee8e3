//! Raw record retrieval from the backing store.
//!
//! The build reads a JSON array of raw article records either from a local
//! file (an exported snapshot) or from an HTTP(S) endpoint fronting the
//! document database. Either way the decode is tolerant per record: a record
//! that fails to deserialize is logged and skipped, so one malformed row
//! never fails the batch.
//!
//! Records are returned ordered newest-first (date descending, then id
//! descending), matching the order the legacy store query produced, and
//! truncated to the configured article limit.

use crate::models::{DateField, RawArticleRecord, RecordId};
use chrono::DateTime;
use std::cmp::Ordering;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Load records from a local JSON file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn fetch_file(path: &str, limit: usize) -> Result<Vec<RawArticleRecord>, Box<dyn Error>> {
    let body = fs::read_to_string(path).await?;
    let records = records_from_json(&body)?;
    info!(count = records.len(), "Loaded records from file");
    Ok(order_and_limit(records, limit))
}

/// Load records from an HTTP(S) endpoint returning a JSON array.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn fetch_url(url: &str, limit: usize) -> Result<Vec<RawArticleRecord>, Box<dyn Error>> {
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    let records = records_from_json(&body)?;
    info!(count = records.len(), "Fetched records from endpoint");
    Ok(order_and_limit(records, limit))
}

/// Decode a JSON array of records, skipping elements that do not conform.
fn records_from_json(body: &str) -> Result<Vec<RawArticleRecord>, Box<dyn Error>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let total = values.len();

    let records: Vec<RawArticleRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = i, error = %e, "Skipping malformed record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            total, "Some records were malformed and skipped"
        );
    }
    Ok(records)
}

/// Sort newest-first and truncate to the article limit.
fn order_and_limit(mut records: Vec<RawArticleRecord>, limit: usize) -> Vec<RawArticleRecord> {
    records.sort_by(|a, b| {
        date_key(b)
            .cmp(&date_key(a))
            .then_with(|| cmp_ids(b.id.as_ref(), a.id.as_ref()))
    });
    records.truncate(limit);
    records
}

/// A sortable rendition of the stored date. ISO-formatted dates and RFC 3339
/// timestamps compare correctly as strings; anything else sorts as raw text.
fn date_key(record: &RawArticleRecord) -> String {
    match &record.date {
        Some(DateField::Timestamp(ts)) => DateTime::from_timestamp(ts.seconds, ts.nanoseconds)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Some(DateField::Text(s)) => s.clone(),
        Some(DateField::Other(value)) => value.to_string(),
        None => String::new(),
    }
}

/// Compare ids numerically when both are numeric, textually otherwise.
fn cmp_ids(a: Option<&RecordId>, b: Option<&RecordId>) -> Ordering {
    match (a, b) {
        (Some(RecordId::Num(x)), Some(RecordId::Num(y))) => x.cmp(y),
        _ => {
            let x = a.map(ToString::to_string).unwrap_or_default();
            let y = b.map(ToString::to_string).unwrap_or_default();
            x.cmp(&y)
        }
    }
}
