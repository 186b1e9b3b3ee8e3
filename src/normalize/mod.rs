//! The article normalization pipeline.
//!
//! This module turns one untrusted [`RawArticleRecord`] into one canonical
//! [`Article`], composing the three field normalizers:
//!
//! - [`date`]: heterogeneous date representations to a canonical display string
//! - [`sources`]: heterogeneous sources input to a validated link list
//! - [`body`]: free text to an injection-safe HTML fragment
//!
//! Everything here is pure and synchronous: no I/O, no shared state, and no
//! error can escape, because every field normalizer degrades malformed input
//! to a safe default. A batch of records can therefore be normalized
//! independently and in any order.

pub mod body;
pub mod date;
pub mod sources;

use crate::models::{Article, RawArticleRecord};

/// Normalize one raw record into a canonical [`Article`].
///
/// `store_id` is the store-provided identifier (a document id or batch
/// position) used when the record carries no `id` field of its own. Title
/// defaults to the empty string; the body falls back through the alternate
/// field names the store has accumulated.
pub fn normalize_article(store_id: &str, raw: &RawArticleRecord) -> Article {
    Article {
        id: raw
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| store_id.to_string()),
        title: raw.title.clone().unwrap_or_default(),
        date_display: date::normalize_date(raw.date.as_ref()),
        body_html: body::format_body(raw.body_text()),
        sources: sources::parse_sources(raw.sources.as_ref()),
    }
}
