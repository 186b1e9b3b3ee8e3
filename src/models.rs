//! Data models for raw article records and their normalized representations.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawArticleRecord`]: An untrusted record exactly as the backing store returns it
//! - [`RecordId`], [`SourcesField`], [`DateField`]: closed unions over the field
//!   shapes that have accumulated in the store over time
//! - [`Link`]: a validated source link
//! - [`Article`]: the canonical, injection-safe record handed to the presenter
//!
//! The store has been migrated twice (MySQL, then a document database), so the
//! same logical field can arrive in several physical shapes. Rather than probing
//! JSON values at runtime, each variant field is modeled as an untagged enum
//! with one arm per recognized shape and a catch-all for anything else.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw article record as fetched from the backing store.
///
/// Every field is optional: historical records are sparse, and a missing field
/// must degrade to a safe default rather than fail the batch. The article text
/// may arrive under `content`, `text_body`, or `textBody` depending on which
/// writer produced the record; [`RawArticleRecord::body_text`] resolves the
/// precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArticleRecord {
    /// The record's own identifier, numeric in legacy rows, string in document rows.
    #[serde(default)]
    pub id: Option<RecordId>,
    /// The article headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Article text under the current field name.
    #[serde(default)]
    pub content: Option<String>,
    /// Article text under the legacy MySQL column name.
    #[serde(default)]
    pub text_body: Option<String>,
    /// Article text under the camelCase name some document writers used.
    #[serde(default, rename = "textBody")]
    pub text_body_camel: Option<String>,
    /// External reference links, in any of the shapes of [`SourcesField`].
    #[serde(default)]
    pub sources: Option<SourcesField>,
    /// Publication date, in any of the shapes of [`DateField`].
    #[serde(default)]
    pub date: Option<DateField>,
}

impl RawArticleRecord {
    /// The article text, preferring `content`, then `text_body`, then `textBody`.
    pub fn body_text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .or(self.text_body.as_deref())
            .or(self.text_body_camel.as_deref())
    }
}

/// A record identifier, either the legacy numeric id or a document-store id string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Num(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Num(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// The `sources` field in any of its stored shapes.
///
/// Writers have stored sources as a real JSON array, as a single string (bare
/// URL, delimited list, JSON-encoded array, or `"Label (url)"`), and
/// occasionally as something else entirely. The `Other` arm absorbs the last
/// case and parses to no sources, which the presenter treats as a normal state.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SourcesField {
    /// A real array; elements are kept as raw values since numeric entries exist.
    List(Vec<serde_json::Value>),
    /// A single string in one of the recognized textual shapes.
    Text(String),
    /// Anything else; yields an empty source list.
    Other(serde_json::Value),
}

/// The `date` field in any of its stored shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateField {
    /// A document-store timestamp wrapper.
    Timestamp(TimestampWrapper),
    /// A date string in one of several formats; unrecognized formats pass through.
    Text(String),
    /// Anything else; displayed as its JSON rendering, null as empty.
    Other(serde_json::Value),
}

/// A serialized store timestamp.
///
/// The client SDK emits `seconds`/`nanoseconds`, the admin SDK
/// `_seconds`/`_nanoseconds`; both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct TimestampWrapper {
    #[serde(alias = "_seconds")]
    pub seconds: i64,
    #[serde(default, alias = "_nanoseconds")]
    pub nanoseconds: u32,
}

/// A validated source link.
///
/// `href` is the original token text, verified to parse as an absolute URL with
/// a host. `label` is never empty: it is either the explicit label text from a
/// `"Label (url)"` token or derived from the link's registrable domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
    pub label: String,
}

/// A canonical, display-ready article.
///
/// Produced once per raw record and immutable afterwards. `body_html` contains
/// no tags other than `<strong>` and `<br>`; `sources` is either non-empty and
/// all-valid or empty; `date_display` is an ISO date, the raw date string, or
/// empty. Serializes with camelCase field names for the static JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub date_display: String,
    pub body_html: String,
    pub sources: Vec<Link>,
}
