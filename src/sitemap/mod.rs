//! Sitemap module
//!
//! This module turns a sitemap URL into a flat list of page entries:
//! - Parsing `urlset` and `sitemapindex` XML documents
//! - Fetching nested sitemaps of an index concurrently, fail-soft
//! - Falling back to the index's own references when nothing resolves

mod parser;
mod resolver;

pub use parser::{parse_sitemap, SitemapDocument};
pub use resolver::{SitemapResolver, MAX_INDEX_DEPTH};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One `<url>` (or `<sitemap>`) entry of a sitemap document
///
/// Identity is `loc`; entries are never modified after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapEntry {
    /// Absolute URL of the page (or nested sitemap)
    pub loc: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changefreq: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
}

impl SitemapEntry {
    /// Creates an entry with only a location
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    /// Parses `lastmod` as a W3C datetime (full RFC 3339 or date only)
    pub fn lastmod_date(&self) -> Option<DateTime<Utc>> {
        let raw = self.lastmod.as_deref()?.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }
}
