//! Batched metadata fetching
//!
//! This module drives page fetches for a list of URLs:
//! - Outer batches (default 10) run one after another; progress is reported
//!   after each
//! - Inside a batch, pages are fetched in sub-batches (default 5) that run
//!   concurrently and fully settle before the next one starts
//! - Every URL yields exactly one record; failures become error records
//! - Cancellation is checked between outer batches

use crate::config::{Config, LimitsConfig};
use crate::fetcher::{build_page_client, fetch_text};
use crate::meta::{extract_meta, PageMetaRecord};
use crate::url::parse_http_url;
use crate::LensError;
use futures::future::join_all;
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Progress of a fetch run, reported after each outer batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total` as a rounded percentage
    pub percent: u8,
}

impl Progress {
    pub fn new(completed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100
        } else {
            ((completed as f64 / total as f64) * 100.0).round().min(100.0) as u8
        };

        Self {
            completed,
            total,
            percent,
        }
    }
}

/// Shared flag for cooperative cancellation between batches
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Fetches pages and extracts their metadata in bounded batches
#[derive(Debug, Clone)]
pub struct MetaFetchOrchestrator {
    client: Client,
    batch_size: usize,
    sub_batch_size: usize,
    max_urls_per_request: usize,
}

impl MetaFetchOrchestrator {
    /// Creates an orchestrator with a page client built from the configuration
    pub fn new(config: &Config) -> Result<Self, LensError> {
        let client = build_page_client(config)?;
        Ok(Self::with_client(client, &config.limits))
    }

    /// Creates an orchestrator around an existing client
    pub fn with_client(client: Client, limits: &LimitsConfig) -> Self {
        Self {
            client,
            batch_size: limits.batch_size.max(1),
            sub_batch_size: limits.sub_batch_size.max(1),
            max_urls_per_request: limits.max_urls_per_request.max(1),
        }
    }

    /// URLs accepted by a single [`fetch_all`](Self::fetch_all) call
    pub fn max_urls_per_request(&self) -> usize {
        self.max_urls_per_request
    }

    /// Fetches metadata for up to `max_urls_per_request` URLs
    ///
    /// Longer inputs are truncated. The call never fails as a whole: each URL
    /// produces one record, in input order. `on_progress` is invoked once per
    /// completed outer batch, or once with 100% for an empty input.
    ///
    /// If `cancel` is set between batches, the records gathered so far are
    /// returned.
    pub async fn fetch_all<F>(
        &self,
        urls: &[String],
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> Vec<PageMetaRecord>
    where
        F: FnMut(Progress),
    {
        let urls = if urls.len() > self.max_urls_per_request {
            tracing::warn!(
                "Truncating batch of {} URLs to {}",
                urls.len(),
                self.max_urls_per_request
            );
            &urls[..self.max_urls_per_request]
        } else {
            urls
        };

        let total = urls.len();
        let mut results = Vec::with_capacity(total);

        if total == 0 {
            on_progress(Progress::new(0, 0));
            return results;
        }

        for (batch_index, batch) in urls.chunks(self.batch_size).enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(
                    "Fetch cancelled after {} of {} URLs",
                    results.len(),
                    total
                );
                break;
            }

            tracing::debug!("Fetching batch {} ({} URLs)", batch_index + 1, batch.len());
            results.extend(self.fetch_batch(batch).await);

            on_progress(Progress::new(results.len(), total));
        }

        results
    }

    /// Fetches one outer batch in sub-batches
    ///
    /// Each sub-batch runs concurrently and fully settles before the next is
    /// issued, so at most `sub_batch_size` requests are in flight.
    pub async fn fetch_batch(&self, urls: &[String]) -> Vec<PageMetaRecord> {
        let mut records = Vec::with_capacity(urls.len());

        for sub_batch in urls.chunks(self.sub_batch_size) {
            let fetches = sub_batch.iter().map(|url| self.fetch_page_meta(url));
            records.extend(join_all(fetches).await);
        }

        records
    }

    /// Fetches one page and extracts its metadata
    ///
    /// Any failure (invalid URL, timeout, non-2xx, network error) is turned
    /// into an error record rather than returned.
    pub async fn fetch_page_meta(&self, url: &str) -> PageMetaRecord {
        let page_url = match parse_http_url(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Skipping invalid URL {}: {}", url, e);
                return PageMetaRecord::failed(url, e.to_string());
            }
        };

        match fetch_text(&self.client, page_url.as_str()).await {
            Ok(page) => {
                tracing::debug!("Fetched {} ({} bytes)", url, page.body.len());
                let mut record = extract_meta(&page.body, &page_url);
                record.url = url.to_string();
                record
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                PageMetaRecord::failed(url, e.to_string())
            }
        }
    }
}
