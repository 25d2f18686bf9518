//! Recursive sitemap resolution
//!
//! Fetches a sitemap document and, when it is a sitemap index, fetches its
//! nested sitemaps concurrently. Nested failures are logged and skipped; only
//! the top-level fetch can fail a resolution.
//!
//! One resolution never has more than `max_nested` document fetches in flight,
//! however deeply indexes nest.

use crate::config::Config;
use crate::fetcher::{build_sitemap_client, fetch_text};
use crate::sitemap::parser::{parse_sitemap, SitemapDocument};
use crate::sitemap::SitemapEntry;
use crate::url::parse_http_url;
use crate::LensError;
use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use reqwest::Client;
use tokio::sync::Semaphore;

/// Maximum nesting of sitemap indexes followed below the requested document
pub const MAX_INDEX_DEPTH: usize = 3;

/// Resolves sitemap URLs into flat lists of page entries
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    client: Client,
    max_nested: usize,
}

impl SitemapResolver {
    /// Creates a resolver with a client built from the configuration
    pub fn new(config: &Config) -> Result<Self, LensError> {
        let client = build_sitemap_client(config)?;
        Ok(Self::with_client(client, config.limits.max_nested_sitemaps))
    }

    /// Creates a resolver around an existing client
    pub fn with_client(client: Client, max_nested: usize) -> Self {
        Self { client, max_nested }
    }

    /// Resolves a sitemap URL into page entries
    ///
    /// # Resolution Flow
    ///
    /// 1. Validate the URL (no network call for an invalid one)
    /// 2. Fetch and parse the document
    /// 3. `urlset` → its entries
    /// 4. `sitemapindex` → fetch up to `max_nested` children concurrently,
    ///    concatenating whatever resolves; if nothing resolves, return the
    ///    index's own references
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SitemapEntry>)` - Entries in document order
    /// * `Err(LensError)` - The top-level fetch or parse failed
    pub async fn resolve(&self, url: &str) -> Result<Vec<SitemapEntry>, LensError> {
        let url = parse_http_url(url)?;
        tracing::info!("Resolving sitemap {}", url);

        let limiter = Semaphore::new(self.max_nested.max(1));
        let entries = self.resolve_at_depth(url.to_string(), 0, &limiter).await?;

        tracing::info!("Resolved {} entries from {}", entries.len(), url);
        Ok(entries)
    }

    fn resolve_at_depth<'a>(
        &'a self,
        url: String,
        depth: usize,
        limiter: &'a Semaphore,
    ) -> BoxFuture<'a, Result<Vec<SitemapEntry>, LensError>> {
        async move {
            let references = match self.fetch_limited(&url, limiter).await? {
                SitemapDocument::UrlSet(entries) => return Ok(entries),
                SitemapDocument::Index(references) => references,
            };

            if depth >= MAX_INDEX_DEPTH {
                tracing::warn!(
                    "Sitemap index nesting limit reached at {}, keeping {} references",
                    url,
                    references.len()
                );
                return Ok(references);
            }

            if references.len() > self.max_nested {
                tracing::warn!(
                    "Sitemap index {} lists {} sitemaps, fetching the first {}",
                    url,
                    references.len(),
                    self.max_nested
                );
            }

            let nested: Vec<_> = references
                .iter()
                .take(self.max_nested)
                .map(|reference| self.resolve_at_depth(reference.loc.clone(), depth + 1, limiter))
                .collect();
            let results = join_all(nested).await;

            let mut resolved = Vec::new();
            for (reference, result) in references.iter().zip(results) {
                match result {
                    Ok(entries) => {
                        tracing::debug!(
                            "Nested sitemap {} yielded {} entries",
                            reference.loc,
                            entries.len()
                        );
                        resolved.extend(entries);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping nested sitemap {}: {}", reference.loc, e);
                    }
                }
            }

            if resolved.is_empty() {
                tracing::warn!(
                    "No nested sitemaps of {} resolved, falling back to its references",
                    url
                );
                return Ok(references);
            }

            Ok(resolved)
        }
        .boxed()
    }

    /// Fetches a document while holding one permit of `limiter`
    ///
    /// The permit is released before nested sitemaps are resolved, so a
    /// parent index never blocks its own children.
    async fn fetch_limited(
        &self,
        url: &str,
        limiter: &Semaphore,
    ) -> Result<SitemapDocument, LensError> {
        let _permit = limiter.acquire().await.map_err(|e| LensError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        self.fetch_document(url).await
    }

    /// Fetches and parses a single sitemap document
    async fn fetch_document(&self, url: &str) -> Result<SitemapDocument, LensError> {
        let page = fetch_text(&self.client, url).await?;

        parse_sitemap(&page.body).map_err(|message| LensError::XmlParse {
            url: url.to_string(),
            message,
        })
    }
}
