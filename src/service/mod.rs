//! Request handlers for sitemap resolution and batch metadata fetch
//!
//! Each handler takes a JSON-shaped request, validates it before any network
//! call, and returns a JSON-shaped response:
//! - `{ url }` → `{ urls, totalUrls }` or `{ error, urls: [], totalUrls: 0 }`
//! - `{ urls: [...] }` → `{ results, processedCount, errorCount }`, with the
//!   body read through [`BatchFetchRequest::from_json`]

use crate::fetcher::{CancelFlag, MetaFetchOrchestrator};
use crate::meta::PageMetaRecord;
use crate::sitemap::{SitemapEntry, SitemapResolver};
use crate::LensError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a sitemap resolution request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of a sitemap resolution response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub urls: Vec<SitemapEntry>,
    pub total_urls: usize,
}

impl ResolveResponse {
    fn failed(error: &LensError) -> Self {
        Self {
            error: Some(error.to_string()),
            urls: Vec::new(),
            total_urls: 0,
        }
    }
}

/// Body of a batch fetch response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFetchResponse {
    pub results: Vec<PageMetaRecord>,
    pub processed_count: usize,
    pub error_count: usize,
}

/// Resolves the sitemap named in `request`
///
/// Failure never yields partial results: the response carries the error
/// message with an empty URL list.
pub async fn handle_resolve(resolver: &SitemapResolver, request: ResolveRequest) -> ResolveResponse {
    let url = match request.url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => {
            return ResolveResponse::failed(&LensError::Validation(
                "Sitemap URL is required".to_string(),
            ))
        }
    };

    match resolver.resolve(url).await {
        Ok(urls) => ResolveResponse {
            error: None,
            total_urls: urls.len(),
            urls,
        },
        Err(e) => {
            tracing::warn!("Sitemap resolution failed for {}: {}", url, e);
            ResolveResponse::failed(&e)
        }
    }
}

/// Body of a batch fetch request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchFetchRequest {
    pub urls: Vec<String>,
}

impl BatchFetchRequest {
    /// Reads a request from a raw JSON body
    ///
    /// # Arguments
    ///
    /// * `body` - The request body, expected to be `{ "urls": [...] }`
    /// * `max_urls` - Cap on accepted URLs; extra entries are dropped
    ///
    /// # Returns
    ///
    /// * `Ok(BatchFetchRequest)` - Up to `max_urls` URLs in request order
    /// * `Err(LensError::Validation)` - `urls` is missing, not a list, empty,
    ///   or contains a non-string entry
    pub fn from_json(body: &Value, max_urls: usize) -> Result<Self, LensError> {
        let list = body
            .get("urls")
            .and_then(Value::as_array)
            .ok_or_else(|| LensError::Validation("URLs array is required".to_string()))?;

        if list.is_empty() {
            return Err(LensError::Validation("URLs array is required".to_string()));
        }

        let mut urls = Vec::with_capacity(list.len().min(max_urls));
        for item in list.iter().take(max_urls) {
            let url = item.as_str().ok_or_else(|| {
                LensError::Validation(format!("URL entries must be strings, got {}", item))
            })?;
            urls.push(url.to_string());
        }

        if list.len() > max_urls {
            tracing::debug!("Truncated batch request from {} to {} URLs", list.len(), max_urls);
        }

        Ok(Self { urls })
    }
}

/// Fetches metadata for the URLs of a batch fetch request
///
/// Requests longer than the orchestrator's per-call cap are truncated.
///
/// # Returns
///
/// * `Ok(BatchFetchResponse)` - One record per accepted URL; per-page
///   failures appear as error records
/// * `Err(LensError::Validation)` - The request holds no URLs
pub async fn handle_batch_fetch(
    orchestrator: &MetaFetchOrchestrator,
    request: BatchFetchRequest,
) -> Result<BatchFetchResponse, LensError> {
    if request.urls.is_empty() {
        return Err(LensError::Validation("URLs array is required".to_string()));
    }

    let results = orchestrator
        .fetch_all(&request.urls, &CancelFlag::new(), |progress| {
            tracing::debug!(
                "Batch progress: {}/{} ({}%)",
                progress.completed,
                progress.total,
                progress.percent
            );
        })
        .await;

    let error_count = results.iter().filter(|r| r.is_error()).count();
    Ok(BatchFetchResponse {
        processed_count: results.len(),
        error_count,
        results,
    })
}
