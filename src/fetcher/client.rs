//! HTTP client construction and single-page fetching
//!
//! This module handles:
//! - Building the sitemap client with an identifying user agent
//! - Building the page client with browser-like headers, redirects, and timeout
//! - Fetching a single page and classifying failures

use crate::config::Config;
use crate::LensError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Accept header sent with page fetches
const PAGE_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Page body content
    pub body: String,
}

/// Builds the HTTP client used for sitemap documents
///
/// # Example
///
/// ```no_run
/// use sitemap_lens::config::Config;
/// use sitemap_lens::fetcher::build_sitemap_client;
///
/// let client = build_sitemap_client(&Config::default()).unwrap();
/// ```
pub fn build_sitemap_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.sitemap_agent())
        .timeout(Duration::from_secs(config.fetcher.sitemap_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(config.fetcher.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the HTTP client used for page metadata fetches
///
/// The client carries the per-request timeout, so a slow page is cancelled
/// and reported as a timeout rather than holding a connection open.
pub fn build_page_client(config: &Config) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(PAGE_ACCEPT));

    // Fall back to a generic value if the configured one is not a valid header
    let language = HeaderValue::from_str(&config.fetcher.accept_language)
        .unwrap_or_else(|_| HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(ACCEPT_LANGUAGE, language);

    Client::builder()
        .user_agent(config.user_agent.page_agent())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.fetcher.page_timeout_secs))
        .redirect(Policy::limited(config.fetcher.max_redirects))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body
///
/// # Failure Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request timed out | `LensError::Timeout` |
/// | Non-2xx status | `LensError::HttpStatus` |
/// | Connection / body failure | `LensError::Fetch` |
///
/// No retries are attempted; a failure is terminal for that URL.
pub async fn fetch_text(client: &Client, url: &str) -> Result<FetchedPage, LensError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify_error(url, e))?;

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return Err(LensError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| classify_error(url, e))?;

    Ok(FetchedPage {
        final_url,
        status_code: status.as_u16(),
        body,
    })
}

/// Maps a reqwest error onto the transport error taxonomy
fn classify_error(url: &str, e: reqwest::Error) -> LensError {
    if e.is_timeout() {
        LensError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        LensError::Fetch {
            url: url.to_string(),
            message: "Connection refused".to_string(),
        }
    } else if e.is_redirect() {
        LensError::Fetch {
            url: url.to_string(),
            message: "Too many redirects".to_string(),
        }
    } else {
        LensError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
