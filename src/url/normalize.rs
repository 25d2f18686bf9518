use crate::{UrlError, UrlResult};
use url::Url;

/// Parses and validates an absolute HTTP(S) URL
///
/// # Validation Steps
///
/// 1. Trim surrounding whitespace; reject empty input
/// 2. Parse the URL; reject if malformed or relative
/// 3. Reject any scheme other than `http` / `https`
/// 4. Reject URLs without a host
///
/// # Examples
///
/// ```
/// use sitemap_lens::url::parse_http_url;
///
/// let url = parse_http_url("  https://example.com/sitemap.xml ").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/sitemap.xml");
///
/// assert!(parse_http_url("ftp://example.com/").is_err());
/// assert!(parse_http_url("/relative/path").is_err());
/// ```
pub fn parse_http_url(url_str: &str) -> UrlResult<Url> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("URL is empty".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves a possibly-relative reference against a base URL
///
/// Returns None for empty references and references that cannot be joined.
pub fn resolve_reference(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    base.join(reference).ok().map(|u| u.to_string())
}
