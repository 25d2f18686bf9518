//! HTML metadata extraction
//!
//! This module reads the `<head>` metadata of a fetched page:
//! - `<title>` and `<meta name="description">`
//! - Open Graph (`og:*`) and Twitter card (`twitter:*`) tags
//! - `<link rel="canonical">` and favicon links
//! - Every named meta tag, verbatim, for auditing

use crate::meta::{MetaTag, PageMetaRecord};
use crate::url::resolve_reference;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// Favicon `rel` values, in order of preference
const FAVICON_RELS: &[&str] = &["icon", "shortcut icon", "apple-touch-icon"];

/// Meta tag contents keyed by lowercased `name` / `property`
///
/// The first tag with a given key wins.
#[derive(Debug, Default)]
struct MetaIndex {
    by_name: HashMap<String, String>,
    by_property: HashMap<String, String>,
}

impl MetaIndex {
    fn name(&self, key: &str) -> Option<&str> {
        self.by_name.get(key).map(String::as_str)
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.by_property.get(key).map(String::as_str)
    }

    /// Open Graph tags are specified with `property`, but `name` is common too
    fn og(&self, key: &str) -> String {
        self.property(key)
            .or_else(|| self.name(key))
            .unwrap_or_default()
            .to_string()
    }

    /// Twitter tags are specified with `name`, but `property` is common too
    fn twitter(&self, key: &str) -> String {
        self.name(key)
            .or_else(|| self.property(key))
            .unwrap_or_default()
            .to_string()
    }
}

/// Extracts page metadata from HTML
///
/// # Field Resolution
///
/// | Field | Source | Fallback |
/// |-------|--------|----------|
/// | description | `meta[name=description]` | `og:description` |
/// | canonical | `link[rel=canonical]` | the page URL |
/// | favicon | `icon`, `shortcut icon`, `apple-touch-icon` links | `/favicon.ico` |
///
/// Relative canonical and favicon references are resolved against `page_url`.
///
/// # Example
///
/// ```
/// use sitemap_lens::meta::extract_meta;
/// use url::Url;
///
/// let html = r#"<html><head><title>Hello</title>
///     <meta property="og:description" content="From OG"></head></html>"#;
/// let page = Url::parse("https://example.com/post").unwrap();
/// let record = extract_meta(html, &page);
/// assert_eq!(record.title, "Hello");
/// assert_eq!(record.description, "From OG");
/// assert_eq!(record.canonical, "https://example.com/post");
/// assert_eq!(record.favicon, "https://example.com/favicon.ico");
/// ```
pub fn extract_meta(html: &str, page_url: &Url) -> PageMetaRecord {
    let document = Html::parse_document(html);
    let (index, all_meta_tags) = read_meta_tags(&document);

    let mut record = PageMetaRecord::empty(page_url.as_str());

    record.title = extract_title(&document).unwrap_or_default();
    record.description = index
        .name("description")
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| index.og("og:description"));
    record.canonical = extract_canonical(&document, page_url);

    record.og_title = index.og("og:title");
    record.og_description = index.og("og:description");
    record.og_image = index.og("og:image");
    record.og_url = index.og("og:url");
    record.og_type = index.og("og:type");
    record.og_site_name = index.og("og:site_name");

    record.twitter_card = index.twitter("twitter:card");
    record.twitter_title = index.twitter("twitter:title");
    record.twitter_description = index.twitter("twitter:description");
    record.twitter_image = index.twitter("twitter:image");
    record.twitter_site = index.twitter("twitter:site");

    record.favicon = extract_favicon(&document, page_url);
    record.all_meta_tags = all_meta_tags;

    record
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Indexes meta tags and records every named one with content
fn read_meta_tags(document: &Html) -> (MetaIndex, Vec<MetaTag>) {
    let mut index = MetaIndex::default();
    let mut all = Vec::new();

    let Ok(meta_selector) = Selector::parse("meta") else {
        return (index, all);
    };

    for element in document.select(&meta_selector) {
        let attrs = element.value();
        let content = attrs.attr("content").map(str::trim).unwrap_or_default();
        if content.is_empty() {
            continue;
        }

        let name = attrs.attr("name").map(str::trim).filter(|s| !s.is_empty());
        let property = attrs.attr("property").map(str::trim).filter(|s| !s.is_empty());
        let http_equiv = attrs
            .attr("http-equiv")
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(name) = name {
            index
                .by_name
                .entry(name.to_lowercase())
                .or_insert_with(|| content.to_string());
        }
        if let Some(property) = property {
            index
                .by_property
                .entry(property.to_lowercase())
                .or_insert_with(|| content.to_string());
        }

        if let Some(key) = name.or(property).or(http_equiv) {
            all.push(MetaTag {
                name: key.to_string(),
                content: content.to_string(),
                property: property.map(str::to_string),
            });
        }
    }

    (index, all)
}

/// Normalized `rel` attribute of a link element
fn link_rel(element: &ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("rel")
        .map(|rel| rel.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
}

fn extract_canonical(document: &Html, page_url: &Url) -> String {
    let canonical = Selector::parse("link[href]").ok().and_then(|selector| {
        document
            .select(&selector)
            .filter(|link| link_rel(link).as_deref() == Some("canonical"))
            .find_map(|link| resolve_reference(page_url, link.value().attr("href")?))
    });

    canonical.unwrap_or_else(|| page_url.to_string())
}

fn extract_favicon(document: &Html, page_url: &Url) -> String {
    let links: Vec<(String, String)> = match Selector::parse("link[href]") {
        Ok(selector) => document
            .select(&selector)
            .filter_map(|link| {
                let rel = link_rel(&link)?;
                let href = link.value().attr("href")?.to_string();
                Some((rel, href))
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    FAVICON_RELS
        .iter()
        .find_map(|wanted| {
            links
                .iter()
                .filter(|(rel, _)| rel == wanted)
                .find_map(|(_, href)| resolve_reference(page_url, href))
        })
        .or_else(|| resolve_reference(page_url, "/favicon.ico"))
        .unwrap_or_default()
}
