//! Sitemap XML parser
//!
//! Parses `urlset` and `sitemapindex` documents into a [`SitemapDocument`].
//! The document kind is decided structurally from the root element.

use crate::sitemap::SitemapEntry;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// A `<urlset>` listing page URLs
    UrlSet(Vec<SitemapEntry>),

    /// A `<sitemapindex>` listing nested sitemap documents
    Index(Vec<SitemapEntry>),
}

impl SitemapDocument {
    /// Returns the entries of the document regardless of its kind
    pub fn entries(&self) -> &[SitemapEntry] {
        match self {
            Self::UrlSet(entries) | Self::Index(entries) => entries,
        }
    }

    /// Returns true if the document is a sitemap index
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootKind {
    UrlSet,
    Index,
}

impl RootKind {
    fn entry_tag(self) -> &'static [u8] {
        match self {
            Self::UrlSet => b"url",
            Self::Index => b"sitemap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"loc" => Some(Self::Loc),
            b"lastmod" => Some(Self::Lastmod),
            b"changefreq" => Some(Self::Changefreq),
            b"priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

/// Fields collected for the entry currently being read
#[derive(Debug, Default)]
struct PartialEntry {
    loc: String,
    lastmod: String,
    changefreq: String,
    priority: String,
}

impl PartialEntry {
    fn push_text(&mut self, field: Field, text: &str) {
        let target = match field {
            Field::Loc => &mut self.loc,
            Field::Lastmod => &mut self.lastmod,
            Field::Changefreq => &mut self.changefreq,
            Field::Priority => &mut self.priority,
        };
        target.push_str(text);
    }

    /// Finishes the entry; entries without a `loc` are dropped
    fn finish(self) -> Option<SitemapEntry> {
        let loc = self.loc.trim();
        if loc.is_empty() {
            return None;
        }

        Some(SitemapEntry {
            loc: loc.to_string(),
            lastmod: non_empty(&self.lastmod),
            changefreq: non_empty(&self.changefreq),
            priority: self.priority.trim().parse::<f32>().ok(),
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Parses a sitemap XML string
///
/// A single `<url>` / `<sitemap>` child and many children both produce a
/// sequence. Entries lacking a `<loc>` are excluded.
///
/// # Returns
///
/// * `Ok(SitemapDocument)` - The parsed document
/// * `Err(String)` - Malformed XML or an unexpected root element
///
/// # Example
///
/// ```
/// use sitemap_lens::sitemap::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset><url><loc>https://example.com/a</loc></url></urlset>"#;
/// let doc = parse_sitemap(xml).unwrap();
/// assert!(matches!(doc, SitemapDocument::UrlSet(ref e) if e.len() == 1));
/// ```
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<RootKind> = None;
    let mut depth: usize = 0;
    let mut current: Option<PartialEntry> = None;
    let mut field: Option<Field> = None;
    let mut entries = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                depth += 1;

                match root {
                    None => root = Some(root_kind(name)?),
                    Some(kind) if depth == 2 && name == kind.entry_tag() => {
                        current = Some(PartialEntry::default());
                    }
                    Some(_) if depth == 3 && current.is_some() => {
                        field = Field::from_tag(name);
                    }
                    Some(_) => {}
                }
            }
            Ok(Event::Empty(e)) => {
                // Self-closing root such as `<urlset/>`
                if root.is_none() {
                    root = Some(root_kind(e.local_name().as_ref())?);
                }
            }
            Ok(Event::End(_)) => {
                match depth {
                    3 => field = None,
                    2 => {
                        if let Some(entry) = current.take().and_then(PartialEntry::finish) {
                            entries.push(entry);
                        }
                    }
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| format!("invalid text content: {}", e))?;
                    entry.push_text(f, &text);
                }
            }
            Ok(Event::CData(t)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    entry.push_text(f, &String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                ));
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err("unexpected end of document".to_string());
    }

    match root {
        Some(RootKind::UrlSet) => Ok(SitemapDocument::UrlSet(entries)),
        Some(RootKind::Index) => Ok(SitemapDocument::Index(entries)),
        None => Err("document has no root element".to_string()),
    }
}

fn root_kind(name: &[u8]) -> Result<RootKind, String> {
    match name {
        b"urlset" => Ok(RootKind::UrlSet),
        b"sitemapindex" => Ok(RootKind::Index),
        other => Err(format!(
            "unexpected root element <{}>",
            String::from_utf8_lossy(other)
        )),
    }
}
