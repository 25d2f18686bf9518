use url::Url;

/// Splits a URL path into its non-empty `/`-delimited segments
///
/// Segments are returned as they appear in the URL (still percent-encoded).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_lens::url::path_segments;
///
/// let url = Url::parse("https://example.com/blog//2024/post/").unwrap();
/// assert_eq!(path_segments(&url), vec!["blog", "2024", "post"]);
///
/// let root = Url::parse("https://example.com/").unwrap();
/// assert!(path_segments(&root).is_empty());
/// ```
pub fn path_segments(url: &Url) -> Vec<String> {
    url.path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins segments back into the absolute path prefix used as a tree key
///
/// The empty slice maps to the empty string (the root).
pub fn join_path(segments: &[String]) -> String {
    if segments.is_empty() {
        return String::new();
    }
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_and_fragment_ignored() {
        let url = Url::parse("https://example.com/docs/intro?x=1#top").unwrap();
        assert_eq!(path_segments(&url), vec!["docs", "intro"]);
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path(&[]), "");
        assert_eq!(
            join_path(&["a".to_string(), "b".to_string()]),
            "/a/b"
        );
    }
}
