use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of fetching one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Error,
}

impl FetchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<meta>` tag recorded verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTag {
    /// `name`, `property` or `http-equiv`, whichever the tag carries first
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

/// Metadata for one requested page
///
/// Every requested URL gets exactly one record. Error records keep all
/// metadata fields empty and carry a message in `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_url: String,
    pub og_type: String,
    pub og_site_name: String,
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    pub twitter_site: String,
    pub favicon: String,
    pub all_meta_tags: Vec<MetaTag>,
    pub status: FetchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PageMetaRecord {
    /// An empty success record for `url`, to be filled by the extractor
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            description: String::new(),
            canonical: String::new(),
            og_title: String::new(),
            og_description: String::new(),
            og_image: String::new(),
            og_url: String::new(),
            og_type: String::new(),
            og_site_name: String::new(),
            twitter_card: String::new(),
            twitter_title: String::new(),
            twitter_description: String::new(),
            twitter_image: String::new(),
            twitter_site: String::new(),
            favicon: String::new(),
            all_meta_tags: Vec::new(),
            status: FetchStatus::Success,
            error: None,
        }
    }

    /// An error record for `url`; every metadata field stays empty
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "Unknown error".to_string();
        }

        Self {
            status: FetchStatus::Error,
            error: Some(error),
            ..Self::empty(url)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_record_keeps_fields_empty() {
        let record = PageMetaRecord::failed("https://example.com/x", "HTTP 404");
        assert!(record.is_error());
        assert_eq!(record.error.as_deref(), Some("HTTP 404"));
        assert!(record.title.is_empty());
        assert!(record.og_image.is_empty());
        assert!(record.all_meta_tags.is_empty());
    }

    #[test]
    fn test_failed_record_never_has_blank_error() {
        let record = PageMetaRecord::failed("https://example.com/x", "");
        assert_eq!(record.error.as_deref(), Some("Unknown error"));
    }

    #[test]
    fn test_json_field_names() {
        let record = PageMetaRecord::empty("https://example.com/");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("ogTitle").is_some());
        assert!(json.get("twitterSite").is_some());
        assert!(json.get("allMetaTags").is_some());
        assert!(json.get("error").is_none());
    }
}
