use serde::Deserialize;

/// Main configuration structure for Sitemap-Lens
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub fetcher: FetcherConfig,
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the client
    #[serde(rename = "client-name")]
    pub client_name: String,

    /// Version of the client
    #[serde(rename = "client-version")]
    pub client_version: String,

    /// URL with information about the client
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            client_name: "SitemapLens".to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/sitemap-lens/sitemap-lens".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// User agent sent when fetching sitemap documents
    ///
    /// Format: `Name/Version (+ContactURL)`
    pub fn sitemap_agent(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.client_name, self.client_version, self.contact_url
        )
    }

    /// Browser-like user agent sent when fetching pages for metadata
    pub fn page_agent(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.client_name, self.client_version, self.contact_url
        )
    }
}

/// HTTP fetch behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Timeout for a single sitemap fetch (seconds)
    #[serde(rename = "sitemap-timeout-secs")]
    pub sitemap_timeout_secs: u64,

    /// Maximum redirect hops followed for a page fetch
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Accept-Language header sent with page fetches
    #[serde(rename = "accept-language")]
    pub accept_language: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            page_timeout_secs: 10,
            sitemap_timeout_secs: 30,
            max_redirects: 10,
            accept_language: "en-US,en;q=0.9".to_string(),
        }
    }
}

/// Tree limiting and batching configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Children included under each non-root tree node
    #[serde(rename = "max-children-per-parent")]
    pub max_children_per_parent: usize,

    /// Nested sitemaps fetched from a sitemap index
    #[serde(rename = "max-nested-sitemaps")]
    pub max_nested_sitemaps: usize,

    /// URLs per outer orchestrator batch (progress is reported per batch)
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Concurrent page fetches within a batch
    #[serde(rename = "sub-batch-size")]
    pub sub_batch_size: usize,

    /// URLs accepted by a single batch fetch request
    #[serde(rename = "max-urls-per-request")]
    pub max_urls_per_request: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_children_per_parent: 20,
            max_nested_sitemaps: 10,
            batch_size: 10,
            sub_batch_size: 5,
            max_urls_per_request: 50,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path for the JSON export of all records
    #[serde(rename = "json-path")]
    pub json_path: Option<String>,

    /// Path for the CSV export of all records
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,

    /// Path for the markdown summary
    #[serde(rename = "summary-path")]
    pub summary_path: Option<String>,
}
