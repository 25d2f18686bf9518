//! Sitemap-Lens: sitemap explorer and social metadata auditor
//!
//! This crate resolves a website's sitemap into a flat list of pages, arranges
//! those pages into a path tree with per-branch limiting, tracks a selection
//! over the tree, and fetches Open Graph / Twitter / SEO metadata for the
//! selected pages through a bounded batch pipeline.

pub mod config;
pub mod fetcher;
pub mod meta;
pub mod output;
pub mod pipeline;
pub mod selection;
pub mod service;
pub mod sitemap;
pub mod tree;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Lens operations
#[derive(Debug, Error)]
pub enum LensError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("XML parse error for {url}: {message}")]
    XmlParse { url: String, message: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl LensError {
    /// Returns true if this error came from the network or a remote server
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::HttpStatus { .. } | Self::Timeout { .. } | Self::Reqwest(_)
        )
    }

    /// Returns true if this error came from malformed remote content
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::XmlParse { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Sitemap-Lens operations
pub type Result<T> = std::result::Result<T, LensError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use fetcher::{CancelFlag, MetaFetchOrchestrator, Progress};
pub use meta::{FetchStatus, MetaTag, PageMetaRecord};
pub use pipeline::Analysis;
pub use selection::SelectionTracker;
pub use sitemap::{SitemapEntry, SitemapResolver};
pub use tree::{PathTree, TreeStats};
