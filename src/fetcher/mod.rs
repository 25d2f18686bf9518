//! Fetcher module for sitemap documents and page metadata
//!
//! This module contains the network side of the pipeline, including:
//! - HTTP client construction for sitemaps and pages
//! - Single-page fetching with failure classification
//! - The batched, fail-soft metadata orchestrator

mod client;
mod orchestrator;

pub use client::{build_page_client, build_sitemap_client, fetch_text, FetchedPage};
pub use orchestrator::{CancelFlag, MetaFetchOrchestrator, Progress};
