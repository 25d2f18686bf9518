//! Integration tests for Sitemap-Lens
//!
//! These tests use wiremock to serve sitemaps and pages and run the full
//! resolve → build → select → fetch cycle end-to-end.

mod export_tests;
mod pipeline_tests;
mod service_tests;
