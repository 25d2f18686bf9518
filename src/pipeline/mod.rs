//! Analysis pipeline
//!
//! This module ties the components together:
//! - [`Analysis`] holds the state of one analysis session (entries, tree,
//!   selection, expanded paths) and recomputes it from scratch on change
//! - [`fetch_selection`] feeds a selection of any size through the
//!   orchestrator in request-sized chunks
//! - [`run_analysis`] runs resolve → build → select → fetch end to end
//! - [`export_report`] writes the exports configured in `[output]`

mod session;

pub use session::Analysis;

use crate::config::OutputConfig;
use crate::fetcher::{CancelFlag, MetaFetchOrchestrator, Progress};
use crate::meta::PageMetaRecord;
use crate::output::{generate_markdown_summary, write_csv, write_json};
use crate::sitemap::SitemapResolver;
use crate::tree::TreeStats;
use crate::LensError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Records gathered by a multi-chunk fetch
#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub records: Vec<PageMetaRecord>,
    /// The run stopped early because the cancel flag was set
    pub cancelled: bool,
}

/// Everything produced by one end-to-end analysis run
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub sitemap_url: String,
    pub generated_at: DateTime<Utc>,
    pub max_children_per_parent: usize,
    pub tree_stats: TreeStats,
    pub selected_count: usize,
    pub records: Vec<PageMetaRecord>,
    pub cancelled: bool,
}

impl AnalysisReport {
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_success()).count()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }
}

/// Fetches metadata for every URL in `urls`
///
/// The orchestrator accepts a bounded number of URLs per call, so the
/// selection is split into chunks of that size and fed through one after
/// another. Progress is reported over the whole selection. Cancellation is
/// checked before each chunk and, inside the orchestrator, before each batch.
pub async fn fetch_selection<F>(
    orchestrator: &MetaFetchOrchestrator,
    urls: &[String],
    cancel: &CancelFlag,
    mut on_progress: F,
) -> FetchOutcome
where
    F: FnMut(Progress),
{
    let total = urls.len();
    let mut outcome = FetchOutcome::default();

    if total == 0 {
        on_progress(Progress::new(0, 0));
        return outcome;
    }

    for chunk in urls.chunks(orchestrator.max_urls_per_request()) {
        if cancel.is_cancelled() {
            break;
        }

        let offset = outcome.records.len();
        let records = orchestrator
            .fetch_all(chunk, cancel, |p| {
                on_progress(Progress::new(offset + p.completed, total))
            })
            .await;
        outcome.records.extend(records);
    }

    outcome.cancelled = outcome.records.len() < total;
    if outcome.cancelled {
        tracing::warn!(
            "Fetch stopped early: {} of {} URLs processed",
            outcome.records.len(),
            total
        );
    }

    outcome
}

/// Resolves a sitemap, builds the tree, selects the limited set and fetches
/// metadata for it
///
/// # Returns
///
/// * `Ok((Analysis, AnalysisReport))` - The session state and the fetched records
/// * `Err(LensError)` - Sitemap resolution failed; nothing was fetched
pub async fn run_analysis<F>(
    resolver: &SitemapResolver,
    orchestrator: &MetaFetchOrchestrator,
    sitemap_url: &str,
    max_children_per_parent: usize,
    cancel: &CancelFlag,
    on_progress: F,
) -> Result<(Analysis, AnalysisReport), LensError>
where
    F: FnMut(Progress),
{
    let entries = resolver.resolve(sitemap_url).await?;
    let analysis = Analysis::from_entries(entries, max_children_per_parent);

    let selected = analysis.selected_urls();
    tracing::info!(
        "Selected {} of {} URLs for metadata fetch",
        selected.len(),
        analysis.stats().total_original_urls
    );

    let outcome = fetch_selection(orchestrator, &selected, cancel, on_progress).await;

    let report = AnalysisReport {
        sitemap_url: sitemap_url.to_string(),
        generated_at: Utc::now(),
        max_children_per_parent,
        tree_stats: analysis.stats(),
        selected_count: selected.len(),
        records: outcome.records,
        cancelled: outcome.cancelled,
    };

    tracing::info!(
        "Analysis complete: {} succeeded, {} failed",
        report.success_count(),
        report.error_count()
    );

    Ok((analysis, report))
}

/// Writes every export configured in `outputs`
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Paths written, in JSON, CSV, summary order
/// * `Err(LensError::Output)` - An export could not be written; exports
///   before it are kept
pub fn export_report(
    outputs: &OutputConfig,
    report: &AnalysisReport,
) -> Result<Vec<PathBuf>, LensError> {
    let mut written = Vec::new();

    if let Some(path) = &outputs.json_path {
        let path = PathBuf::from(path);
        write_json(&report.records, &path)?;
        written.push(path);
    }

    if let Some(path) = &outputs.csv_path {
        let path = PathBuf::from(path);
        write_csv(&report.records, &path)?;
        written.push(path);
    }

    if let Some(path) = &outputs.summary_path {
        let path = PathBuf::from(path);
        generate_markdown_summary(report, &path)?;
        written.push(path);
    }

    Ok(written)
}
