//! Sitemap-Lens main entry point
//!
//! This is the command-line interface for the Sitemap-Lens metadata auditor.

use anyhow::{Context, Result};
use clap::Parser;
use sitemap_lens::config::{load_config_or_default, validate, Config};
use sitemap_lens::output::{print_statistics, ResultStatistics};
use sitemap_lens::pipeline::{export_report, run_analysis, Analysis};
use sitemap_lens::tree::render_rows;
use sitemap_lens::{CancelFlag, MetaFetchOrchestrator, SitemapResolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap-Lens: sitemap explorer and social metadata auditor
///
/// Sitemap-Lens resolves a website's sitemap, arranges its pages into a
/// path tree limited per branch, and fetches Open Graph, Twitter Card and
/// SEO metadata for the selected pages.
#[derive(Parser, Debug)]
#[command(name = "sitemap-lens")]
#[command(version = "1.0.0")]
#[command(about = "Sitemap explorer and social metadata auditor", long_about = None)]
struct Cli {
    /// URL of the sitemap or sitemap index to analyze
    #[arg(value_name = "SITEMAP_URL")]
    sitemap_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum children kept per parent path
    #[arg(short, long, value_name = "N")]
    limit: Option<usize>,

    /// Expand a tree path in the printed outline (repeatable)
    #[arg(long, value_name = "PATH")]
    expand: Vec<String>,

    /// Resolve and print the tree without fetching any pages
    #[arg(long, conflicts_with_all = ["json", "csv", "summary"])]
    tree_only: bool,

    /// Write fetched records as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write fetched records as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write a markdown summary of the run
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.tree_only {
        handle_tree_only(&config, &cli).await
    } else {
        handle_analysis(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_lens=info,warn"),
            1 => EnvFilter::new("sitemap_lens=debug,info"),
            2 => EnvFilter::new("sitemap_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(limit) = cli.limit {
        config.limits.max_children_per_parent = limit;
    }
    if let Some(path) = &cli.json {
        config.output.json_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.csv {
        config.output.csv_path = Some(path.display().to_string());
    }
    if let Some(path) = &cli.summary {
        config.output.summary_path = Some(path.display().to_string());
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Prints the limited tree outline with the requested paths expanded
fn print_tree(analysis: &mut Analysis, expand: &[String]) {
    for path in expand {
        analysis.reveal(path);
    }

    let stats = analysis.stats();
    println!("=== Sitemap Tree ===\n");
    println!(
        "  URLs: {} total, {} within limit of {} per parent",
        stats.total_original_urls,
        stats.total_limited_urls,
        analysis.limit()
    );
    if stats.invalid_urls > 0 {
        println!("  Invalid URLs skipped: {}", stats.invalid_urls);
    }
    println!("  Selected: {}\n", analysis.selection().len());
    print!("{}", render_rows(&analysis.rows()));
    println!();
}

/// Handles --tree-only: resolves the sitemap and prints the tree
async fn handle_tree_only(config: &Config, cli: &Cli) -> Result<()> {
    let resolver = SitemapResolver::new(config).context("Failed to build HTTP client")?;

    let entries = resolver
        .resolve(&cli.sitemap_url)
        .await
        .with_context(|| format!("Failed to resolve sitemap {}", cli.sitemap_url))?;

    let mut analysis = Analysis::from_entries(entries, config.limits.max_children_per_parent);
    print_tree(&mut analysis, &cli.expand);

    Ok(())
}

/// Handles the full resolve → build → select → fetch run
async fn handle_analysis(config: &Config, cli: &Cli) -> Result<()> {
    let resolver = SitemapResolver::new(config).context("Failed to build HTTP client")?;
    let orchestrator =
        MetaFetchOrchestrator::new(config).context("Failed to build HTTP client")?;

    let cancel = CancelFlag::new();
    spawn_cancel_on_ctrl_c(cancel.clone());

    let (mut analysis, report) = run_analysis(
        &resolver,
        &orchestrator,
        &cli.sitemap_url,
        config.limits.max_children_per_parent,
        &cancel,
        |progress| {
            tracing::info!(
                "Fetched {}/{} pages ({}%)",
                progress.completed,
                progress.total,
                progress.percent
            );
        },
    )
    .await
    .with_context(|| format!("Failed to resolve sitemap {}", cli.sitemap_url))?;

    print_tree(&mut analysis, &cli.expand);
    print_statistics(&ResultStatistics::from_records(&report.records));

    if report.cancelled {
        tracing::warn!("Run was interrupted; exports contain partial results");
    }

    let written = export_report(&config.output, &report).context("Failed to write exports")?;
    for path in written {
        println!("✓ Written: {}", path.display());
    }

    Ok(())
}

/// Sets the cancel flag on the first Ctrl-C
fn spawn_cancel_on_ctrl_c(cancel: CancelFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current batch");
            cancel.cancel();
        }
    });
}
