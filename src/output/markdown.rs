//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of an analysis
//! run, including tree statistics, fetch results, and an error report.

use crate::output::stats::ResultStatistics;
use crate::output::OutputResult;
use crate::pipeline::AnalysisReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Errors listed in the summary table before truncating
const MAX_ERROR_ROWS: usize = 50;

/// Generates a markdown summary of an analysis run
///
/// # Arguments
///
/// * `report` - The finished analysis report
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(report: &AnalysisReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote summary to {}", output_path.display());
    Ok(())
}

/// Formats an analysis report as markdown
pub fn format_markdown_summary(report: &AnalysisReport) -> String {
    let stats = ResultStatistics::from_records(&report.records);
    let mut md = String::new();

    md.push_str("# Sitemap Lens Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Sitemap**: {}\n", report.sitemap_url));
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Max Children Per Parent**: {}\n",
        report.max_children_per_parent
    ));
    let status = if report.cancelled {
        "cancelled"
    } else {
        "completed"
    };
    md.push_str(&format!("- **Status**: {}\n\n", status));

    md.push_str("## Sitemap Tree\n\n");
    md.push_str("| Metric | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!(
        "| Total URLs | {} |\n",
        report.tree_stats.total_original_urls
    ));
    md.push_str(&format!(
        "| Within Limits | {} |\n",
        report.tree_stats.total_limited_urls
    ));
    md.push_str(&format!(
        "| Invalid URLs | {} |\n",
        report.tree_stats.invalid_urls
    ));
    md.push_str(&format!("| Selected | {} |\n\n", report.selected_count));

    md.push_str("## Metadata Results\n\n");
    md.push_str(&format!("- **Processed**: {}\n", stats.processed));
    md.push_str(&format!("- **Succeeded**: {}\n", stats.succeeded));
    md.push_str(&format!("- **Failed**: {}\n", stats.failed));
    md.push_str(&format!("- **Success Rate**: {:.2}%\n", stats.success_rate()));
    md.push_str(&format!(
        "- **Missing OG Image**: {}\n",
        stats.missing_og_image
    ));
    md.push_str(&format!(
        "- **Missing Description**: {}\n\n",
        stats.missing_description
    ));

    let errors: Vec<_> = report.records.iter().filter(|r| r.is_error()).collect();
    if !errors.is_empty() {
        md.push_str("## Errors\n\n");
        md.push_str("| URL | Error |\n");
        md.push_str("|-----|-------|\n");
        for record in errors.iter().take(MAX_ERROR_ROWS) {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&record.url),
                escape_cell(record.error.as_deref().unwrap_or_default())
            ));
        }
        if errors.len() > MAX_ERROR_ROWS {
            md.push_str(&format!(
                "\n... and {} more\n",
                errors.len() - MAX_ERROR_ROWS
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str("*Generated by sitemap-lens*\n");

    md
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
