//! Statistics over fetched metadata records
//!
//! This module summarizes a batch of records for the end-of-run report and
//! the markdown summary.

use crate::meta::PageMetaRecord;

/// Counts gathered from a set of metadata records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultStatistics {
    /// Records produced, one per requested URL
    pub processed: usize,

    /// Records with a successful fetch
    pub succeeded: usize,

    /// Records with a failed fetch
    pub failed: usize,

    /// Successful records without an `og:image`
    pub missing_og_image: usize,

    /// Successful records without a description
    pub missing_description: usize,
}

impl ResultStatistics {
    pub fn from_records(records: &[PageMetaRecord]) -> Self {
        let mut stats = Self {
            processed: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.is_error() {
                stats.failed += 1;
                continue;
            }
            stats.succeeded += 1;
            if record.og_image.is_empty() {
                stats.missing_og_image += 1;
            }
            if record.description.is_empty() {
                stats.missing_description += 1;
            }
        }

        stats
    }

    /// Percentage of processed records that succeeded
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        (self.succeeded as f64 / self.processed as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ResultStatistics) {
    println!("=== Metadata Statistics ===\n");

    println!("Overview:");
    println!("  Processed: {}", stats.processed);
    println!("  Succeeded: {}", stats.succeeded);
    println!("  Failed: {}", stats.failed);
    println!("  Success rate: {:.1}%", stats.success_rate());
    println!();

    if stats.succeeded > 0 {
        println!("Gaps:");
        println!("  Missing og:image: {}", stats.missing_og_image);
        println!("  Missing description: {}", stats.missing_description);
        println!();
    }
}
