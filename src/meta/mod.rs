//! Page metadata module
//!
//! Defines the per-page metadata record and extracts it from fetched HTML.

mod extractor;
mod record;

pub use extractor::extract_meta;
pub use record::{FetchStatus, MetaTag, PageMetaRecord};
