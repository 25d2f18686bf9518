//! URL handling module for Sitemap-Lens
//!
//! This module provides request URL validation, reference resolution, and
//! path segmentation used to key the path tree.

mod normalize;
mod segments;

pub use normalize::{parse_http_url, resolve_reference};
pub use segments::{join_path, path_segments};
