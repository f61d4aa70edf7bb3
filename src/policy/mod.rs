//! Crawl policy module
//!
//! This module holds the admission and fetch policy applied to every URL:
//! - Blocklist, normalization, and header tables with built-in defaults
//! - Compilation of those tables into shared matchers
//! - The news site directory used as a canonical-URL allowlist

mod defaults;
mod headers;
mod sites;
mod types;

pub use headers::HeaderTable;
pub use sites::{SiteDirectory, SiteRecord};
pub use types::{PolicyConfig, SitePolicy};
