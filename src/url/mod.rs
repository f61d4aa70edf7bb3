//! URL handling for newswire
//!
//! This module provides the pure URL logic used by the fetch pipeline:
//! normalization (trimming parts that do not contribute to article
//! identity), site name extraction, blocklist matching, and canonical URL
//! extraction from raw page bytes. Everything here is stateless apart from
//! pattern sets compiled once at startup from policy configuration.

mod blocklist;
mod canonical;
mod normalize;
mod site;

// Re-export main types and functions
pub use blocklist::Blocklist;
pub use canonical::extract_canonical;
pub use normalize::Normalizer;
pub use site::site_name;
