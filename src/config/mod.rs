//! Configuration module for newswire
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every setting has a default, so configuration files only name the
//! settings they change.
//!
//! # Example
//!
//! ```no_run
//! use newswire::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling with {} workers", config.crawler.threads);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, StoreConfig};

// Re-export parser and validation entry points
pub use parser::load_config;
pub use validation::validate;
