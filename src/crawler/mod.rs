//! Crawler module for fetching and storing news articles
//!
//! This module contains the crawl engine, including:
//! - A bounded queue that admits URLs and tracks their completion
//! - A fixed pool of workers driving each URL through the fetch pipeline
//! - Aggregate statistics and per-site error bookkeeping

mod coordinator;
mod pipeline;
mod queue;
mod stats;

pub use coordinator::Crawler;
pub use stats::CrawlStats;
