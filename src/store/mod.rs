//! Article store module
//!
//! The article store is a remote keyed database reached over HTTP. This
//! module contains:
//! - A client for the store's existence check and conditional write calls
//! - Record assembly for stored articles and redirect markers

mod client;
mod record;

pub use client::{ArticleStore, PutResult, StoreError};
pub use record::{header_block, redirect_record};
