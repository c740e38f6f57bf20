//! Utility modules for m3u2hts
//!
//! This module contains reusable utilities that can be used
//! across different parts of the system.

pub mod decompression;
pub mod http_client;
pub mod url;

// Re-export commonly used types for convenience
pub use decompression::{CompressionFormat, DecompressionService};
pub use http_client::StandardHttpClient;
pub use url::UrlUtils;
