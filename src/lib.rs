//! Convert M3U IPTV playlists into TVHeadend configuration.
//!
//! The conversion is a single pass: fetch the playlist, parse its entries,
//! find the IPTV network, optionally clear old output, then write one mux,
//! service and channel per entry plus the EPG-source mapping.

pub mod config;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod services;
pub mod sources;
pub mod tvheadend;
pub mod utils;
