//! Playlist ingestion
//!
//! Turns raw playlist text into [`PlaylistEntry`](crate::models::PlaylistEntry)
//! values, keeping only the regions the caller accepts.

pub mod m3u_parser;

pub use m3u_parser::M3uParser;
