//! Playlist sources
//!
//! A playlist is either a file on local storage or a document behind an
//! HTTP(S) URL. [`PlaylistFetcher`] hides the difference from the rest of the
//! converter.

pub mod playlist;

pub use playlist::{PlaylistFetcher, PlaylistLocation};
