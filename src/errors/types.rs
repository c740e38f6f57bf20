//! Error type definitions for m3u2hts

use std::path::PathBuf;

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Playlist source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Playlist parsing errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// TVHeadend configuration tree errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Errors raised while obtaining playlist text
#[derive(Error, Debug)]
pub enum SourceError {
    /// Neither an existing local file nor a parseable URL
    #[error("Playlist not found: {location}")]
    NotFound { location: String },

    /// Transport level failure
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// Non-success HTTP status
    #[error("HTTP error: {status} - {url}")]
    Http { status: u16, url: String },

    /// Local file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Compressed content could not be decoded
    #[error("Failed to decompress playlist: {message}")]
    Decompression { message: String },
}

/// Errors raised while parsing playlist text
#[derive(Error, Debug)]
pub enum ParseError {
    /// An EXTINF line declares the attribute layout but does not match it
    #[error("Line {line:04} is unsupported: {content}")]
    UnsupportedEntry { line: usize, content: String },
}

/// Errors raised while reading or writing the TVHeadend configuration tree
#[derive(Error, Debug)]
pub enum BackendError {
    /// The configured root is not a TVHeadend configuration directory
    #[error("Invalid TVHeadend directory {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// Several networks exist and none was selected
    #[error("Found {} IPTV networks ({}), select one with --network-id", .candidates.len(), .candidates.join(", "))]
    AmbiguousNetwork { candidates: Vec<String> },

    /// The selected network does not exist
    #[error("IPTV network not found: {id}")]
    NetworkNotFound { id: String },

    /// Directory creation failed
    #[error("Failed to create directory {path:?}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Generic I/O failure on a path
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A configuration file could not be (de)serialized
    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl AppError {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl SourceError {
    pub fn request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl BackendError {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_root<P: Into<PathBuf>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layers_convert_into_app_error() {
        let err: AppError = SourceError::NotFound {
            location: "missing.m3u".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Source error: Playlist not found: missing.m3u");

        let err: AppError = BackendError::NetworkNotFound {
            id: "abc".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Backend(BackendError::NetworkNotFound { .. })));
    }

    #[test]
    fn test_ambiguous_network_lists_candidates() {
        let err = BackendError::AmbiguousNetwork {
            candidates: vec!["aaa".to_string(), "bbb".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("Found 2 IPTV networks"));
        assert!(message.contains("aaa, bbb"));
    }

    #[test]
    fn test_unsupported_entry_pads_line_number() {
        let err = ParseError::UnsupportedEntry {
            line: 7,
            content: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Line 0007 is unsupported: x");
    }
}
