//! Centralized error handling for m3u2hts
//!
//! The converter distinguishes between three broad failure classes:
//!
//! - **Source Errors**: the playlist could not be obtained (missing file,
//!   unreachable URL, HTTP failure). These are recoverable; the conversion
//!   continues with an empty playlist.
//! - **Parse Errors**: the playlist contains an entry in an unsupported shape.
//!   These abort the conversion.
//! - **Backend Errors**: the TVHeadend configuration tree is invalid or could
//!   not be written. These abort the conversion.
//!
//! # Usage
//!
//! ```rust
//! use m3u2hts::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("no playlist given"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for playlist source Results
pub type SourceResult<T> = Result<T, SourceError>;

/// Convenience type alias for TVHeadend tree Results
pub type BackendResult<T> = Result<T, BackendError>;
