use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{Charset, Language};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

/// Complete converter configuration
///
/// Values come from the built-in defaults, optionally overlaid by a TOML file
/// and finally by command line arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub tvheadend: TvheadendConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// Local path or URL of the playlist
    pub source: Option<String>,
    /// Accepted group-title region prefixes
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvheadendConfig {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_interface")]
    pub interface: String,
    /// Display name of the IPTV network
    #[serde(default = "default_network_name")]
    pub network: String,
    /// Network to use when several exist
    pub network_id: Option<String>,
    #[serde(default = "default_charset")]
    pub charset: Charset,
    /// File that must exist in the TVHeadend root
    #[serde(default = "default_marker_file")]
    pub marker_file: String,
    /// Executable used in the generated `pipe://` stream source
    #[serde(default = "default_pipe_command")]
    pub pipe_command: String,
    #[serde(default)]
    pub remove_old: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Time allowed to establish the connection; the transfer itself is unbounded
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
}

fn default_languages() -> Vec<Language> {
    DEFAULT_LANGUAGES.to_vec()
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_TVHEADEND_DIRECTORY)
}

fn default_interface() -> String {
    DEFAULT_INTERFACE.to_string()
}

fn default_network_name() -> String {
    DEFAULT_NETWORK_NAME.to_string()
}

fn default_charset() -> Charset {
    DEFAULT_CHARSET
}

fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_string()
}

fn default_pipe_command() -> String {
    DEFAULT_PIPE_COMMAND.to_string()
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        Self {
            source: None,
            languages: default_languages(),
        }
    }
}

impl Default for TvheadendConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            interface: default_interface(),
            network: default_network_name(),
            network_id: None,
            charset: default_charset(),
            marker_file: default_marker_file(),
            pipe_command: default_pipe_command(),
            remove_old: false,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    pub fn load_from_file(config_file: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(config_file).map_err(|e| {
            AppError::configuration(format!("failed to read {}: {e}", config_file.display()))
        })?;
        let config = Self::from_toml(&contents)?;
        info!("Configuration loaded from: {}", config_file.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        toml::from_str(contents)
            .map_err(|e| AppError::configuration(format!("invalid configuration: {e}")))
    }

    /// Reject values that would only fail later, halfway through writing
    pub fn validate(&self) -> AppResult<()> {
        if self.playlist.languages.is_empty() {
            return Err(AppError::configuration("at least one language is required"));
        }
        if self.tvheadend.pipe_command.trim().is_empty() {
            return Err(AppError::configuration("tvheadend.pipe_command must not be empty"));
        }
        if self.http.connect_timeout.is_zero() {
            return Err(AppError::configuration("http.connect_timeout must be positive"));
        }
        Ok(())
    }
}
