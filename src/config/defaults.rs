/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
use std::time::Duration;

use crate::models::{Charset, Language};

// TVHeadend defaults
pub const DEFAULT_TVHEADEND_DIRECTORY: &str = "/home/hts/.hts/tvheadend";
pub const DEFAULT_INTERFACE: &str = "eth0";
pub const DEFAULT_NETWORK_NAME: &str = "IPTV";
pub const DEFAULT_MARKER_FILE: &str = "config";

// Stream source defaults
pub const DEFAULT_PIPE_COMMAND: &str = "ffpipe.sh";

// Playlist defaults
pub const DEFAULT_LANGUAGES: &[Language] = &[Language::De, Language::At, Language::Ch];
pub const DEFAULT_CHARSET: Charset = Charset::Auto;

// HTTP defaults
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
