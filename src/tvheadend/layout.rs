use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{BackendError, BackendResult};

/// Paths of the TVHeadend configuration tree rooted at e.g. `~hts/.hts/tvheadend`
#[derive(Debug, Clone)]
pub struct BackendLayout {
    root: PathBuf,
}

impl BackendLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root must exist and contain the marker file and an `input` directory
    pub fn validate(&self, marker_file: &str) -> BackendResult<()> {
        if !self.root.is_dir() {
            return Err(BackendError::invalid_root(&self.root, "directory does not exist"));
        }
        if !self.root.join(marker_file).is_file() {
            return Err(BackendError::invalid_root(
                &self.root,
                format!("missing '{marker_file}' file"),
            ));
        }
        if !self.input_dir().is_dir() {
            return Err(BackendError::invalid_root(&self.root, "missing 'input' directory"));
        }
        Ok(())
    }

    pub fn input_dir(&self) -> PathBuf {
        self.root.join("input")
    }

    pub fn iptv_dir(&self) -> PathBuf {
        self.input_dir().join("iptv")
    }

    pub fn networks_dir(&self) -> PathBuf {
        self.iptv_dir().join("networks")
    }

    pub fn network_dir(&self, network_id: &str) -> PathBuf {
        self.networks_dir().join(network_id)
    }

    pub fn network_config(&self, network_id: &str) -> PathBuf {
        self.network_dir(network_id).join("config")
    }

    pub fn muxes_dir(&self, network_id: &str) -> PathBuf {
        self.network_dir(network_id).join("muxes")
    }

    pub fn mux_dir(&self, network_id: &str, mux_id: &str) -> PathBuf {
        self.muxes_dir(network_id).join(mux_id)
    }

    pub fn mux_config(&self, network_id: &str, mux_id: &str) -> PathBuf {
        self.mux_dir(network_id, mux_id).join("config")
    }

    pub fn services_dir(&self, network_id: &str, mux_id: &str) -> PathBuf {
        self.mux_dir(network_id, mux_id).join("services")
    }

    pub fn service_config(&self, network_id: &str, mux_id: &str, service_id: &str) -> PathBuf {
        self.services_dir(network_id, mux_id).join(service_id)
    }

    pub fn channels_dir(&self) -> PathBuf {
        self.root.join("channel").join("config")
    }

    pub fn channel_config(&self, channel_id: &str) -> PathBuf {
        self.channels_dir().join(channel_id)
    }

    pub fn epg_channels_dir(&self) -> PathBuf {
        self.root.join("epggrab").join("xmltv").join("channels")
    }

    pub fn epg_channel_list(&self, tvg_id: &str) -> PathBuf {
        self.epg_channels_dir().join(tvg_id)
    }
}

/// Create a directory (and parents) unless it already exists
pub fn ensure_dir(path: &Path) -> BackendResult<()> {
    if path.is_dir() {
        return Ok(());
    }
    debug!("Creating directory {}", path.display());
    fs::create_dir_all(path).map_err(|source| BackendError::DirectoryCreation {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as tab-indented JSON, replacing any existing file
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> BackendResult<()> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|source| BackendError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    buffer.push(b'\n');
    fs::write(path, buffer).map_err(|source| BackendError::io(path, source))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> BackendResult<T> {
    let contents = fs::read(path).map_err(|source| BackendError::io(path, source))?;
    serde_json::from_slice(&contents).map_err(|source| BackendError::Json {
        path: path.to_path_buf(),
        source,
    })
}
