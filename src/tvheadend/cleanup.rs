use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::layout::BackendLayout;
use crate::errors::{BackendError, BackendResult};

/// Delete previously generated channels, EPG lists and the network's muxes
///
/// Returns the number of removed entries. Directories that do not exist yet
/// count as already clean.
pub fn remove_generated(layout: &BackendLayout, network_id: &str) -> BackendResult<usize> {
    let targets = [
        layout.channels_dir(),
        layout.epg_channels_dir(),
        layout.muxes_dir(network_id),
    ];

    let mut removed = 0;
    for dir in &targets {
        removed += clear_dir(dir)?;
    }
    info!("Removed {} old configuration entries", removed);
    Ok(removed)
}

fn clear_dir(dir: &Path) -> BackendResult<usize> {
    if !dir.is_dir() {
        debug!("Nothing to remove in {}", dir.display());
        return Ok(0);
    }

    let mut removed = 0;
    let entries = fs::read_dir(dir).map_err(|source| BackendError::io(dir, source))?;
    for entry in entries {
        let path = entry.map_err(|source| BackendError::io(dir, source))?.path();
        let result = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        result.map_err(|source| BackendError::io(&path, source))?;
        removed += 1;
    }
    debug!("Cleared {} entries from {}", removed, dir.display());
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_generated_content_only() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());

        fs::create_dir_all(layout.services_dir("net", "mux")).unwrap();
        fs::write(layout.mux_config("net", "mux"), "{}").unwrap();
        fs::write(layout.network_config("net"), "{}").unwrap();
        fs::create_dir_all(layout.channels_dir()).unwrap();
        fs::write(layout.channel_config("c1"), "{}").unwrap();
        fs::write(layout.channel_config("c2"), "{}").unwrap();
        fs::create_dir_all(layout.epg_channels_dir()).unwrap();
        fs::write(layout.epg_channel_list("das.erste"), "{}").unwrap();

        let removed = remove_generated(&layout, "net").unwrap();
        assert_eq!(removed, 4);

        assert!(layout.channels_dir().is_dir());
        assert_eq!(fs::read_dir(layout.channels_dir()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(layout.epg_channels_dir()).unwrap().count(), 0);
        assert_eq!(fs::read_dir(layout.muxes_dir("net")).unwrap().count(), 0);
        assert!(layout.network_config("net").is_file());
    }

    #[test]
    fn test_missing_directories_are_clean() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());
        assert_eq!(remove_generated(&layout, "net").unwrap(), 0);
    }
}
