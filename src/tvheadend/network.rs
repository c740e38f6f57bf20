use std::fs;

use tracing::{debug, info};

use super::generate_id;
use super::layout::{BackendLayout, ensure_dir, write_json};
use crate::errors::{BackendError, BackendResult};
use crate::models::{Charset, NetworkConfig};

/// The IPTV network muxes are grouped under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    /// Whether this run created the network
    pub created: bool,
}

/// Finds or creates the IPTV network directory
pub struct NetworkLocator<'a> {
    layout: &'a BackendLayout,
}

impl<'a> NetworkLocator<'a> {
    pub fn new(layout: &'a BackendLayout) -> Self {
        Self { layout }
    }

    /// Identifiers of all existing networks, sorted
    pub fn existing(&self) -> BackendResult<Vec<String>> {
        let networks_dir = self.layout.networks_dir();
        if !networks_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        let entries =
            fs::read_dir(&networks_dir).map_err(|source| BackendError::io(&networks_dir, source))?;
        for entry in entries {
            let entry = entry.map_err(|source| BackendError::io(&networks_dir, source))?;
            if entry.path().is_dir() {
                ids.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Resolve the network to write into
    ///
    /// With no network present a new one is created. A single network is used
    /// as-is. When several exist, `selected` must name one of them.
    pub fn locate(
        &self,
        selected: Option<&str>,
        name: &str,
        charset: Charset,
    ) -> BackendResult<Network> {
        ensure_dir(&self.layout.iptv_dir())?;
        ensure_dir(&self.layout.networks_dir())?;

        let existing = self.existing()?;
        debug!("Existing IPTV networks: {:?}", existing);

        if let Some(id) = selected {
            return if existing.iter().any(|e| e == id) {
                info!("Using selected IPTV network {}", id);
                Ok(Network {
                    id: id.to_string(),
                    created: false,
                })
            } else {
                Err(BackendError::NetworkNotFound { id: id.to_string() })
            };
        }

        match existing.as_slice() {
            [] => self.create(name, charset),
            [only] => {
                info!("Using existing IPTV network {}", only);
                Ok(Network {
                    id: only.clone(),
                    created: false,
                })
            }
            _ => Err(BackendError::AmbiguousNetwork {
                candidates: existing,
            }),
        }
    }

    fn create(&self, name: &str, charset: Charset) -> BackendResult<Network> {
        let id = generate_id();
        ensure_dir(&self.layout.network_dir(&id))?;
        write_json(
            &self.layout.network_config(&id),
            &NetworkConfig::new(name, charset),
        )?;
        info!("Created IPTV network '{}' ({})", name, id);
        Ok(Network { id, created: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tvheadend::layout::read_json;
    use tempfile::TempDir;

    #[test]
    fn test_creates_network_when_missing() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());
        let locator = NetworkLocator::new(&layout);

        let network = locator.locate(None, "IPTV", Charset::Auto).unwrap();
        assert!(network.created);
        assert_eq!(locator.existing().unwrap(), vec![network.id.clone()]);

        let config: NetworkConfig = read_json(&layout.network_config(&network.id)).unwrap();
        assert_eq!(config, NetworkConfig::new("IPTV", Charset::Auto));
    }

    #[test]
    fn test_reuses_single_network() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());
        let locator = NetworkLocator::new(&layout);

        let first = locator.locate(None, "IPTV", Charset::Auto).unwrap();
        let second = locator.locate(None, "Other", Charset::Utf8).unwrap();
        assert_eq!(first.id, second.id);
        assert!(!second.created);
    }

    #[test]
    fn test_several_networks_need_selection() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());
        fs::create_dir_all(layout.network_dir("bbb")).unwrap();
        fs::create_dir_all(layout.network_dir("aaa")).unwrap();
        let locator = NetworkLocator::new(&layout);

        match locator.locate(None, "IPTV", Charset::Auto) {
            Err(BackendError::AmbiguousNetwork { candidates }) => {
                assert_eq!(candidates, vec!["aaa".to_string(), "bbb".to_string()]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }

        let picked = locator.locate(Some("bbb"), "IPTV", Charset::Auto).unwrap();
        assert_eq!(picked.id, "bbb");

        assert!(matches!(
            locator.locate(Some("ccc"), "IPTV", Charset::Auto),
            Err(BackendError::NetworkNotFound { .. })
        ));
    }

    #[test]
    fn test_plain_files_are_not_networks() {
        let dir = TempDir::new().unwrap();
        let layout = BackendLayout::new(dir.path());
        fs::create_dir_all(layout.networks_dir()).unwrap();
        fs::write(layout.networks_dir().join("README"), "").unwrap();

        assert!(NetworkLocator::new(&layout).existing().unwrap().is_empty());
    }
}
