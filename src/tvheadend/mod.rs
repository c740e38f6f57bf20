//! TVHeadend configuration tree
//!
//! Everything that touches the backend's directory lives here: path layout
//! and validation, network discovery, per-channel config generation and the
//! cleanup of previously generated files.

pub mod cleanup;
pub mod layout;
pub mod naming;
pub mod network;
pub mod writer;

pub use cleanup::remove_generated;
pub use layout::BackendLayout;
pub use naming::safe_name;
pub use network::{Network, NetworkLocator};
pub use writer::{ConfigWriter, EpgUpdate, WriterSettings, WrittenChannel};

use uuid::Uuid;

/// Fresh random identifier in the form TVHeadend uses for node names
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_generate_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
