//! Records written into the TVHeadend configuration tree
//!
//! Field order is significant: TVHeadend does not care, but the files are
//! meant to be diffable against the ones the backend writes itself, so every
//! struct serializes its keys in the order TVHeadend uses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Charset;

/// Fixed timestamp stamped into generated services
pub const SERVICE_TIMESTAMP: i64 = 1_443_998_526;

/// `input/iptv/networks/<id>/config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub priority: i32,
    pub spriority: i32,
    pub max_streams: i32,
    pub max_bandwidth: i32,
    pub max_timeout: i32,
    pub networkname: String,
    pub nid: i32,
    pub autodiscovery: bool,
    pub skipinitscan: bool,
    pub idlescan: bool,
    pub sid_chnum: bool,
    pub ignore_chnum: bool,
    pub localtime: bool,
    pub charset: Charset,
    pub class: String,
}

impl NetworkConfig {
    pub fn new(name: &str, charset: Charset) -> Self {
        Self {
            priority: 1,
            spriority: 1,
            max_streams: 0,
            max_bandwidth: 0,
            max_timeout: 15,
            networkname: name.to_string(),
            nid: 0,
            autodiscovery: false,
            skipinitscan: true,
            idlescan: false,
            sid_chnum: false,
            ignore_chnum: false,
            localtime: false,
            charset,
            class: "iptv_network".to_string(),
        }
    }
}

/// `input/iptv/networks/<net>/muxes/<id>/config`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuxConfig {
    pub priority: i32,
    pub spriority: i32,
    pub iptv_url: String,
    pub iptv_interface: String,
    pub iptv_atsc: bool,
    pub iptv_muxname: String,
    pub iptv_sname: String,
    pub charset: Charset,
    pub iptv_respawn: bool,
    pub enabled: bool,
    pub epg: i32,
    pub onid: i32,
    pub tsid: i32,
    pub scan_result: i32,
    pub pmt_06_ac3: i32,
}

impl MuxConfig {
    pub fn new(iptv_url: String, interface: &str, name: &str, charset: Charset) -> Self {
        Self {
            priority: 0,
            spriority: 0,
            iptv_url,
            iptv_interface: interface.to_string(),
            iptv_atsc: false,
            iptv_muxname: name.to_string(),
            iptv_sname: name.to_string(),
            charset,
            iptv_respawn: true,
            enabled: true,
            epg: 1,
            onid: 1,
            tsid: 1,
            scan_result: 1,
            pmt_06_ac3: 0,
        }
    }
}

/// One elementary stream of a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStream {
    pub pid: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_type: Option<i32>,
}

/// `input/iptv/networks/<net>/muxes/<mux>/services/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub sid: i32,
    pub lcn: i32,
    pub lcn_minor: i32,
    pub lcn2: i32,
    pub svcname: String,
    pub provider: String,
    pub dvb_servicetype: i32,
    pub dvb_ignore_eit: bool,
    pub prefcapid: i32,
    pub prefcapid_lock: i32,
    pub force_caid: i32,
    pub created: i64,
    pub last_seen: i64,
    pub enabled: bool,
    pub auto: i32,
    pub priority: i32,
    pub pcr: u16,
    pub pmt: u16,
    pub stream: Vec<ServiceStream>,
}

impl ServiceConfig {
    /// A service carrying one H264 video and one AAC-LATM audio track
    pub fn new(svcname: &str, provider: &str) -> Self {
        Self {
            sid: 1,
            lcn: 0,
            lcn_minor: 0,
            lcn2: 0,
            svcname: svcname.to_string(),
            provider: provider.to_string(),
            dvb_servicetype: 1,
            dvb_ignore_eit: false,
            prefcapid: 0,
            prefcapid_lock: 0,
            force_caid: 0,
            created: SERVICE_TIMESTAMP,
            last_seen: SERVICE_TIMESTAMP,
            enabled: true,
            auto: 0,
            priority: 0,
            pcr: 256,
            pmt: 4096,
            stream: vec![
                ServiceStream {
                    pid: 256,
                    kind: "H264".to_string(),
                    position: 0,
                    audio_type: None,
                },
                ServiceStream {
                    pid: 257,
                    kind: "AAC-LATM".to_string(),
                    position: 0,
                    audio_type: Some(0),
                },
            ],
        }
    }
}

/// `channel/config/<id>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    pub enabled: bool,
    pub name: String,
    pub number: usize,
    pub services: Vec<String>,
    pub tags: Vec<String>,
    pub bouquet: String,
}

impl ChannelConfig {
    pub fn new(name: &str, number: usize, service_id: &str) -> Self {
        Self {
            enabled: true,
            name: name.to_string(),
            number,
            services: vec![service_id.to_string()],
            tags: Vec::new(),
            bouquet: String::new(),
        }
    }
}

/// `epggrab/xmltv/channels/<tvg-id>`
///
/// Keys TVHeadend adds on its own (icon, dn_chnum, ...) are kept in `extra`
/// so rewriting a list never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpgChannelList {
    pub name: String,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EpgChannelList {
    pub fn new(name: &str, channel_id: &str) -> Self {
        Self {
            name: name.to_string(),
            channels: vec![channel_id.to_string()],
            extra: Map::new(),
        }
    }

    /// Append a channel unless it is already listed; returns whether it was added
    pub fn add_channel(&mut self, channel_id: &str) -> bool {
        if self.channels.iter().any(|c| c == channel_id) {
            return false;
        }
        self.channels.push(channel_id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mux_config_key_order() {
        let mux = MuxConfig::new(
            "pipe://ffpipe.sh DAS_ERSTE http://example.com/1".to_string(),
            "eth0",
            "Das Erste",
            Charset::Auto,
        );
        let value = serde_json::to_value(&mux).unwrap();
        let text = serde_json::to_string(&mux).unwrap();
        assert!(text.starts_with(r#"{"priority":0,"spriority":0,"iptv_url":"#));
        assert!(text.ends_with(r#""scan_result":1,"pmt_06_ac3":0}"#));
        assert_eq!(value.as_object().unwrap().len(), 15);
        assert_eq!(value["charset"], json!("AUTO"));
        assert_eq!(value["iptv_muxname"], json!("Das Erste"));
    }

    #[test]
    fn test_service_streams() {
        let service = ServiceConfig::new("DAS_ERSTE", "IPTV");
        let value = serde_json::to_value(&service).unwrap();
        assert_eq!(
            value["stream"],
            json!([
                {"pid": 256, "type": "H264", "position": 0},
                {"pid": 257, "type": "AAC-LATM", "position": 0, "audio_type": 0}
            ])
        );
        assert_eq!(value["created"], json!(SERVICE_TIMESTAMP));
        assert_eq!(value["provider"], json!("IPTV"));
    }

    #[test]
    fn test_channel_config_defaults() {
        let channel = ChannelConfig::new("Das Erste", 0, "abc");
        assert_eq!(
            serde_json::to_value(&channel).unwrap(),
            json!({
                "enabled": true,
                "name": "Das Erste",
                "number": 0,
                "services": ["abc"],
                "tags": [],
                "bouquet": ""
            })
        );
    }

    #[test]
    fn test_epg_list_preserves_unknown_keys() {
        let mut list: EpgChannelList = serde_json::from_value(json!({
            "name": "Das Erste",
            "icon": "http://example.com/logo.png",
            "channels": ["one"]
        }))
        .unwrap();

        assert!(list.add_channel("two"));
        assert!(!list.add_channel("one"));

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["channels"], json!(["one", "two"]));
        assert_eq!(value["icon"], json!("http://example.com/logo.png"));
    }
}
