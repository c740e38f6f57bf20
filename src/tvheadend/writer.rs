use std::path::{Component, Path};

use tracing::{debug, warn};

use super::generate_id;
use super::layout::{BackendLayout, ensure_dir, read_json, write_json};
use super::naming::safe_name;
use crate::errors::BackendResult;
use crate::models::{
    ChannelConfig, Charset, EpgChannelList, MuxConfig, PlaylistEntry, ServiceConfig,
};

/// Values shared by every generated mux and service
#[derive(Debug, Clone)]
pub struct WriterSettings {
    pub interface: String,
    /// Network display name, used as service provider
    pub network_name: String,
    pub charset: Charset,
    /// Executable placed in front of the stream URL in `pipe://` sources
    pub pipe_command: String,
}

/// What happened to the EPG-source list of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpgUpdate {
    Created,
    Appended,
    AlreadyListed,
    /// The tvg-id cannot be used as a file name
    Skipped,
}

/// Identifiers generated for one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenChannel {
    pub mux_id: String,
    pub service_id: String,
    pub channel_id: String,
    pub epg: EpgUpdate,
}

/// Writes mux, service, channel and EPG files for playlist entries
pub struct ConfigWriter<'a> {
    layout: &'a BackendLayout,
    network_id: String,
    settings: WriterSettings,
}

impl<'a> ConfigWriter<'a> {
    pub fn new(layout: &'a BackendLayout, network_id: &str, settings: WriterSettings) -> Self {
        Self {
            layout,
            network_id: network_id.to_string(),
            settings,
        }
    }

    /// Write every artifact for one entry
    ///
    /// `url` is passed separately because entries without a stream URL are
    /// filtered out by the caller.
    pub fn write_entry(
        &self,
        entry: &PlaylistEntry,
        url: &str,
        number: usize,
    ) -> BackendResult<WrittenChannel> {
        let safe = safe_name(&entry.name);

        let mux_id = self.write_mux(entry, &safe, url)?;
        let service_id = self.write_service(&mux_id, &safe)?;
        let channel_id = self.write_channel(entry, number, &service_id)?;
        let epg = self.update_epg_list(entry, &channel_id)?;

        debug!(
            "Wrote '{}' as channel {} (mux {}, service {}, channel {})",
            entry.name, number, mux_id, service_id, channel_id
        );

        Ok(WrittenChannel {
            mux_id,
            service_id,
            channel_id,
            epg,
        })
    }

    fn write_mux(&self, entry: &PlaylistEntry, safe: &str, url: &str) -> BackendResult<String> {
        let mux_id = generate_id();
        let iptv_url = format!("pipe://{} {} {}", self.settings.pipe_command, safe, url);
        let config = MuxConfig::new(
            iptv_url,
            &self.settings.interface,
            &entry.name,
            self.settings.charset,
        );

        ensure_dir(&self.layout.mux_dir(&self.network_id, &mux_id))?;
        write_json(&self.layout.mux_config(&self.network_id, &mux_id), &config)?;
        Ok(mux_id)
    }

    fn write_service(&self, mux_id: &str, safe: &str) -> BackendResult<String> {
        let service_id = generate_id();
        let config = ServiceConfig::new(safe, &self.settings.network_name);

        ensure_dir(&self.layout.services_dir(&self.network_id, mux_id))?;
        write_json(
            &self.layout.service_config(&self.network_id, mux_id, &service_id),
            &config,
        )?;
        Ok(service_id)
    }

    fn write_channel(
        &self,
        entry: &PlaylistEntry,
        number: usize,
        service_id: &str,
    ) -> BackendResult<String> {
        let channel_id = generate_id();
        let config = ChannelConfig::new(&entry.name, number, service_id);

        ensure_dir(&self.layout.channels_dir())?;
        write_json(&self.layout.channel_config(&channel_id), &config)?;
        Ok(channel_id)
    }

    fn update_epg_list(&self, entry: &PlaylistEntry, channel_id: &str) -> BackendResult<EpgUpdate> {
        if !is_plain_file_name(&entry.tvg_id) {
            warn!(
                "tvg-id '{}' of '{}' is not usable as a file name, no EPG mapping written",
                entry.tvg_id, entry.name
            );
            return Ok(EpgUpdate::Skipped);
        }

        ensure_dir(&self.layout.epg_channels_dir())?;
        let path = self.layout.epg_channel_list(&entry.tvg_id);

        if path.is_file() {
            let mut list: EpgChannelList = read_json(&path)?;
            if !list.add_channel(channel_id) {
                return Ok(EpgUpdate::AlreadyListed);
            }
            write_json(&path, &list)?;
            debug!("Appended channel to EPG list {}", entry.tvg_id);
            Ok(EpgUpdate::Appended)
        } else {
            write_json(&path, &EpgChannelList::new(&entry.name, channel_id))?;
            debug!("Created EPG list {}", entry.tvg_id);
            Ok(EpgUpdate::Created)
        }
    }
}

/// True when `name` is a single normal path component
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
