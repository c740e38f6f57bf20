use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::AppResult;
use crate::ingestor::M3uParser;
use crate::sources::PlaylistFetcher;
use crate::tvheadend::{
    BackendLayout, ConfigWriter, EpgUpdate, NetworkLocator, WriterSettings, remove_generated,
};

/// Counts reported after a conversion run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    pub network_id: Option<String>,
    pub network_created: bool,
    /// The playlist could not be read; nothing was changed
    pub fetch_failed: bool,
    /// Entries accepted by the language filter
    pub entries_parsed: usize,
    /// Accepted entries dropped because no stream URL followed them
    pub skipped_without_url: usize,
    pub removed: usize,
    pub channels_written: usize,
    pub epg_lists_created: usize,
    pub epg_lists_updated: usize,
    pub epg_lists_skipped: usize,
}

/// Runs fetch, parse, network lookup, cleanup and config generation in order
pub struct ConversionService {
    config: Config,
    layout: BackendLayout,
}

impl ConversionService {
    pub fn new(config: Config) -> Self {
        let layout = BackendLayout::new(&config.tvheadend.directory);
        Self { config, layout }
    }

    /// Check the TVHeadend root before anything is read or written
    pub fn validate_backend(&self) -> AppResult<()> {
        self.layout.validate(&self.config.tvheadend.marker_file)?;
        Ok(())
    }

    pub async fn run(&self) -> AppResult<ConversionSummary> {
        self.validate_backend()?;

        let mut summary = ConversionSummary::default();

        let Some(source) = self.config.playlist.source.as_deref() else {
            error!("No input file specified!");
            return Ok(summary);
        };

        let fetcher = PlaylistFetcher::new(self.config.http.connect_timeout)?;
        let content = match fetcher.fetch(source).await {
            Ok(content) => content,
            Err(e) => {
                error!("Could not open playlist: {}", e);
                warn!("Leaving TVHeadend configuration untouched");
                summary.fetch_failed = true;
                return Ok(summary);
            }
        };

        let parser = M3uParser::new(&self.config.playlist.languages);
        let entries = parser.parse(&content)?;
        summary.entries_parsed = entries.len();

        let tvh = &self.config.tvheadend;
        if entries.is_empty() && !tvh.remove_old {
            warn!("Playlist yielded no channels, nothing to write");
            return Ok(summary);
        }

        let network = NetworkLocator::new(&self.layout).locate(
            tvh.network_id.as_deref(),
            &tvh.network,
            tvh.charset,
        )?;
        summary.network_id = Some(network.id.clone());
        summary.network_created = network.created;

        if tvh.remove_old {
            summary.removed = remove_generated(&self.layout, &network.id)?;
        }

        info!("Creating muxes, services and channels.");
        let writer = ConfigWriter::new(
            &self.layout,
            &network.id,
            WriterSettings {
                interface: tvh.interface.clone(),
                network_name: tvh.network.clone(),
                charset: tvh.charset,
                pipe_command: tvh.pipe_command.clone(),
            },
        );

        for entry in &entries {
            let Some(url) = entry.url.as_deref() else {
                warn!(
                    "Line {:04}: '{}' has no stream URL, skipping",
                    entry.line, entry.name
                );
                summary.skipped_without_url += 1;
                continue;
            };

            let number = summary.channels_written;
            let written = writer.write_entry(entry, url, number)?;
            summary.channels_written += 1;
            match written.epg {
                EpgUpdate::Created => summary.epg_lists_created += 1,
                EpgUpdate::Appended => summary.epg_lists_updated += 1,
                EpgUpdate::AlreadyListed => debug!("'{}' already in EPG list", entry.name),
                EpgUpdate::Skipped => summary.epg_lists_skipped += 1,
            }
        }

        info!(
            "Wrote {} channels into network {} ({} EPG lists created, {} updated, {} without usable tvg-id)",
            summary.channels_written,
            network.id,
            summary.epg_lists_created,
            summary.epg_lists_updated,
            summary.epg_lists_skipped
        );
        if summary.skipped_without_url > 0 {
            warn!(
                "{} entries had no stream URL and were skipped",
                summary.skipped_without_url
            );
        }
        Ok(summary)
    }
}
