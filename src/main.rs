use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u2hts::{
    config::Config,
    models::{Charset, Language},
    services::ConversionService,
};

#[derive(Parser)]
#[command(name = "m3u2hts")]
#[command(version)]
#[command(about = "Convert M3U file to TVHeadend muxes, services and channels")]
#[command(long_about = None)]
struct Cli {
    /// Path to M3U file. Can be a file on the HDD or internet address
    #[arg(short, long = "m3u-file", value_name = "PATH|URL")]
    m3u_file: Option<String>,

    /// Name of interface [default: eth0]
    #[arg(short, long, value_name = "NAME")]
    interface: Option<String>,

    /// Name of IPTV network [default: IPTV]
    #[arg(short, long, value_name = "NAME")]
    network: Option<String>,

    /// Only extract channels in that language [default: DE AT CH]
    #[arg(short, long, value_enum, num_args = 1.., ignore_case = true)]
    language: Option<Vec<Language>>,

    /// TVHeadend configuration directory [default: /home/hts/.hts/tvheadend]
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Charset of networks and muxes [default: AUTO]
    #[arg(short, long, value_enum, ignore_case = true)]
    charset: Option<Charset>,

    /// Remove previously generated channels, EPG mappings and muxes first
    #[arg(short, long)]
    remove_old: bool,

    /// Network to use when several IPTV networks exist
    #[arg(long, value_name = "ID")]
    network_id: Option<String>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Be verbose
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line values take precedence over the configuration file
    fn apply(self, config: &mut Config) {
        if let Some(source) = self.m3u_file {
            config.playlist.source = Some(source);
        }
        if let Some(languages) = self.language {
            config.playlist.languages = languages;
        }
        if let Some(interface) = self.interface {
            config.tvheadend.interface = interface;
        }
        if let Some(network) = self.network {
            config.tvheadend.network = network;
        }
        if let Some(network_id) = self.network_id {
            config.tvheadend.network_id = Some(network_id);
        }
        if let Some(directory) = self.directory {
            config.tvheadend.directory = directory;
        }
        if let Some(charset) = self.charset {
            config.tvheadend.charset = charset;
        }
        if self.remove_old {
            config.tvheadend.remove_old = true;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("m3u2hts={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;

    let languages: Vec<&str> = config.playlist.languages.iter().map(|l| l.as_code()).collect();
    info!(
        "Converting for TVHeadend at {} (languages: {})",
        config.tvheadend.directory.display(),
        languages.join(", ")
    );

    let service = ConversionService::new(config);
    let summary = service.run().await?;

    info!(
        "Done: {} channels written, {} old entries removed",
        summary.channels_written, summary.removed
    );
    Ok(())
}
