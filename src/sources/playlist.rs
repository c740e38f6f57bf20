use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;
use url::Url;

use crate::errors::{SourceError, SourceResult};
use crate::utils::{DecompressionService, StandardHttpClient, UrlUtils};

/// Where a playlist lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistLocation {
    File(PathBuf),
    Remote(Url),
}

impl PlaylistLocation {
    /// An existing local file wins; anything else must be an HTTP(S) URL
    pub fn resolve(location: &str) -> SourceResult<Self> {
        let path = Path::new(location);
        if path.is_file() {
            return Ok(Self::File(path.to_path_buf()));
        }
        UrlUtils::parse_http(location)
            .map(Self::Remote)
            .ok_or_else(|| SourceError::NotFound {
                location: location.to_string(),
            })
    }
}

/// Obtains playlist text from local storage or over HTTP
pub struct PlaylistFetcher {
    http_client: StandardHttpClient,
}

impl PlaylistFetcher {
    pub fn new(connect_timeout: Duration) -> SourceResult<Self> {
        Ok(Self {
            http_client: StandardHttpClient::with_connection_timeout(connect_timeout)?,
        })
    }

    /// Fetch the playlist text
    ///
    /// Every failure is a [`SourceError`]; callers decide whether it is fatal.
    pub async fn fetch(&self, location: &str) -> SourceResult<String> {
        match PlaylistLocation::resolve(location)? {
            PlaylistLocation::File(path) => {
                info!("Open file \"{}\".", path.display());
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|source| SourceError::Read {
                        path: path.clone(),
                        source,
                    })?;
                DecompressionService::decode_text(&bytes)
            }
            PlaylistLocation::Remote(url) => {
                info!("Downloading playlist from {}", UrlUtils::obfuscate_credentials(url.as_str()));
                self.http_client.fetch_text(url.as_str()).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_prefers_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#EXTM3U").unwrap();
        let location = file.path().to_str().unwrap();

        assert_eq!(
            PlaylistLocation::resolve(location).unwrap(),
            PlaylistLocation::File(file.path().to_path_buf())
        );
    }

    #[test]
    fn test_resolve_remote_and_missing() {
        assert!(matches!(
            PlaylistLocation::resolve("http://example.com/list.m3u"),
            Ok(PlaylistLocation::Remote(_))
        ));
        assert!(matches!(
            PlaylistLocation::resolve("/definitely/not/here.m3u"),
            Err(SourceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#EXTM3U\n#EXTINF:-1,Test\nhttp://example.com/1\n").unwrap();

        let fetcher = PlaylistFetcher::new(Duration::from_secs(1)).unwrap();
        let text = fetcher.fetch(file.path().to_str().unwrap()).await.unwrap();
        assert!(text.starts_with("#EXTM3U"));
    }

    #[tokio::test]
    async fn test_fetch_missing_source_is_not_found() {
        let fetcher = PlaylistFetcher::new(Duration::from_secs(1)).unwrap();
        assert!(matches!(
            fetcher.fetch("/definitely/not/here.m3u").await,
            Err(SourceError::NotFound { .. })
        ));
    }
}
