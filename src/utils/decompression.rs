#[cfg(feature = "compression-gzip")]
use std::io::Read;

use crate::errors::{SourceError, SourceResult};

/// Supported compression formats detected by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Gzip,
    Uncompressed,
}

/// Magic byte detection and decompression for playlist payloads
pub struct DecompressionService;

impl DecompressionService {
    /// Detect compression format using magic bytes
    pub fn detect_compression_format(data: &[u8]) -> CompressionFormat {
        match infer::get(data).map(|kind| kind.mime_type()) {
            Some("application/gzip") => CompressionFormat::Gzip,
            _ => CompressionFormat::Uncompressed,
        }
    }

    /// Decompress data based on detected format
    pub fn decompress(data: &[u8]) -> SourceResult<Vec<u8>> {
        match Self::detect_compression_format(data) {
            CompressionFormat::Gzip => Self::decompress_gzip(data),
            CompressionFormat::Uncompressed => Ok(data.to_vec()),
        }
    }

    /// Decompress (if needed) and decode as UTF-8, replacing invalid sequences
    pub fn decode_text(data: &[u8]) -> SourceResult<String> {
        let bytes = Self::decompress(data)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    #[cfg(feature = "compression-gzip")]
    fn decompress_gzip(data: &[u8]) -> SourceResult<Vec<u8>> {
        let mut decoder = flate2::read::GzDecoder::new(data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|e| SourceError::Decompression {
                message: format!("gzip: {e}"),
            })?;
        Ok(decompressed)
    }

    #[cfg(not(feature = "compression-gzip"))]
    fn decompress_gzip(_data: &[u8]) -> SourceResult<Vec<u8>> {
        Err(SourceError::Decompression {
            message: "gzip support not compiled in (enable feature compression-gzip)".to_string(),
        })
    }
}
