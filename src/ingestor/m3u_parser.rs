use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::errors::ParseError;
use crate::models::{Language, PlaylistEntry};

/// Full entry shape: position, tvg-id, group-title, tvg-logo and a
/// `[COLOR ..]Name[/COLOR]` display name.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^#EXTINF:(.*?) tvg-id="(.*?)" group-title="(.*?)" tvg-logo="(.*?)", [\[\w ]+\](.*?)\[/COLOR\]"#,
    )
    .expect("entry pattern is valid")
});

/// Attribute layout without the display name, used to report entries whose
/// name field is not in the `[COLOR ..]` form.
static LAYOUT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#EXTINF:(.*?) tvg-id="(.*?)" group-title="(.*?)" tvg-logo="(.*?)""#)
        .expect("layout pattern is valid")
});

const METADATA_MARKER: &str = "#EXTINF";
const STREAM_MARKERS: [&str; 2] = ["http:", "https:"];

/// Extracts channel entries from M3U text
#[derive(Debug, Clone)]
pub struct M3uParser {
    languages: HashSet<String>,
}

impl M3uParser {
    pub fn new(languages: &[Language]) -> Self {
        Self {
            languages: languages.iter().map(|l| l.as_code().to_string()).collect(),
        }
    }

    /// Parse playlist text into entries, in playlist order
    ///
    /// A stream URL is attached only when it sits on the line directly after
    /// the entry's `#EXTINF` line; entries without one keep `url: None`.
    pub fn parse(&self, content: &str) -> Result<Vec<PlaylistEntry>, ParseError> {
        info!("Checking playlist now...");
        let mut entries: Vec<PlaylistEntry> = Vec::new();
        let mut dropped = 0usize;

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim_end();

            if line.starts_with(METADATA_MARKER) {
                match self.parse_extinf(index, line)? {
                    Some(entry) if self.accepts(&entry) => {
                        debug!(
                            "Found: {}, {}, {}, {:?}, {}",
                            entry.position, entry.tvg_id, entry.group_title, entry.logo, entry.name
                        );
                        entries.push(entry);
                    }
                    Some(entry) => {
                        debug!("Skipping '{}' from group '{}'", entry.name, entry.group_title);
                        dropped += 1;
                    }
                    None => {}
                }
                continue;
            }

            let candidate = line.trim_start();
            if STREAM_MARKERS.iter().any(|m| candidate.starts_with(m))
                && let Some(last) = entries.last_mut()
                && last.line + 1 == index
                && last.url.is_none()
            {
                last.url = Some(candidate.to_string());
            }
        }

        info!(
            "Parsed {} entries ({} filtered out by language)",
            entries.len(),
            dropped
        );
        Ok(entries)
    }

    fn accepts(&self, entry: &PlaylistEntry) -> bool {
        self.languages.contains(&entry.region())
    }

    fn parse_extinf(&self, index: usize, line: &str) -> Result<Option<PlaylistEntry>, ParseError> {
        let Some(caps) = ENTRY_PATTERN.captures(line) else {
            if LAYOUT_PATTERN.is_match(line) {
                warn!("Line {:04} has no [COLOR] display name, skipping", index);
            } else {
                debug!("Line {:04} has no supported metadata, ignoring", index);
            }
            return Ok(None);
        };

        let fields: Vec<&str> = caps
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect();
        // All five groups are mandatory in the pattern; anything else is a
        // playlist we cannot interpret.
        let [position, tvg_id, group_title, logo, name] = fields[..] else {
            return Err(ParseError::UnsupportedEntry {
                line: index,
                content: line.to_string(),
            });
        };

        Ok(Some(PlaylistEntry {
            line: index,
            position: position.to_string(),
            tvg_id: tvg_id.to_string(),
            group_title: group_title.to_string(),
            name: name.to_string(),
            logo: (!logo.is_empty()).then(|| logo.to_string()),
            url: None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const PLAYLIST: &str = r#"#EXTM3U
#EXTINF:-1 tvg-id="das.erste" group-title="DE Vollprogramm" tvg-logo="http://logo.example/ard.png", [COLOR white]Das Erste[/COLOR]
http://stream.example/ard
#EXTINF:-1 tvg-id="orf1" group-title="AT Sender" tvg-logo="", [COLOR white]ORF 1[/COLOR]
http://stream.example/orf1
#EXTINF:-1 tvg-id="tf1" group-title="FR Chaînes" tvg-logo="", [COLOR white]TF1[/COLOR]
http://stream.example/tf1
"#;

    fn parser(languages: &[Language]) -> M3uParser {
        M3uParser::new(languages)
    }

    #[test]
    fn test_parse_extracts_fields() {
        let entries = parser(&[Language::De, Language::At]).parse(PLAYLIST).unwrap();
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        assert_eq!(first.line, 1);
        assert_eq!(first.position, "-1");
        assert_eq!(first.tvg_id, "das.erste");
        assert_eq!(first.group_title, "DE Vollprogramm");
        assert_eq!(first.logo.as_deref(), Some("http://logo.example/ard.png"));
        assert_eq!(first.name, "Das Erste");
        assert_eq!(first.url.as_deref(), Some("http://stream.example/ard"));

        assert_eq!(entries[1].name, "ORF 1");
        assert_eq!(entries[1].logo, None);
    }

    #[rstest]
    #[case(&[Language::De], &["Das Erste"])]
    #[case(&[Language::Fr], &["TF1"])]
    #[case(&[Language::Uk], &[])]
    #[case(&[Language::Fr, Language::De], &["Das Erste", "TF1"])]
    fn test_language_filter(#[case] languages: &[Language], #[case] expected: &[&str]) {
        let entries = parser(languages).parse(PLAYLIST).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_url_must_follow_directly() {
        let content = "#EXTINF:0 tvg-id=\"a\" group-title=\"DE\" tvg-logo=\"\", [COLOR red]A[/COLOR]\n\
                       #EXTVLCOPT:network-caching=1000\n\
                       http://stream.example/a\n";
        let entries = parser(&[Language::De]).parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url, None);
    }

    #[test]
    fn test_url_line_attaches_once() {
        let content = "#EXTINF:0 tvg-id=\"a\" group-title=\"DE\" tvg-logo=\"\", [COLOR red]A[/COLOR]\r\n\
                       https://stream.example/a  \r\n\
                       http://stream.example/b\r\n";
        let entries = parser(&[Language::De]).parse(content).unwrap();
        assert_eq!(entries[0].url.as_deref(), Some("https://stream.example/a"));
    }

    #[test]
    fn test_url_after_filtered_entry_is_ignored() {
        let content = "#EXTINF:0 tvg-id=\"a\" group-title=\"FR\" tvg-logo=\"\", [COLOR red]A[/COLOR]\n\
                       http://stream.example/a\n\
                       #EXTINF:0 tvg-id=\"b\" group-title=\"DE\" tvg-logo=\"\", [COLOR red]B[/COLOR]\n\
                       http://stream.example/b\n";
        let entries = parser(&[Language::De]).parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].url.as_deref(), Some("http://stream.example/b"));
    }

    #[rstest]
    #[case("FR")]
    #[case("DE")]
    fn test_entry_without_color_name_is_skipped(#[case] group: &str) {
        let content = format!(
            "#EXTM3U\n\
             #EXTINF:-1 tvg-id=\"x\" group-title=\"{group}\" tvg-logo=\"\", X without color tag\n\
             http://stream.example/x\n\
             #EXTINF:-1 tvg-id=\"a\" group-title=\"DE\" tvg-logo=\"\", [COLOR red]A[/COLOR]\n\
             http://stream.example/a\n"
        );
        let entries = parser(&[Language::De]).parse(&content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "A");
        assert_eq!(entries[0].line, 3);
        assert_eq!(entries[0].url.as_deref(), Some("http://stream.example/a"));
    }

    #[test]
    fn test_foreign_extinf_layout_is_skipped() {
        let content = "#EXTM3U\n#EXTINF:-1,Plain Channel\nhttp://stream.example/plain\n";
        let entries = parser(&[Language::De]).parse(content).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(parser(&[Language::De]).parse("").unwrap().is_empty());
    }
}
