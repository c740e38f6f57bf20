use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod tvheadend;

pub use tvheadend::*;

/// Region codes accepted by the playlist filter.
///
/// The code is matched against the first two characters of an entry's
/// `group-title`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum Language {
    De,
    At,
    Ch,
    Fr,
    Ne,
    Uk,
    It,
    Tr,
    Ru,
    Cz,
}

impl Language {
    pub fn as_code(&self) -> &'static str {
        match self {
            Language::De => "DE",
            Language::At => "AT",
            Language::Ch => "CH",
            Language::Fr => "FR",
            Language::Ne => "NE",
            Language::Uk => "UK",
            Language::It => "IT",
            Language::Tr => "TR",
            Language::Ru => "RU",
            Language::Cz => "CZ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Character sets understood by TVHeadend for networks and muxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Charset {
    #[serde(rename = "AUTO")]
    #[value(name = "AUTO")]
    Auto,
    #[serde(rename = "AUTO_POLISH")]
    #[value(name = "AUTO_POLISH")]
    AutoPolish,
    #[serde(rename = "ISO-6937")]
    #[value(name = "ISO-6937")]
    Iso6937,
    #[serde(rename = "ISO-8859-1")]
    #[value(name = "ISO-8859-1")]
    Iso8859_1,
    #[serde(rename = "ISO-8859-2")]
    #[value(name = "ISO-8859-2")]
    Iso8859_2,
    #[serde(rename = "ISO-8859-5")]
    #[value(name = "ISO-8859-5")]
    Iso8859_5,
    #[serde(rename = "ISO-8859-7")]
    #[value(name = "ISO-8859-7")]
    Iso8859_7,
    #[serde(rename = "ISO-8859-9")]
    #[value(name = "ISO-8859-9")]
    Iso8859_9,
    #[serde(rename = "ISO-8859-15")]
    #[value(name = "ISO-8859-15")]
    Iso8859_15,
    #[serde(rename = "UTF-8")]
    #[value(name = "UTF-8")]
    Utf8,
    #[serde(rename = "GB2312")]
    #[value(name = "GB2312")]
    Gb2312,
    #[serde(rename = "UCS2")]
    #[value(name = "UCS2")]
    Ucs2,
}

impl Charset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Charset::Auto => "AUTO",
            Charset::AutoPolish => "AUTO_POLISH",
            Charset::Iso6937 => "ISO-6937",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Iso8859_2 => "ISO-8859-2",
            Charset::Iso8859_5 => "ISO-8859-5",
            Charset::Iso8859_7 => "ISO-8859-7",
            Charset::Iso8859_9 => "ISO-8859-9",
            Charset::Iso8859_15 => "ISO-8859-15",
            Charset::Utf8 => "UTF-8",
            Charset::Gb2312 => "GB2312",
            Charset::Ucs2 => "UCS2",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A channel extracted from one `#EXTINF` line and its stream URL line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// 0-based line index of the `#EXTINF` line
    pub line: usize,
    /// Leading token of the metadata line (duration / provider position)
    pub position: String,
    /// EPG source key
    pub tvg_id: String,
    pub group_title: String,
    pub name: String,
    pub logo: Option<String>,
    pub url: Option<String>,
}

impl PlaylistEntry {
    /// Two-character region prefix of the group title
    pub fn region(&self) -> String {
        self.group_title.chars().take(2).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_serde_uses_codes() {
        let json = serde_json::to_string(&vec![Language::De, Language::Uk]).unwrap();
        assert_eq!(json, r#"["DE","UK"]"#);

        let parsed: Vec<Language> = serde_json::from_str(r#"["CH","CZ"]"#).unwrap();
        assert_eq!(parsed, vec![Language::Ch, Language::Cz]);
    }

    #[test]
    fn test_charset_names_match_serde() {
        for charset in Charset::value_variants() {
            let json = serde_json::to_string(charset).unwrap();
            assert_eq!(json, format!("\"{}\"", charset.as_str()));
            let value = charset.to_possible_value().unwrap();
            assert_eq!(value.get_name(), charset.as_str());
        }
    }

    #[test]
    fn test_region_is_char_based() {
        let entry = PlaylistEntry {
            line: 0,
            position: "-1".to_string(),
            tvg_id: "x".to_string(),
            group_title: "Ü".to_string(),
            name: "X".to_string(),
            logo: None,
            url: None,
        };
        assert_eq!(entry.region(), "Ü");
    }
}
