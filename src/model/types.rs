//! Core type definitions for the session

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a song, unique for the lifetime of a session
pub type SongId = String;

/// The media platform a song is hosted on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    YouTube,
    Spotify,
    SoundCloud,
    /// Any source outside the supported platforms. Never embeddable.
    #[serde(other)]
    Other,
}

impl Platform {
    /// Platforms a search can be submitted against
    pub fn searchable() -> [Platform; 3] {
        [Platform::YouTube, Platform::Spotify, Platform::SoundCloud]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
            Platform::Spotify => "spotify",
            Platform::SoundCloud => "soundcloud",
            Platform::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::Spotify => "Spotify",
            Platform::SoundCloud => "SoundCloud",
            Platform::Other => "Web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParsePlatformError {
    #[error("unknown platform: {0:?}")]
    Unknown(String),
}

impl FromStr for Platform {
    type Err = ParsePlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" | "yt" => Ok(Platform::YouTube),
            "spotify" => Ok(Platform::Spotify),
            "soundcloud" | "sc" => Ok(Platform::SoundCloud),
            "other" => Ok(Platform::Other),
            other => Err(ParsePlatformError::Unknown(other.to_string())),
        }
    }
}

/// Phase of the "now playing" session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum PlaybackPhase {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

/// Lifecycle of the search session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Resolved,
}

/// How a resolved search got its results
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SearchOutcome {
    /// The provider returned songs
    Matches,
    /// The provider returned nothing and the default list was substituted
    Fallback,
    /// Nothing to show
    NoResults,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_platform_names() {
        assert_eq!("youtube".parse(), Ok(Platform::YouTube));
        assert_eq!(" Spotify ".parse(), Ok(Platform::Spotify));
        assert_eq!("SOUNDCLOUD".parse(), Ok(Platform::SoundCloud));
        assert_eq!(
            "deezer".parse::<Platform>(),
            Err(ParsePlatformError::Unknown("deezer".to_string()))
        );
    }

    #[test]
    fn unknown_source_deserializes_to_other() {
        let platform: Platform = serde_json::from_str("\"bandcamp\"").unwrap();
        assert_eq!(platform, Platform::Other);

        let platform: Platform = serde_json::from_str("\"soundcloud\"").unwrap();
        assert_eq!(platform, Platform::SoundCloud);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for platform in Platform::searchable().into_iter().chain([Platform::Other]) {
            assert_eq!(platform.to_string().parse(), Ok(platform));
        }
    }
}
