//! Song references shared by the playlist, the player and search results

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::types::{Platform, SongId};

/// An immutable reference to a playable song on one of the platforms.
///
/// Identity is the `id` alone: two references with the same id are the same
/// song even if their metadata differs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SongRef {
    pub id: SongId,
    pub title: String,
    pub artist: String,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
    #[serde(rename = "source")]
    pub source_platform: Platform,
    #[serde(rename = "url")]
    pub canonical_url: String,
    #[serde(rename = "embedUrl", default, skip_serializing_if = "Option::is_none")]
    pub embed_url_override: Option<String>,
}

impl SongRef {
    pub fn new(
        id: impl Into<SongId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        source_platform: Platform,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            thumbnail_url: String::new(),
            source_platform,
            canonical_url: canonical_url.into(),
            embed_url_override: None,
        }
    }

    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = thumbnail_url.into();
        self
    }

    pub fn with_embed_url(mut self, embed_url: impl Into<String>) -> Self {
        self.embed_url_override = Some(embed_url.into());
        self
    }

    /// Case-insensitive match of `needle` against title or artist
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.artist.to_lowercase().contains(&needle)
    }
}

impl PartialEq for SongRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SongRef {}

impl Hash for SongRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
