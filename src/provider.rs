//! Boundaries to the external song sources

use async_trait::async_trait;

use crate::model::{Platform, SongRef};

/// Genre tab of the catalog
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
}

/// Runs a search against one of the platforms.
///
/// "No results" is an empty list, not an error. Timeouts and retries are the
/// implementation's business; the session treats any error as an empty answer.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, platform: Platform) -> anyhow::Result<Vec<SongRef>>;
}

/// Read-only trending and genre lists
pub trait CatalogProvider: Send + Sync {
    fn trending(&self) -> Vec<SongRef>;

    fn recommendations(&self) -> Vec<SongRef>;

    fn genres(&self) -> Vec<Genre>;

    fn songs_for_genre(&self, genre_id: &str) -> Vec<SongRef>;

    /// General list shown when a search comes back empty
    fn default_songs(&self) -> Vec<SongRef> {
        let mut songs = self.trending();
        songs.extend(self.recommendations());
        songs
    }
}
