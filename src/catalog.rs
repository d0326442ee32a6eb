//! Built-in song catalog and the catalog-backed search provider

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{Platform, SongRef};
use crate::provider::{CatalogProvider, Genre, SearchProvider};

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    trending: Vec<SongRef>,
    #[serde(default)]
    recommendations: Vec<SongRef>,
    #[serde(default)]
    genres: Vec<GenreEntry>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    #[serde(flatten)]
    genre: Genre,
    #[serde(default)]
    songs: Vec<SongRef>,
}

/// Catalog held entirely in memory
#[derive(Debug)]
pub struct StaticCatalog {
    trending: Vec<SongRef>,
    recommendations: Vec<SongRef>,
    genres: Vec<GenreEntry>,
}

impl StaticCatalog {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("built-in catalog is malformed")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;

        Ok(Self {
            trending: file.trending,
            recommendations: file.recommendations,
            genres: file.genres,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;

        let catalog = Self::from_json(&content)
            .with_context(|| format!("parsing catalog {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            trending = catalog.trending.len(),
            recommendations = catalog.recommendations.len(),
            genres = catalog.genres.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }
}

impl CatalogProvider for StaticCatalog {
    fn trending(&self) -> Vec<SongRef> {
        self.trending.clone()
    }

    fn recommendations(&self) -> Vec<SongRef> {
        self.recommendations.clone()
    }

    fn genres(&self) -> Vec<Genre> {
        self.genres.iter().map(|entry| entry.genre.clone()).collect()
    }

    fn songs_for_genre(&self, genre_id: &str) -> Vec<SongRef> {
        self.genres
            .iter()
            .find(|entry| entry.genre.id == genre_id)
            .map(|entry| entry.songs.clone())
            .unwrap_or_default()
    }
}

/// Searches the catalog's default songs by title or artist.
///
/// The selected platform is not used for filtering; results from every
/// platform are returned.
pub struct CatalogSearchProvider {
    catalog: Arc<dyn CatalogProvider>,
    latency: Duration,
}

impl CatalogSearchProvider {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            latency: Duration::ZERO,
        }
    }

    /// Delay every answer, to behave like a network search
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl SearchProvider for CatalogSearchProvider {
    async fn search(&self, query: &str, platform: Platform) -> Result<Vec<SongRef>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let results: Vec<SongRef> = self
            .catalog
            .default_songs()
            .into_iter()
            .filter(|song| song.matches(query))
            .collect();

        tracing::debug!(query, %platform, results = results.len(), "Catalog search");

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = StaticCatalog::builtin().unwrap();

        assert_eq!(catalog.trending().len(), 6);
        assert_eq!(catalog.recommendations().len(), 5);
        assert_eq!(catalog.genres().len(), 6);
        assert_eq!(catalog.default_songs().len(), 11);
    }

    #[test]
    fn genre_lookup() {
        let catalog = StaticCatalog::builtin().unwrap();

        let rock = catalog.songs_for_genre("rock");
        assert_eq!(rock.len(), 2);
        assert_eq!(rock[0].title, "Bohemian Rhapsody");

        assert!(catalog.songs_for_genre("polka").is_empty());
    }

    #[test]
    fn loads_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{ "trending": [ { "id": "t", "title": "T", "artist": "A", "source": "youtube", "url": "https://youtu.be/t" } ] }"#,
        )
        .unwrap();

        let catalog = StaticCatalog::load(&path).unwrap();

        assert_eq!(catalog.trending().len(), 1);
        assert!(catalog.recommendations().is_empty());
        assert!(catalog.genres().is_empty());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(StaticCatalog::load(&dir.path().join("nope.json")).is_err());
    }

    #[tokio::test]
    async fn search_matches_title_or_artist() {
        let catalog = Arc::new(StaticCatalog::builtin().unwrap());
        let provider = CatalogSearchProvider::new(catalog);

        let results = provider.search("harry", Platform::YouTube).await.unwrap();
        let ids: Vec<_> = results.iter().map(|song| song.id.as_str()).collect();
        assert_eq!(ids, ["trend-2", "rec-1"]);

        let results = provider.search("no such song", Platform::Spotify).await.unwrap();
        assert!(results.is_empty());
    }
}
