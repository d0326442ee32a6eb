//! The user's saved songs

use super::song::SongRef;

/// Result of [`PlaylistStore::save`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveOutcome {
    /// `false` when a song with the same id was already saved
    pub added: bool,
}

/// Result of [`PlaylistStore::remove`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub removed: Option<SongRef>,
}

/// Ordered set of saved songs keyed by id, in insertion order
#[derive(Clone, Debug, Default)]
pub struct PlaylistStore {
    songs: Vec<SongRef>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, song: SongRef) -> SaveOutcome {
        if self.contains(&song.id) {
            return SaveOutcome { added: false };
        }

        self.songs.push(song);
        SaveOutcome { added: true }
    }

    pub fn remove(&mut self, song_id: &str) -> RemoveOutcome {
        let removed = self
            .songs
            .iter()
            .position(|song| song.id == song_id)
            .map(|index| self.songs.remove(index));

        RemoveOutcome { removed }
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.songs.iter().any(|song| song.id == song_id)
    }

    pub fn get(&self, song_id: &str) -> Option<&SongRef> {
        self.songs.iter().find(|song| song.id == song_id)
    }

    pub fn songs(&self) -> &[SongRef] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }
}
