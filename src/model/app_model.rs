//! Main session model with state management

use serde::Serialize;

use super::embed::resolve_embed_url;
use super::playback::{PlaybackInfo, PlaybackSession};
use super::playlist::{PlaylistStore, RemoveOutcome, SaveOutcome};
use super::search::{SearchSession, SearchState, SearchTicket, SearchToken};
use super::song::SongRef;
use super::types::{PlaybackPhase, Platform, SongId};

/// Main session model containing all state.
///
/// Cross-store rules live here so every mutation leaves the model consistent;
/// callers hold the model behind one lock and publish a snapshot afterwards.
#[derive(Debug, Default)]
pub struct SessionModel {
    playlist: PlaylistStore,
    playback: PlaybackSession,
    search: SearchSession,
    fallback: Vec<SongRef>,
}

impl SessionModel {
    pub fn new(default_volume: i64, fallback: Vec<SongRef>) -> Self {
        Self {
            playlist: PlaylistStore::new(),
            playback: PlaybackSession::with_volume(default_volume),
            search: SearchSession::new(),
            fallback,
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    pub fn play(&mut self, song: SongRef) {
        self.playback.play(song);
    }

    pub fn embed_ready(&mut self, song_id: Option<&str>) -> bool {
        match song_id {
            Some(song_id) => self.playback.on_embed_ready_for(song_id),
            None => self.playback.on_embed_ready(),
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.playback.toggle_pause()
    }

    pub fn set_volume(&mut self, volume: i64) -> u8 {
        self.playback.set_volume(volume)
    }

    pub fn close_player(&mut self) {
        self.playback.close();
    }

    pub fn playback(&self) -> &PlaybackSession {
        &self.playback
    }

    // ========================================================================
    // Playlist
    // ========================================================================

    pub fn save(&mut self, song: SongRef) -> SaveOutcome {
        self.playlist.save(song)
    }

    /// Remove a saved song. Stops playback when that song is loaded.
    pub fn remove(&mut self, song_id: &str) -> (RemoveOutcome, bool) {
        let outcome = self.playlist.remove(song_id);

        let stopped = outcome.removed.is_some() && self.playback.is_playing(song_id);
        if stopped {
            self.playback.stop();
        }

        (outcome, stopped)
    }

    pub fn playlist(&self) -> &PlaylistStore {
        &self.playlist
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn begin_search(&mut self, query: &str, platform: Platform) -> Option<SearchTicket> {
        self.search.begin(query, platform)
    }

    pub fn resolve_search(&mut self, token: SearchToken, results: Vec<SongRef>) -> bool {
        let fallback = (!self.fallback.is_empty()).then_some(self.fallback.as_slice());
        self.search.resolve(token, results, fallback)
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    /// Find a song the user can currently see, by id.
    pub fn find_song(&self, song_id: &str) -> Option<&SongRef> {
        self.search
            .results()
            .iter()
            .chain(self.playlist.songs())
            .chain(self.playback.song())
            .find(|song| song.id == song_id)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn teardown(&mut self) {
        self.playlist.clear();
        self.playback.stop();
        self.search.reset();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let embed_url = self.playback.song().map(resolve_embed_url);
        let current_playing_id = match self.playback.phase() {
            PlaybackPhase::Idle => None,
            _ => self.playback.current_id().map(str::to_owned),
        };

        SessionSnapshot {
            playlist: self.playlist.songs().to_vec(),
            playback: self.playback.info(embed_url),
            current_playing_id,
            search: self.search.state(),
        }
    }
}

/// Read-only view of the whole session handed to presentation
#[derive(Clone, Debug, Default, Serialize)]
pub struct SessionSnapshot {
    pub playlist: Vec<SongRef>,
    pub playback: PlaybackInfo,
    pub current_playing_id: Option<SongId>,
    pub search: SearchState,
}

impl SessionSnapshot {
    pub fn is_playing(&self, song_id: &str) -> bool {
        self.current_playing_id.as_deref() == Some(song_id)
    }

    pub fn is_saved(&self, song_id: &str) -> bool {
        self.playlist.iter().any(|song| song.id == song_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchOutcome, SearchPhase};

    fn song(id: &str) -> SongRef {
        SongRef::new(id, "title", "artist", Platform::Spotify, format!("https://open.spotify.com/track/{id}"))
    }

    #[test]
    fn removing_the_playing_song_stops_playback() {
        let mut model = SessionModel::default();
        model.save(song("a"));
        model.play(song("a"));
        model.embed_ready(None);

        let (outcome, stopped) = model.remove("a");

        assert!(outcome.removed.is_some());
        assert!(stopped);
        assert_eq!(model.playback().phase(), PlaybackPhase::Idle);
        assert!(model.playback().song().is_none());
    }

    #[test]
    fn removing_another_song_keeps_playing() {
        let mut model = SessionModel::default();
        model.save(song("a"));
        model.save(song("b"));
        model.play(song("a"));

        let (_, stopped) = model.remove("b");

        assert!(!stopped);
        assert_eq!(model.playback().current_id(), Some("a"));
    }

    #[test]
    fn removing_unsaved_playing_song_id_keeps_playing() {
        let mut model = SessionModel::default();
        model.play(song("a"));

        let (outcome, stopped) = model.remove("a");

        assert!(outcome.removed.is_none());
        assert!(!stopped);
        assert_eq!(model.playback().phase(), PlaybackPhase::Loading);
    }

    #[test]
    fn snapshot_carries_embed_url_of_playing_song() {
        let mut model = SessionModel::default();
        model.play(song("7qiZfU4dY1lWllzX7mPBI3"));

        let snapshot = model.snapshot();

        assert_eq!(snapshot.current_playing_id.as_deref(), Some("7qiZfU4dY1lWllzX7mPBI3"));
        assert_eq!(
            snapshot.playback.embed_url.as_deref(),
            Some("https://open.spotify.com/embed/track/7qiZfU4dY1lWllzX7mPBI3?utm_source=generator&theme=0")
        );
    }

    #[test]
    fn idle_snapshot_has_no_playing_id() {
        let mut model = SessionModel::default();
        model.play(song("a"));
        model.close_player();

        let snapshot = model.snapshot();

        assert!(snapshot.current_playing_id.is_none());
        assert!(snapshot.playback.embed_url.is_none());
        assert_eq!(snapshot.playback.phase, PlaybackPhase::Idle);
    }

    #[test]
    fn empty_search_uses_configured_fallback() {
        let mut model = SessionModel::new(75, vec![song("f")]);
        let ticket = model.begin_search("zzz", Platform::YouTube).unwrap();

        assert!(model.resolve_search(ticket.token, Vec::new()));

        let snapshot = model.snapshot();
        assert_eq!(snapshot.search.phase, SearchPhase::Resolved);
        assert_eq!(snapshot.search.outcome, Some(SearchOutcome::Fallback));
        assert_eq!(snapshot.search.results[0].id, "f");
    }

    #[test]
    fn find_song_looks_through_visible_lists() {
        let mut model = SessionModel::default();
        let ticket = model.begin_search("a", Platform::Spotify).unwrap();
        model.resolve_search(ticket.token, vec![song("r1")]);
        model.save(song("p1"));
        model.play(song("x"));

        assert!(model.find_song("r1").is_some());
        assert!(model.find_song("p1").is_some());
        assert!(model.find_song("x").is_some());
        assert!(model.find_song("nope").is_none());
    }

    #[test]
    fn teardown_clears_everything() {
        let mut model = SessionModel::default();
        model.save(song("a"));
        model.play(song("a"));
        model.begin_search("a", Platform::YouTube);

        model.teardown();

        let snapshot = model.snapshot();
        assert!(snapshot.playlist.is_empty());
        assert!(snapshot.playback.song.is_none());
        assert_eq!(snapshot.search.phase, SearchPhase::Idle);
    }
}
