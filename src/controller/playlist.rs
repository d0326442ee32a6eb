//! Playlist commands and session teardown

use crate::model::{RemoveOutcome, SaveOutcome, SongRef};
use super::SessionCoordinator;

impl SessionCoordinator {
    pub async fn save_song(&self, song: SongRef) -> SaveOutcome {
        let mut model = self.model.lock().await;

        let song_id = song.id.clone();
        let outcome = model.save(song);
        if outcome.added {
            tracing::info!(song_id = %song_id, saved = model.playlist().len(), "Song saved");
            self.publish(&model);
        } else {
            tracing::debug!(song_id = %song_id, "Song already saved");
        }

        outcome
    }

    /// Remove a saved song. If it is the loaded song, playback stops in the
    /// same step.
    pub async fn remove_song(&self, song_id: &str) -> RemoveOutcome {
        let mut model = self.model.lock().await;

        let (outcome, stopped) = model.remove(song_id);
        if outcome.removed.is_some() {
            tracing::info!(song_id, stopped, "Song removed");
            self.publish(&model);
        } else {
            tracing::debug!(song_id, "Song not in playlist");
        }

        outcome
    }

    /// Clear playlist, player and search. Pending searches resolve as stale.
    pub async fn shutdown(&self) {
        let mut model = self.model.lock().await;

        tracing::info!("Tearing down session");
        model.teardown();
        self.publish(&model);
    }
}
