//! Playback-related controller methods

use crate::model::SongRef;
use super::SessionCoordinator;

impl SessionCoordinator {
    /// Load `song` into the player, replacing whatever was loaded.
    pub async fn play_song(&self, song: SongRef) {
        tracing::debug!(song_id = %song.id, platform = %song.source_platform, "Playing song");

        let mut model = self.model.lock().await;
        model.play(song);
        self.publish(&model);
    }

    /// The embedded player finished loading. With a song id, the signal is
    /// only honored if that song is still the loaded one.
    pub async fn embed_ready(&self, song_id: Option<&str>) -> bool {
        let mut model = self.model.lock().await;

        let applied = model.embed_ready(song_id);
        if applied {
            tracing::info!(song_id = ?model.playback().current_id(), "Embed ready, playing");
            self.publish(&model);
        } else {
            tracing::debug!(?song_id, phase = ?model.playback().phase(), "Ignoring embed ready signal");
        }

        applied
    }

    pub async fn toggle_pause(&self) -> bool {
        let mut model = self.model.lock().await;

        let toggled = model.toggle_pause();
        if toggled {
            tracing::info!(phase = ?model.playback().phase(), "Playback toggled");
            self.publish(&model);
        }

        toggled
    }

    pub async fn set_volume(&self, volume: i64) -> u8 {
        let mut model = self.model.lock().await;

        let stored = model.set_volume(volume);
        tracing::debug!(requested = volume, stored, "Volume set");
        self.publish(&model);

        stored
    }

    pub async fn close_player(&self) {
        let mut model = self.model.lock().await;

        tracing::debug!(song_id = ?model.playback().current_id(), "Closing player");
        model.close_player();
        self.publish(&model);
    }
}
