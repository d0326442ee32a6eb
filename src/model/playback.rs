//! Playback-related types and state management

use serde::Serialize;

use super::song::SongRef;
use super::types::PlaybackPhase;

pub const DEFAULT_VOLUME_PERCENT: u8 = 75;
pub const MAX_VOLUME_PERCENT: u8 = 100;

/// The single "now playing" slot.
///
/// The song is only ever changed through [`PlaybackSession::play`]; `song` is
/// `None` exactly when the phase is [`PlaybackPhase::Idle`].
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    song: Option<SongRef>,
    phase: PlaybackPhase,
    volume: u8,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::with_volume(DEFAULT_VOLUME_PERCENT as i64)
    }
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_volume(volume: i64) -> Self {
        Self {
            song: None,
            phase: PlaybackPhase::Idle,
            volume: clamp_volume(volume),
        }
    }

    /// Load `song` into the player. Switching songs always restarts the embed.
    pub fn play(&mut self, song: SongRef) {
        self.song = Some(song);
        self.phase = PlaybackPhase::Loading;
    }

    /// The embedded player finished loading.
    pub fn on_embed_ready(&mut self) -> bool {
        if self.phase != PlaybackPhase::Loading {
            return false;
        }

        self.phase = PlaybackPhase::Playing;
        true
    }

    /// Like [`Self::on_embed_ready`], ignoring signals for a song that is no longer loaded.
    pub fn on_embed_ready_for(&mut self, song_id: &str) -> bool {
        if self.current_id() != Some(song_id) {
            return false;
        }

        self.on_embed_ready()
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            PlaybackPhase::Playing => PlaybackPhase::Paused,
            PlaybackPhase::Paused => PlaybackPhase::Playing,
            PlaybackPhase::Idle | PlaybackPhase::Loading => return false,
        };

        true
    }

    pub fn set_volume(&mut self, volume: i64) -> u8 {
        self.volume = clamp_volume(volume);
        self.volume
    }

    pub fn stop(&mut self) {
        self.song = None;
        self.phase = PlaybackPhase::Idle;
    }

    /// The user dismissed the player.
    pub fn close(&mut self) {
        self.stop();
    }

    pub fn song(&self) -> Option<&SongRef> {
        self.song.as_ref()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.song.as_ref().map(|song| song.id.as_str())
    }

    pub fn is_playing(&self, song_id: &str) -> bool {
        self.current_id() == Some(song_id)
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn info(&self, embed_url: Option<String>) -> PlaybackInfo {
        PlaybackInfo {
            song: self.song.clone(),
            phase: self.phase,
            volume: self.volume,
            embed_url,
        }
    }
}

fn clamp_volume(volume: i64) -> u8 {
    volume.clamp(0, MAX_VOLUME_PERCENT as i64) as u8
}

/// Complete playback information for rendering the player
#[derive(Clone, Debug, Default, Serialize)]
pub struct PlaybackInfo {
    pub song: Option<SongRef>,
    pub phase: PlaybackPhase,
    pub volume: u8,
    pub embed_url: Option<String>,
}
