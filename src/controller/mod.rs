//! Controller module - Session commands and snapshot publishing
//!
//! This module contains the session coordinator that the presentation layer
//! drives. Every command runs under one model lock and publishes a fresh
//! snapshot before releasing it. It is organized into submodules by
//! responsibility:
//!
//! - `playback`: Player commands
//! - `playlist`: Saved-songs commands and teardown
//! - `search`: Search submission with stale-response rejection
//! - `embed_events`: Listener for signals from the embedded player

mod playback;
mod playlist;
mod search;
mod embed_events;

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::model::{SessionModel, SessionSnapshot, SongRef};
use crate::provider::SearchProvider;

pub use embed_events::EmbedEvent;

#[derive(Clone)]
pub struct SessionCoordinator {
    pub(crate) model: Arc<Mutex<SessionModel>>,
    provider: Arc<dyn SearchProvider>,
    snapshots: Arc<watch::Sender<SessionSnapshot>>,
}

impl SessionCoordinator {
    pub fn new(model: SessionModel, provider: Arc<dyn SearchProvider>) -> Self {
        let (snapshots, _) = watch::channel(model.snapshot());

        Self {
            model: Arc::new(Mutex::new(model)),
            provider,
            snapshots: Arc::new(snapshots),
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Look up a song visible in the session (results, playlist or player)
    pub async fn find_song(&self, song_id: &str) -> Option<SongRef> {
        let model = self.model.lock().await;
        model.find_song(song_id).cloned()
    }

    /// Must be called with the model lock held, after the mutation.
    pub(crate) fn publish(&self, model: &SessionModel) {
        self.snapshots.send_replace(model.snapshot());
    }
}
