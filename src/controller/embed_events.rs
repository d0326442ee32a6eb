//! Listener for signals coming from the embedded player

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::model::SongId;
use super::SessionCoordinator;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbedEvent {
    /// The embed finished loading. Carries the id of the song it was created for.
    Ready { song_id: Option<SongId> },
    /// The user dismissed the player overlay.
    Closed,
}

impl SessionCoordinator {
    /// Apply embed events until every sender is dropped.
    pub fn start_embed_event_listener(&self, mut events: mpsc::UnboundedReceiver<EmbedEvent>) -> JoinHandle<()> {
        let coordinator = self.clone();
        tracing::info!("Starting embed event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    EmbedEvent::Ready { song_id } => {
                        tracing::debug!(?song_id, "EmbedEvent::Ready");
                        coordinator.embed_ready(song_id.as_deref()).await;
                    }
                    EmbedEvent::Closed => {
                        tracing::debug!("EmbedEvent::Closed");
                        coordinator.close_player().await;
                    }
                }
            }

            tracing::debug!("Embed event listener shutting down");
        })
    }
}
