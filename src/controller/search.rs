//! Search-related controller methods

use tokio::task::JoinHandle;

use crate::model::{Platform, SearchToken, SongRef};
use super::SessionCoordinator;

impl SessionCoordinator {
    /// Run a search and apply its answer.
    ///
    /// The model lock is released while the provider runs, so other commands
    /// (including a newer search) proceed meanwhile. Returns `true` when the
    /// answer was applied, `false` for an empty query or a superseded answer.
    ///
    /// Dropping the returned future before the provider answers resolves the
    /// search as if the provider had found nothing.
    pub async fn submit_search(&self, query: &str, platform: Platform) -> bool {
        let ticket = {
            let mut model = self.model.lock().await;
            match model.begin_search(query, platform) {
                Some(ticket) => {
                    self.publish(&model);
                    ticket
                }
                None => {
                    tracing::debug!("Ignoring empty search query");
                    return false;
                }
            }
        };

        let pending = PendingSearch {
            coordinator: Some(self.clone()),
            token: ticket.token,
        };

        tracing::debug!(query = %ticket.query, %platform, token = ticket.token, "Performing search");

        let results = match self.provider.search(&ticket.query, ticket.platform).await {
            Ok(results) => {
                tracing::info!(
                    query = %ticket.query,
                    %platform,
                    results = results.len(),
                    "Search completed successfully"
                );
                results
            }
            Err(e) => {
                tracing::warn!(query = %ticket.query, %platform, error = %e, "Search failed, treating as no results");
                Vec::new()
            }
        };

        let applied = self.apply_search_answer(ticket.token, results).await;
        pending.disarm();

        applied
    }

    /// Fire-and-forget [`Self::submit_search`]; the result shows up in the snapshot.
    pub fn spawn_search(&self, query: impl Into<String>, platform: Platform) -> JoinHandle<bool> {
        let coordinator = self.clone();
        let query = query.into();

        tokio::spawn(async move { coordinator.submit_search(&query, platform).await })
    }

    async fn apply_search_answer(&self, token: SearchToken, results: Vec<SongRef>) -> bool {
        let mut model = self.model.lock().await;

        let applied = model.resolve_search(token, results);
        if applied {
            tracing::debug!(token, outcome = ?model.search().outcome(), "Search resolved");
            self.publish(&model);
        } else {
            tracing::debug!(token, latest = model.search().latest_token(), "Discarding stale search response");
        }

        applied
    }
}

/// Resolves an accepted search with an empty answer when dropped before
/// the provider answered, so `Searching` never outlives its provider call.
struct PendingSearch {
    coordinator: Option<SessionCoordinator>,
    token: SearchToken,
}

impl PendingSearch {
    fn disarm(mut self) {
        self.coordinator = None;
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        let Some(coordinator) = self.coordinator.take() else {
            return;
        };
        let token = self.token;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(token, "Search abandoned before the provider answered");
                handle.spawn(async move {
                    coordinator.apply_search_answer(token, Vec::new()).await;
                });
            }
            Err(_) => tracing::warn!(token, "Search abandoned outside the runtime, left unresolved"),
        }
    }
}
