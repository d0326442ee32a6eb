//! Search session state machine
//!
//! Each accepted submission gets a fresh sequence token. A provider response is
//! applied only if it carries the latest token, so a slow answer to an older
//! query can never overwrite a newer one.

use serde::Serialize;

use super::song::SongRef;
use super::types::{Platform, SearchOutcome, SearchPhase};

/// Sequence token identifying one submission
pub type SearchToken = u64;

/// Everything needed to run the provider call for one accepted submission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket {
    pub token: SearchToken,
    pub query: String,
    pub platform: Platform,
}

#[derive(Clone, Debug, Default)]
pub struct SearchSession {
    query: String,
    platform: Platform,
    phase: SearchPhase,
    results: Vec<SongRef>,
    outcome: Option<SearchOutcome>,
    latest_token: SearchToken,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a submission. Whitespace-only queries are refused and leave the
    /// session untouched.
    pub fn begin(&mut self, query: &str, platform: Platform) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.latest_token += 1;
        self.query = query.to_string();
        self.platform = platform;
        self.phase = SearchPhase::Searching;
        self.results.clear();
        self.outcome = None;

        Some(SearchTicket {
            token: self.latest_token,
            query: self.query.clone(),
            platform,
        })
    }

    /// Apply a provider response. Returns `false` when the response is stale.
    ///
    /// An empty response falls back to `fallback` when one is given.
    pub fn resolve(&mut self, token: SearchToken, results: Vec<SongRef>, fallback: Option<&[SongRef]>) -> bool {
        if token != self.latest_token || self.phase != SearchPhase::Searching {
            return false;
        }

        let (results, outcome) = match (results.is_empty(), fallback) {
            (false, _) => (results, SearchOutcome::Matches),
            (true, Some(fallback)) if !fallback.is_empty() => (fallback.to_vec(), SearchOutcome::Fallback),
            (true, _) => (Vec::new(), SearchOutcome::NoResults),
        };

        self.results = results;
        self.outcome = Some(outcome);
        self.phase = SearchPhase::Resolved;
        true
    }

    /// Back to `Idle`. Any in-flight response becomes stale.
    pub fn reset(&mut self) {
        let latest_token = self.latest_token + 1;
        *self = Self {
            latest_token,
            ..Self::default()
        };
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn results(&self) -> &[SongRef] {
        &self.results
    }

    pub fn outcome(&self) -> Option<SearchOutcome> {
        self.outcome
    }

    pub fn latest_token(&self) -> SearchToken {
        self.latest_token
    }

    pub fn state(&self) -> SearchState {
        SearchState {
            query: self.query.clone(),
            platform: self.platform,
            phase: self.phase,
            results: self.results.clone(),
            outcome: self.outcome,
        }
    }
}

/// Search state for rendering
#[derive(Clone, Debug, Default, Serialize)]
pub struct SearchState {
    pub query: String,
    pub platform: Platform,
    pub phase: SearchPhase,
    pub results: Vec<SongRef>,
    pub outcome: Option<SearchOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str) -> SongRef {
        SongRef::new(id, "title", "artist", Platform::YouTube, "")
    }

    #[test]
    fn whitespace_query_is_refused() {
        let mut search = SearchSession::new();

        assert!(search.begin("   ", Platform::YouTube).is_none());
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert_eq!(search.latest_token(), 0);
    }

    #[test]
    fn begin_records_trimmed_query() {
        let mut search = SearchSession::new();

        let ticket = search.begin("  weeknd ", Platform::Spotify).unwrap();

        assert_eq!(ticket.query, "weeknd");
        assert_eq!(ticket.platform, Platform::Spotify);
        assert_eq!(search.query(), "weeknd");
        assert_eq!(search.phase(), SearchPhase::Searching);
    }

    #[test]
    fn results_resolve_the_search() {
        let mut search = SearchSession::new();
        let ticket = search.begin("a", Platform::YouTube).unwrap();

        assert!(search.resolve(ticket.token, vec![song("1"), song("2")], None));

        assert_eq!(search.phase(), SearchPhase::Resolved);
        assert_eq!(search.results().len(), 2);
        assert_eq!(search.outcome(), Some(SearchOutcome::Matches));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut search = SearchSession::new();
        let first = search.begin("a", Platform::YouTube).unwrap();
        let second = search.begin("b", Platform::YouTube).unwrap();

        assert!(search.resolve(second.token, vec![song("b1")], None));
        assert!(!search.resolve(first.token, vec![song("a1")], None));

        assert_eq!(search.query(), "b");
        assert_eq!(search.results()[0].id, "b1");
    }

    #[test]
    fn stale_response_while_newer_is_pending_is_discarded() {
        let mut search = SearchSession::new();
        let first = search.begin("a", Platform::YouTube).unwrap();
        search.begin("b", Platform::YouTube).unwrap();

        assert!(!search.resolve(first.token, vec![song("a1")], None));

        assert_eq!(search.phase(), SearchPhase::Searching);
        assert!(search.results().is_empty());
    }

    #[test]
    fn empty_response_falls_back_to_default_list() {
        let mut search = SearchSession::new();
        let ticket = search.begin("nothing", Platform::YouTube).unwrap();
        let fallback = [song("f1"), song("f2")];

        assert!(search.resolve(ticket.token, Vec::new(), Some(&fallback)));

        assert_eq!(search.outcome(), Some(SearchOutcome::Fallback));
        assert_eq!(search.results().len(), 2);
    }

    #[test]
    fn empty_response_without_fallback_is_no_results() {
        let mut search = SearchSession::new();
        let ticket = search.begin("nothing", Platform::YouTube).unwrap();

        assert!(search.resolve(ticket.token, Vec::new(), Some(&[])));

        assert_eq!(search.phase(), SearchPhase::Resolved);
        assert!(search.results().is_empty());
        assert_eq!(search.outcome(), Some(SearchOutcome::NoResults));
    }

    #[test]
    fn reset_invalidates_in_flight_tokens() {
        let mut search = SearchSession::new();
        let ticket = search.begin("a", Platform::YouTube).unwrap();

        search.reset();

        assert!(!search.resolve(ticket.token, vec![song("1")], None));
        assert_eq!(search.phase(), SearchPhase::Idle);
        assert!(search.query().is_empty());
    }
}
