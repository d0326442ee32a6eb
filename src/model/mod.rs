//! Model module - Session state and data types
//!
//! This module contains all the data structures and state management for a session.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (platforms, phases)
//! - `song`: The shared song reference
//! - `embed`: Platform URL to embeddable player URL resolution
//! - `playlist`: Saved songs
//! - `playback`: The "now playing" slot
//! - `search`: Search lifecycle with stale-response rejection
//! - `app_model`: Composed session model and snapshots

mod types;
mod song;
mod embed;
mod playlist;
mod playback;
mod search;
mod app_model;

// Re-export all public types for convenient access
pub use types::{
    ParsePlatformError, PlaybackPhase, Platform, SearchOutcome, SearchPhase, SongId,
};

pub use song::SongRef;

pub use embed::{external_url, resolve_embed_url};

pub use playlist::{PlaylistStore, RemoveOutcome, SaveOutcome};

pub use playback::{DEFAULT_VOLUME_PERCENT, PlaybackInfo, PlaybackSession};

pub use search::{SearchSession, SearchState, SearchTicket, SearchToken};

pub use app_model::{SessionModel, SessionSnapshot};
