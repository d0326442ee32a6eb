//! Resolution of platform page URLs into embeddable player URLs
//!
//! Every platform has its own URL grammar. Resolution never fails: a malformed
//! URL yields an embed URL with an empty or garbage identifier, and the player
//! surface shows its own error.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::song::SongRef;
use super::types::Platform;

const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";
const SPOTIFY_EMBED_BASE: &str = "https://open.spotify.com/embed/track/";
const SOUNDCLOUD_PLAYER_BASE: &str = "https://w.soundcloud.com/player/";

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Compute the URL to hand to an embeddable player for `song`.
pub fn resolve_embed_url(song: &SongRef) -> String {
    if let Some(embed_url) = &song.embed_url_override {
        return embed_url.clone();
    }

    match song.source_platform {
        Platform::YouTube => youtube_embed_url(&song.canonical_url),
        Platform::Spotify => spotify_embed_url(&song.canonical_url),
        Platform::SoundCloud => soundcloud_embed_url(&song.canonical_url),
        Platform::Other => song.canonical_url.clone(),
    }
}

/// The platform page for the "open externally" action
pub fn external_url(song: &SongRef) -> &str {
    &song.canonical_url
}

fn youtube_embed_url(url: &str) -> String {
    let video_id = youtube_video_id(url);
    format!("{YOUTUBE_EMBED_BASE}{video_id}?autoplay=1&rel=0")
}

fn youtube_video_id(url: &str) -> &str {
    if let Some(id) = query_param(url, "v") {
        return id;
    }

    // Short links: youtu.be/{id}, /embed/{id}, /shorts/{id}
    let path = url.split(['?', '#']).next().unwrap_or_default();
    path.rsplit('/').next().unwrap_or_default()
}

fn spotify_embed_url(url: &str) -> String {
    let track_id = url
        .split_once("/track/")
        .map(|(_, rest)| rest.split('?').next().unwrap_or_default())
        .unwrap_or_default();

    format!("{SPOTIFY_EMBED_BASE}{track_id}?utm_source=generator&theme=0")
}

fn soundcloud_embed_url(url: &str) -> String {
    let encoded = utf8_percent_encode(url, URI_COMPONENT);

    format!(
        "{SOUNDCLOUD_PLAYER_BASE}?url={encoded}&auto_play=true&hide_related=true\
         &show_comments=false&show_user=true&show_reposts=false&show_teaser=false"
    )
}

/// Value of the first `name=` parameter in the query string, cut at `&`
fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then_some(value)
    })
}
