use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use songdeck::catalog::{CatalogSearchProvider, StaticCatalog};
use songdeck::config::SessionConfig;
use songdeck::logging;
use songdeck::model::{external_url, PlaybackPhase, Platform, SearchPhase, SessionModel, SessionSnapshot, SongRef};
use songdeck::provider::CatalogProvider;
use songdeck::{EmbedEvent, SessionCoordinator};

const HELP: &str = "\
commands:
  search <youtube|spotify|soundcloud> <query>
  play <id>      save <id>      remove <id>
  ready          pause          volume <0-100>   close
  trending       genres         genre <id>
  show           help           quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search { platform: Platform, query: String },
    Play(String),
    Save(String),
    Remove(String),
    Ready,
    Pause,
    Volume(i64),
    Close,
    Trending,
    Genres,
    Genre(String),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        let id = |name: &str| {
            if rest.is_empty() {
                Err(format!("usage: {name} <id>"))
            } else {
                Ok(rest.to_string())
            }
        };

        match word {
            "search" => {
                let (platform, query) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let platform = platform.parse::<Platform>().map_err(|e| e.to_string())?;
                Ok(Command::Search { platform, query: query.to_string() })
            }
            "play" => id("play").map(Command::Play),
            "save" => id("save").map(Command::Save),
            "remove" => id("remove").map(Command::Remove),
            "ready" => Ok(Command::Ready),
            "pause" => Ok(Command::Pause),
            "volume" => rest
                .parse()
                .map(Command::Volume)
                .map_err(|_| "usage: volume <0-100>".to_string()),
            "close" => Ok(Command::Close),
            "trending" => Ok(Command::Trending),
            "genres" => Ok(Command::Genres),
            "genre" => id("genre").map(Command::Genre),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = SessionConfig::from_args_or_env(std::env::args().nth(1))?;

    if let Err(e) = logging::init_logging(&config.log_dir) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!(?config, "=== songdeck starting ===");

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::load(path)?,
        None => StaticCatalog::builtin()?,
    };
    let catalog = Arc::new(catalog);

    let fallback = if config.fallback_to_catalog {
        catalog.default_songs()
    } else {
        Vec::new()
    };

    let provider = CatalogSearchProvider::new(catalog.clone())
        .with_latency(Duration::from_millis(config.search_latency_ms));

    let coordinator = SessionCoordinator::new(
        SessionModel::new(config.default_volume, fallback),
        Arc::new(provider),
    );

    let (embed_tx, embed_rx) = mpsc::unbounded_channel();
    let listener = coordinator.start_embed_event_listener(embed_rx);

    let mut updates = coordinator.subscribe();
    let printer = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            println!("{}", status_line(&snapshot));
        }
    });

    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        tracing::debug!(?command, "Command received");

        match command {
            Command::Search { platform, query } => {
                coordinator.spawn_search(query, platform);
            }
            Command::Play(id) => match lookup(&coordinator, &catalog, &id).await {
                Some(song) => {
                    println!("open externally: {}", external_url(&song));
                    coordinator.play_song(song).await;
                }
                None => println!("no song with id {id}"),
            },
            Command::Save(id) => match lookup(&coordinator, &catalog, &id).await {
                Some(song) => {
                    if !coordinator.save_song(song).await.added {
                        println!("{id} is already in your playlist");
                    }
                }
                None => println!("no song with id {id}"),
            },
            Command::Remove(id) => {
                if coordinator.remove_song(&id).await.removed.is_none() {
                    println!("{id} is not in your playlist");
                }
            }
            Command::Ready => {
                let song_id = coordinator.snapshot().current_playing_id;
                if embed_tx.send(EmbedEvent::Ready { song_id }).is_err() {
                    tracing::warn!("Embed event listener is gone");
                }
            }
            Command::Pause => {
                if !coordinator.toggle_pause().await {
                    println!("nothing is playing");
                }
            }
            Command::Volume(volume) => {
                coordinator.set_volume(volume).await;
            }
            Command::Close => {
                if embed_tx.send(EmbedEvent::Closed).is_err() {
                    tracing::warn!("Embed event listener is gone");
                }
            }
            Command::Trending => print_songs("Trending", &catalog.trending()),
            Command::Genres => {
                for genre in catalog.genres() {
                    println!("  {:<12} {}", genre.id, genre.name);
                }
            }
            Command::Genre(id) => print_songs(&id, &catalog.songs_for_genre(&id)),
            Command::Show => print_snapshot(&coordinator.snapshot()),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    coordinator.shutdown().await;
    drop(embed_tx);
    join_listener(listener).await;
    printer.abort();

    tracing::info!("=== songdeck exiting ===");

    Ok(())
}

/// Wait for the embed event listener, reporting a panic or cancellation
async fn join_listener(listener: JoinHandle<()>) -> bool {
    match listener.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Embed event listener ended abnormally");
            false
        }
    }
}

/// Songs visible in the session first, then anything in the catalog
async fn lookup(coordinator: &SessionCoordinator, catalog: &StaticCatalog, id: &str) -> Option<SongRef> {
    if let Some(song) = coordinator.find_song(id).await {
        return Some(song);
    }

    catalog
        .default_songs()
        .into_iter()
        .chain(catalog.genres().into_iter().flat_map(|genre| catalog.songs_for_genre(&genre.id)))
        .find(|song| song.id == id)
}

fn status_line(snapshot: &SessionSnapshot) -> String {
    let player = match (&snapshot.playback.song, snapshot.playback.phase) {
        (Some(song), phase) if phase != PlaybackPhase::Idle => {
            format!("{:?}: {} - {}", phase, song.title, song.artist)
        }
        _ => "Idle".to_string(),
    };

    let search = match snapshot.search.phase {
        SearchPhase::Idle => String::new(),
        SearchPhase::Searching => format!(" | searching {} for \"{}\"", snapshot.search.platform, snapshot.search.query),
        SearchPhase::Resolved => format!(
            " | {} result(s) for \"{}\" ({:?})",
            snapshot.search.results.len(),
            snapshot.search.query,
            snapshot.search.outcome
        ),
    };

    format!(
        "[{player} | vol {} | {} saved{search}]",
        snapshot.playback.volume,
        snapshot.playlist.len()
    )
}

fn print_songs(heading: &str, songs: &[SongRef]) {
    println!("{heading}:");
    if songs.is_empty() {
        println!("  (none)");
    }
    for song in songs {
        println!(
            "  {:<10} {} - {} [{}]",
            song.id,
            song.title,
            song.artist,
            song.source_platform.display_name()
        );
    }
}

fn print_snapshot(snapshot: &SessionSnapshot) {
    println!("{}", status_line(snapshot));

    if let Some(url) = &snapshot.playback.embed_url {
        println!("embed: {url}");
    }

    print_songs("Playlist", &snapshot.playlist);

    if snapshot.search.phase == SearchPhase::Resolved {
        print_songs("Results", &snapshot.search.results);
    }
}
