//! songdeck - media reference resolution and playback session core
//!
//! - `model`: Session stores, embed URL resolution and snapshots
//! - `controller`: The session coordinator driven by presentation
//! - `provider`: Search and catalog boundaries
//! - `catalog`: Built-in catalog and catalog-backed search
//! - `config`: Session configuration
//! - `logging`: File-based tracing setup

pub mod catalog;
pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod provider;

pub use controller::{EmbedEvent, SessionCoordinator};
