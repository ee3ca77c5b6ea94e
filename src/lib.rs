//! Media-session coordination and season/episode navigation for a TV show browser.
//!
//! The crate keeps exactly one media source audible at a time: opening the episode
//! picker suspends trailers and ambient audio, closing it without a choice resumes
//! them, and launching playback stops them for good. Alongside that it owns the
//! season/episode cursor and the per-season episode fetches, discarding responses
//! that arrive after the viewer has already moved to another season.
//!
//! # Logging
//!
//! This library uses the `tracing` crate for logging. To enable logs, initialize
//! a tracing subscriber in your application:
//!
//! ```no_run
//! use tracing::Level;
//! use tracing_subscriber::FmtSubscriber;
//!
//! let subscriber = FmtSubscriber::builder()
//!     .with_max_level(Level::DEBUG)
//!     .finish();
//!
//! tracing::subscriber::set_global_default(subscriber)
//!     .expect("Failed to set tracing subscriber");
//! ```
//!
//! - `DEBUG`: requests, snapshots, dropped stale responses
//! - `INFO`: session transitions, loaded shows, opened players
//! - `WARN`/`ERROR`: failed requests and miswired selections

mod cache;
pub use cache::{CacheEntry, FetchOutcome, FetchTicket, SeasonEpisodeCache};
pub mod commands;
pub use commands::{FrameCommand, FrameMessage};
mod error;
pub use error::PickerError;
mod events;
pub use events::PlayerEvent;
pub mod images;
pub use images::{still_image_url, StillSize};
mod launcher;
pub use launcher::{LaunchedPlayer, PlaybackLauncher, PlaybackTarget, PlayerEmbed, ESCAPE_KEY};
pub mod media;
pub use media::{
    EmbedChannel, MediaControl, MediaElement, MediaHandle, MediaKind, MediaRegistry, MediaSource,
};
pub mod models;
pub use models::{
    ContentRating, Episode, Genre, MediaType, Season, SeasonDetails, Show, ShowDetails, ShowId,
};
mod navigation;
pub use navigation::EpisodeNavigationController;
mod provider;
pub use provider::{MetadataProvider, TmdbClient};
mod session;
pub use session::MediaSessionCoordinator;
pub mod settings;
pub use settings::{Settings, SETTINGS};
mod state;
pub use state::{EpisodeSelection, Selection, SessionState};
