use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Notify};
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::PickerError;
use crate::events::PlayerEvent;
use crate::models::{MediaType, ShowId};
use crate::session::MediaSessionCoordinator;
use crate::settings::{Settings, SETTINGS};
use crate::state::EpisodeSelection;

pub const ESCAPE_KEY: &str = "Escape";

/// The embedded playback surface (an iframe host, a webview, ...).
pub trait PlayerEmbed: Send + Sync {
    fn open(&self, url: &str) -> Result<(), PickerError>;
    fn close(&self);
}

/// What to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    Movie {
        show_id: ShowId,
    },
    Episode {
        show_id: ShowId,
        season_number: i64,
        episode_number: i64,
    },
}

impl PlaybackTarget {
    pub fn episode(show_id: ShowId, selection: EpisodeSelection) -> Self {
        PlaybackTarget::Episode {
            show_id,
            season_number: selection.season_number,
            episode_number: selection.episode_number,
        }
    }

    pub fn media_type(&self) -> MediaType {
        match self {
            PlaybackTarget::Movie { .. } => MediaType::Movie,
            PlaybackTarget::Episode { .. } => MediaType::Tv,
        }
    }

    /// `{base}/movie/{id}` or `{base}/tv/{id}/{season}/{episode}`
    pub fn playback_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match self {
            PlaybackTarget::Movie { show_id } => format!("{}/movie/{}", base, show_id),
            PlaybackTarget::Episode {
                show_id,
                season_number,
                episode_number,
            } => format!(
                "{}/tv/{}/{}/{}",
                base, show_id, season_number, episode_number
            ),
        }
    }
}

/// Stops background media for good and opens the player.
pub struct PlaybackLauncher<E> {
    embed: Arc<E>,
    base_url: String,
    intro: Option<Duration>,
    event_sender: broadcast::Sender<PlayerEvent>,
}

impl<E: PlayerEmbed> PlaybackLauncher<E> {
    /// Launcher configured from the global settings.
    pub fn new(embed: Arc<E>) -> Self {
        Self::with_settings(embed, &SETTINGS)
    }

    pub fn with_settings(embed: Arc<E>, settings: &Settings) -> Self {
        let (event_tx, _) = broadcast::channel(16);
        Self {
            embed,
            base_url: settings.player_base_url.clone(),
            intro: settings.show_intro.then_some(settings.intro_duration),
            event_sender: event_tx,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn event_receiver(&self) -> broadcast::Receiver<PlayerEvent> {
        self.event_sender.subscribe()
    }

    /// Stop the session's media, then open `target`.
    ///
    /// The session reaches `StoppedPermanently` before the player is asked to
    /// load anything, so old and new media never overlap.
    pub fn launch(
        &self,
        coordinator: &mut MediaSessionCoordinator,
        target: PlaybackTarget,
    ) -> Result<LaunchedPlayer<E>, PickerError> {
        coordinator.select_muted()?;

        let url = target.playback_url(&self.base_url);
        self.embed.open(&url)?;
        info!(%url, session_id = %coordinator.id(), "Player opened");
        let _ = self.event_sender.send(PlayerEvent::Opened { url: url.clone() });

        Ok(LaunchedPlayer {
            url,
            target,
            embed: Arc::clone(&self.embed),
            intro: self.intro,
            closed: Arc::new(AtomicBool::new(false)),
            close_notify: Arc::new(Notify::new()),
            event_sender: self.event_sender.clone(),
        })
    }
}

/// A player opened by [`PlaybackLauncher::launch`].
///
/// Closing it never resumes the media that was stopped to open it.
pub struct LaunchedPlayer<E> {
    url: String,
    target: PlaybackTarget,
    embed: Arc<E>,
    intro: Option<Duration>,
    closed: Arc<AtomicBool>,
    close_notify: Arc<Notify>,
    event_sender: broadcast::Sender<PlayerEvent>,
}

impl<E: PlayerEmbed> LaunchedPlayer<E> {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn target(&self) -> PlaybackTarget {
        self.target
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Close the player. Returns false if it was already closed.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.embed.close();
        self.close_notify.notify_one();
        debug!(url = %self.url, "Player closed");
        let _ = self.event_sender.send(PlayerEvent::Closed);
        true
    }

    /// Keyboard hook; Escape closes the player.
    pub fn handle_key(&self, key: &str) -> bool {
        if key == ESCAPE_KEY {
            self.close()
        } else {
            false
        }
    }

    /// Show the intro overlay for its configured duration.
    ///
    /// Returns true if the intro ran to completion, false if it is disabled or the
    /// player was closed first.
    pub async fn play_intro(&self) -> bool {
        let Some(duration) = self.intro else {
            return false;
        };
        if self.is_closed() {
            return false;
        }

        let _ = self.event_sender.send(PlayerEvent::IntroStarted);
        tokio::select! {
            _ = sleep(duration) => {
                if self.is_closed() {
                    return false;
                }
                let _ = self.event_sender.send(PlayerEvent::IntroFinished);
                true
            }
            _ = self.close_notify.notified() => {
                debug!("Intro cancelled by close");
                false
            }
        }
    }
}

impl<E> std::fmt::Debug for LaunchedPlayer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchedPlayer")
            .field("url", &self.url)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}
