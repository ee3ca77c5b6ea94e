use std::sync::Arc;

use tracing::{debug, error, info};

use crate::cache::{FetchOutcome, FetchTicket, SeasonEpisodeCache};
use crate::error::PickerError;
use crate::models::{Episode, Season, Show, ShowId};
use crate::provider::MetadataProvider;
use crate::state::{EpisodeSelection, Selection};

/// Season/episode cursor for one show, fed by [`SeasonEpisodeCache`].
///
/// Season switches are split into [`select_season`](Self::select_season), which
/// updates the selection and hands back a ticket, and [`apply`](Self::apply),
/// which accepts the finished request. Only the newest ticket is ever applied,
/// so a slow response for a season the viewer already left cannot overwrite the
/// list they are looking at.
pub struct EpisodeNavigationController<P> {
    cache: Arc<SeasonEpisodeCache<P>>,
    show: Option<Show>,
    seasons: Vec<Season>,
    selection: Selection,
    current_episodes: Vec<Episode>,
    pending: Option<FetchTicket>,
    fetch_error: Option<String>,
}

impl<P: MetadataProvider> EpisodeNavigationController<P> {
    pub fn new(cache: Arc<SeasonEpisodeCache<P>>) -> Self {
        Self {
            cache,
            show: None,
            seasons: Vec::new(),
            selection: Selection::default(),
            current_episodes: Vec::new(),
            pending: None,
            fetch_error: None,
        }
    }

    /// Load the show, select its first navigable season and load that season.
    pub async fn initialize(&mut self, show_id: ShowId) -> Result<(), PickerError> {
        self.show = None;
        self.seasons.clear();
        self.selection = Selection::default();
        self.current_episodes.clear();
        self.pending = None;
        self.fetch_error = None;

        let show = match self.cache.fetch_show(show_id).await {
            Ok(show) => show,
            Err(e) => {
                self.fetch_error = Some(e.to_string());
                return Err(e);
            }
        };
        self.seasons = show.navigable_seasons();
        self.show = Some(show);

        let Some(first) = self.seasons.first().map(|s| s.number) else {
            info!(%show_id, "Show has no navigable seasons");
            return Ok(());
        };
        self.select_season_and_load(first).await.map(|_| ())
    }

    /// Move the cursor to `season_number` and issue the request for its episodes.
    ///
    /// `current_episodes` is empty until the returned ticket is applied.
    pub fn select_season(&mut self, season_number: i64) -> Result<FetchTicket, PickerError> {
        let show_id = self.show.as_ref().map(|s| s.id).ok_or(PickerError::NotInitialized)?;
        if !self.seasons.iter().any(|s| s.number == season_number) {
            error!(%show_id, season = season_number, "Selected a season that is not navigable");
            return Err(PickerError::InvalidSeason(season_number));
        }

        let ticket = self.cache.issue(show_id, season_number)?;
        self.selection = Selection {
            season_number: Some(season_number),
            episode_number: None,
        };
        self.current_episodes.clear();
        self.fetch_error = None;
        self.pending = Some(ticket);
        debug!(%show_id, season = season_number, generation = ticket.generation, "Season selected");
        Ok(ticket)
    }

    /// Accept a finished request. Returns `Ok(true)` when the episodes became visible.
    ///
    /// Responses for anything but the newest ticket are dropped, errors included.
    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchOutcome, PickerError>,
    ) -> Result<bool, PickerError> {
        if self.pending != Some(ticket) {
            debug!(
                show_id = %ticket.show_id,
                season = ticket.season_number,
                generation = ticket.generation,
                "Dropping response for superseded season request"
            );
            return Ok(false);
        }
        // Our newest ticket, outrun by a request issued elsewhere on the shared cache
        if !self.cache.is_current(&ticket) {
            self.pending = None;
            debug!(
                show_id = %ticket.show_id,
                season = ticket.season_number,
                generation = ticket.generation,
                "Season request superseded by another caller"
            );
            return Ok(false);
        }

        match result {
            Ok(FetchOutcome::Current(episodes)) => {
                self.pending = None;
                self.current_episodes = episodes;
                Ok(true)
            }
            Ok(FetchOutcome::Superseded { .. }) => {
                self.pending = None;
                Ok(false)
            }
            Err(e) => {
                self.pending = None;
                self.fetch_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Sequential form of `select_season` + `load` + `apply`.
    pub async fn select_season_and_load(&mut self, season_number: i64) -> Result<bool, PickerError> {
        let ticket = self.select_season(season_number)?;
        let cache = Arc::clone(&self.cache);
        let result = cache.load(ticket).await;
        self.apply(ticket, result)
    }

    /// Validate `episode_number` against the loaded list and finalize the pick.
    pub fn select_episode(&mut self, episode_number: i64) -> Result<EpisodeSelection, PickerError> {
        let season_number = self
            .selection
            .season_number
            .ok_or(PickerError::NotInitialized)?;
        if !self
            .current_episodes
            .iter()
            .any(|e| e.number == episode_number)
        {
            error!(season = season_number, episode = episode_number, "Selected an episode that is not loaded");
            return Err(PickerError::InvalidEpisode {
                season: season_number,
                episode: episode_number,
            });
        }

        self.selection.episode_number = Some(episode_number);
        Ok(EpisodeSelection {
            season_number,
            episode_number,
        })
    }

    pub fn current_episodes(&self) -> &[Episode] {
        &self.current_episodes
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn show(&self) -> Option<&Show> {
        self.show.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Blocking error shown to the viewer until they pick again or reopen.
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn cache(&self) -> &Arc<SeasonEpisodeCache<P>> {
        &self.cache
    }
}

impl<P> std::fmt::Debug for EpisodeNavigationController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeNavigationController")
            .field("show", &self.show.as_ref().map(|s| s.id))
            .field("selection", &self.selection)
            .field("episodes", &self.current_episodes.len())
            .field("pending", &self.pending)
            .finish()
    }
}
