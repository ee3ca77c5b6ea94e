use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, trace, warn};

use crate::error::PickerError;
use crate::models::{Episode, Season, Show, ShowId};
use crate::provider::MetadataProvider;

/// Identifies one issued episode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub show_id: ShowId,
    pub season_number: i64,
    pub generation: u64,
}

/// Result of a completed episode request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Latest request for the show; safe to show.
    Current(Vec<Episode>),
    /// A newer request was issued while this one was in flight.
    Superseded { generation: u64, latest: u64 },
}

impl FetchOutcome {
    pub fn is_current(&self) -> bool {
        matches!(self, FetchOutcome::Current(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub key: (ShowId, i64),
    pub episodes: Vec<Episode>,
    pub request_generation: u64,
}

#[derive(Default)]
struct CacheInner {
    // Show whose entries are currently held
    show: Option<Show>,
    entries: HashMap<(ShowId, i64), CacheEntry>,
    latest_generation: HashMap<ShowId, u64>,
    // Source for generations; never reset so tickets from an old context can't collide
    next_generation: u64,
}

impl CacheInner {
    fn switch_show(&mut self, show: Show) {
        let changed = self.show.as_ref().map(|s| s.id) != Some(show.id);
        if changed {
            let dropped = self.entries.len();
            self.entries.clear();
            self.latest_generation.clear();
            if dropped > 0 {
                debug!(show_id = %show.id, dropped, "Show context changed; discarded cached seasons");
            }
        }
        self.show = Some(show);
    }

    fn latest(&self, show_id: ShowId) -> u64 {
        self.latest_generation.get(&show_id).copied().unwrap_or(0)
    }
}

/// Season and episode data for the current show, with stale-response protection.
pub struct SeasonEpisodeCache<P> {
    provider: P,
    inner: Mutex<CacheInner>,
}

impl<P: MetadataProvider> SeasonEpisodeCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    // Guards are never held across an await, so poisoning can only come from a
    // panic in this module; the data is still consistent in that case.
    fn inner(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the show and make it the current context.
    pub async fn fetch_show(&self, show_id: ShowId) -> Result<Show, PickerError> {
        let details = self
            .provider
            .fetch_show(show_id)
            .await
            .map_err(|e| PickerError::fetch_failed(format!("show {}", show_id), e))?;

        let show = Show::from(details);
        info!(
            show_id = %show.id,
            seasons = show.seasons.len(),
            navigable = show.navigable_seasons().len(),
            "Loaded show"
        );
        self.inner().switch_show(show.clone());
        Ok(show)
    }

    /// Navigable seasons of the show, in provider order.
    pub async fn fetch_show_seasons(&self, show_id: ShowId) -> Result<Vec<Season>, PickerError> {
        Ok(self.fetch_show(show_id).await?.navigable_seasons())
    }

    /// Register a new request for `season_number` and return its ticket.
    ///
    /// Every ticket issued for a show supersedes the ones issued before it.
    pub fn issue(&self, show_id: ShowId, season_number: i64) -> Result<FetchTicket, PickerError> {
        let mut inner = self.inner();
        if let Some(show) = inner.show.as_ref().filter(|s| s.id == show_id) {
            if !show.is_navigable_season(season_number) {
                return Err(PickerError::InvalidSeason(season_number));
            }
        }

        inner.next_generation += 1;
        let generation = inner.next_generation;
        inner.latest_generation.insert(show_id, generation);
        trace!(%show_id, season = season_number, generation, "Issued episode request");
        Ok(FetchTicket {
            show_id,
            season_number,
            generation,
        })
    }

    /// Run the request behind `ticket`.
    ///
    /// The response is cached under its key even when superseded, unless a newer
    /// response for the same key is already stored. On failure the previous
    /// entry is left in place.
    pub async fn load(&self, ticket: FetchTicket) -> Result<FetchOutcome, PickerError> {
        let request = self
            .provider
            .fetch_season(ticket.show_id, ticket.season_number);
        let details = request.await.map_err(|e| {
            warn!(
                show_id = %ticket.show_id,
                season = ticket.season_number,
                generation = ticket.generation,
                error = %e,
                "Episode request failed"
            );
            PickerError::fetch_failed(
                format!("season {} of show {}", ticket.season_number, ticket.show_id),
                e,
            )
        })?;

        let mut inner = self.inner();
        let key = (ticket.show_id, ticket.season_number);
        let context_matches = inner
            .show
            .as_ref()
            .map_or(true, |s| s.id == ticket.show_id);

        if context_matches {
            let newer_stored = inner
                .entries
                .get(&key)
                .is_some_and(|e| e.request_generation > ticket.generation);
            if !newer_stored {
                inner.entries.insert(
                    key,
                    CacheEntry {
                        key,
                        episodes: details.episodes.clone(),
                        request_generation: ticket.generation,
                    },
                );
            }
        }

        let latest = inner.latest(ticket.show_id);
        if ticket.generation == latest {
            debug!(
                show_id = %ticket.show_id,
                season = ticket.season_number,
                generation = ticket.generation,
                episodes = details.episodes.len(),
                "Episodes loaded"
            );
            Ok(FetchOutcome::Current(details.episodes))
        } else {
            debug!(
                show_id = %ticket.show_id,
                season = ticket.season_number,
                generation = ticket.generation,
                latest,
                "Discarding superseded episode response"
            );
            Ok(FetchOutcome::Superseded {
                generation: ticket.generation,
                latest,
            })
        }
    }

    /// Issue and load in one step.
    pub async fn fetch_episodes(
        &self,
        show_id: ShowId,
        season_number: i64,
    ) -> Result<FetchOutcome, PickerError> {
        let ticket = self.issue(show_id, season_number)?;
        self.load(ticket).await
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.inner().latest(ticket.show_id) == ticket.generation
    }

    /// Generation of the most recent request for the show, 0 if none.
    pub fn latest_generation(&self, show_id: ShowId) -> u64 {
        self.inner().latest(show_id)
    }

    pub fn entry(&self, show_id: ShowId, season_number: i64) -> Option<CacheEntry> {
        self.inner().entries.get(&(show_id, season_number)).cloned()
    }

    pub fn cached_episodes(&self, show_id: ShowId, season_number: i64) -> Option<Vec<Episode>> {
        self.entry(show_id, season_number).map(|e| e.episodes)
    }

    pub fn current_show(&self) -> Option<Show> {
        self.inner().show.clone()
    }

    /// Drop everything, e.g. when the detail view for the show goes away.
    pub fn clear(&self) {
        let mut inner = self.inner();
        inner.show = None;
        inner.entries.clear();
        inner.latest_generation.clear();
    }
}

impl<P> std::fmt::Debug for SeasonEpisodeCache<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("SeasonEpisodeCache")
            .field("show", &inner.show.as_ref().map(|s| s.id))
            .field("entries", &inner.entries.len())
            .finish()
    }
}
