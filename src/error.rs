use thiserror::Error;

use crate::state::SessionState;

// Error taxonomy shared by every component, modelled with thiserror
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Metadata provider rejected credentials (HTTP 401)")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to load {context}: {source}")]
    FetchFailed {
        context: String,
        source: Box<PickerError>, // Box to avoid recursive type size issue
    },

    #[error("Season {0} is not navigable for this show")]
    InvalidSeason(i64),

    #[error("Episode {episode} is not loaded for season {season}")]
    InvalidEpisode { season: i64, episode: i64 },

    #[error("Frame message could not be delivered: {0}")]
    MessageDelivery(String),

    #[error("Media element refused to play: {0}")]
    PlaybackRejected(String),

    #[error("Another media session still holds a suspended snapshot")]
    SessionBusy,

    #[error("Media session already finished ({0:?})")]
    SessionFinished(SessionState),

    #[error("Navigation has not been initialized with a show")]
    NotInitialized,
}

impl PickerError {
    /// Wrap a provider error with the thing that was being loaded.
    pub(crate) fn fetch_failed(context: impl Into<String>, source: PickerError) -> Self {
        PickerError::FetchFailed {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// True for network/provider failures the viewer sees as a blocking error.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, PickerError::FetchFailed { .. })
    }

    /// True for errors that only a miswired UI can produce.
    pub fn is_programming_error(&self) -> bool {
        matches!(
            self,
            PickerError::InvalidSeason(_)
                | PickerError::InvalidEpisode { .. }
                | PickerError::NotInitialized
        )
    }
}
