/// Lifecycle of one media session (one picker modal or one player launch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing captured yet
    #[default]
    Idle,
    /// Background media paused, was-playing flags recorded
    Suspended,
    /// Closed without a selection; flagged media resumed
    Resumed,
    /// Content selected; background media stopped for good
    StoppedPermanently,
}

impl SessionState {
    /// Get string representation of the state
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "IDLE",
            SessionState::Suspended => "SUSPENDED",
            SessionState::Resumed => "RESUMED",
            SessionState::StoppedPermanently => "STOPPED_PERMANENTLY",
        }
    }

    /// Resumed and StoppedPermanently end the session
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Resumed | SessionState::StoppedPermanently
        )
    }
}

/// Navigation cursor owned by the episode navigation controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub season_number: Option<i64>,
    pub episode_number: Option<i64>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.season_number.is_none()
    }
}

/// A finalized season/episode pair handed to the playback launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeSelection {
    pub season_number: i64,
    pub episode_number: i64,
}
