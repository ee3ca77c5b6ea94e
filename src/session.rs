use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::PickerError;
use crate::media::{MediaHandle, MediaRegistry};
use crate::state::SessionState;

/// Suspends background media while a picker or player is open and decides whether
/// it comes back.
///
/// One coordinator is one session: it captures a single snapshot and every later
/// transition operates on that snapshot only. Elements that show up after `open()`
/// are never touched.
///
/// ```text
/// Idle --open()--> Suspended --close_without_selecting()--> Resumed
///   |                  |
///   +----select()------+--select()--> StoppedPermanently
/// ```
pub struct MediaSessionCoordinator {
    id: Uuid,
    registry: Arc<MediaRegistry>,
    state: SessionState,
    snapshot: Option<Vec<MediaHandle>>,
    // Whether this session currently holds the registry claim
    holds_claim: bool,
}

impl MediaSessionCoordinator {
    pub fn new(registry: Arc<MediaRegistry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            state: SessionState::Idle,
            snapshot: None,
            holds_claim: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Handles captured by this session, if a snapshot has been taken.
    pub fn snapshot(&self) -> Option<&[MediaHandle]> {
        self.snapshot.as_deref()
    }

    /// Pause whatever is playing and remember it. Idempotent while suspended.
    pub fn open(&mut self) -> Result<SessionState, PickerError> {
        match self.state {
            SessionState::Idle => {}
            SessionState::Suspended => {
                debug!(session_id = %self.id, "open() while already suspended; ignoring");
                return Ok(self.state);
            }
            terminal => return Err(PickerError::SessionFinished(terminal)),
        }

        self.registry.try_claim()?;
        self.holds_claim = true;

        let mut handles = self.registry.snapshot();
        let paused = self.registry.mark_playing_and_pause(&mut handles);
        self.snapshot = Some(handles);
        self.state = SessionState::Suspended;
        info!(session_id = %self.id, paused, "Media session suspended");
        Ok(self.state)
    }

    /// Bring back exactly the media that was playing at `open()` time.
    ///
    /// Has no effect once the session has been stopped permanently.
    pub fn close_without_selecting(&mut self) -> SessionState {
        match self.state {
            SessionState::StoppedPermanently | SessionState::Resumed => {
                debug!(session_id = %self.id, state = self.state.as_str(), "close ignored; session already finished");
                return self.state;
            }
            SessionState::Idle | SessionState::Suspended => {}
        }

        let resumed = match self.snapshot.as_mut() {
            Some(handles) => self.registry.resume_marked(handles),
            None => 0,
        };
        self.release_claim();
        self.state = SessionState::Resumed;
        info!(session_id = %self.id, resumed, "Media session resumed");
        self.state
    }

    /// Stop every captured element for good. Valid straight from `Idle`.
    ///
    /// From `Idle` this fails with `SessionBusy` while another session is suspended.
    pub fn select(&mut self) -> Result<SessionState, PickerError> {
        self.stop(false)
    }

    /// `select()` that also mutes the captured native elements.
    pub fn select_muted(&mut self) -> Result<SessionState, PickerError> {
        self.stop(true)
    }

    fn stop(&mut self, mute: bool) -> Result<SessionState, PickerError> {
        match self.state {
            SessionState::StoppedPermanently => return Ok(self.state),
            SessionState::Resumed => return Err(PickerError::SessionFinished(self.state)),
            SessionState::Suspended => {}
            // Stopping touches the same elements a suspended picker may still hold
            SessionState::Idle => {
                self.registry.try_claim()?;
                self.holds_claim = true;
            }
        }

        let registry = Arc::clone(&self.registry);
        let handles = self.snapshot.get_or_insert_with(|| registry.snapshot());
        registry.stop_permanently(handles);
        if mute {
            registry.silence(handles);
        }
        let stopped = handles.len();
        self.release_claim();
        self.state = SessionState::StoppedPermanently;
        info!(session_id = %self.id, stopped, muted = mute, "Media session stopped permanently");
        Ok(self.state)
    }

    fn release_claim(&mut self) {
        if self.holds_claim {
            self.registry.release();
            self.holds_claim = false;
        }
    }
}

impl Drop for MediaSessionCoordinator {
    fn drop(&mut self) {
        // A picker torn down without an explicit close still gives the media back
        if self.state == SessionState::Suspended {
            warn!(session_id = %self.id, "Suspended media session dropped; resuming");
            self.close_without_selecting();
        }
        self.release_claim();
    }
}

impl std::fmt::Debug for MediaSessionCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaSessionCoordinator")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("captured", &self.snapshot.as_ref().map(Vec::len))
            .finish()
    }
}
