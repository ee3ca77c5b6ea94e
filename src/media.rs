use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::commands::FrameCommand;
use crate::error::PickerError;

/// Direct control over a native media element (a trailer `<video>`, ambient audio, ...).
pub trait MediaElement: Send {
    fn is_playing(&self) -> bool;
    /// Hosts may refuse playback (autoplay policies); callers treat that as best-effort.
    fn play(&mut self) -> Result<(), PickerError>;
    fn pause(&mut self);
    /// Seek back to the start position.
    fn rewind(&mut self);
    fn set_muted(&mut self, muted: bool);
}

/// Out-of-band message channel into an embedded third-party player frame.
pub trait EmbedChannel: Send {
    fn post_message(&self, message: &str) -> Result<(), PickerError>;
}

/// Host hook that enumerates whatever is playable right now.
pub trait MediaSource: Send + Sync {
    fn discover(&self) -> Vec<MediaControl>;
}

/// How a discovered element is driven.
pub enum MediaControl {
    Video(Box<dyn MediaElement>),
    Audio(Box<dyn MediaElement>),
    Embedded(Box<dyn EmbedChannel>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
    Embedded,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Embedded => "embedded",
        }
    }
}

/// One element captured in a snapshot, plus the "was playing" flag for this session.
///
/// Handles are not `Clone`: a snapshot owns its handles exclusively.
pub struct MediaHandle {
    control: MediaControl,
    was_playing: bool,
}

impl MediaHandle {
    pub fn new(control: MediaControl) -> Self {
        Self {
            control,
            was_playing: false,
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self.control {
            MediaControl::Video(_) => MediaKind::Video,
            MediaControl::Audio(_) => MediaKind::Audio,
            MediaControl::Embedded(_) => MediaKind::Embedded,
        }
    }

    pub fn was_playing(&self) -> bool {
        self.was_playing
    }

    /// Embedded frames cannot report their state and are treated as not playing.
    pub fn is_playing(&self) -> bool {
        match &self.control {
            MediaControl::Video(el) | MediaControl::Audio(el) => el.is_playing(),
            MediaControl::Embedded(_) => false,
        }
    }

    /// Pause if playing and remember that it was. Returns true when the flag was set.
    fn mark_and_pause(&mut self) -> bool {
        match &mut self.control {
            MediaControl::Video(el) | MediaControl::Audio(el) => {
                if el.is_playing() {
                    el.pause();
                    self.was_playing = true;
                    true
                } else {
                    false
                }
            }
            MediaControl::Embedded(channel) => {
                send_frame_command(channel.as_ref(), FrameCommand::Pause);
                false
            }
        }
    }

    fn resume_if_marked(&mut self) -> bool {
        if !self.was_playing {
            return false;
        }
        self.was_playing = false;
        match &mut self.control {
            MediaControl::Video(el) | MediaControl::Audio(el) => {
                if let Err(e) = el.play() {
                    warn!(error = %e, "Failed to resume media element");
                    return false;
                }
                true
            }
            // Never flagged, see mark_and_pause
            MediaControl::Embedded(_) => false,
        }
    }

    fn stop(&mut self) {
        self.was_playing = false;
        match &mut self.control {
            MediaControl::Video(el) | MediaControl::Audio(el) => {
                el.pause();
                el.rewind();
            }
            MediaControl::Embedded(channel) => {
                send_frame_command(channel.as_ref(), FrameCommand::Stop);
            }
        }
    }

    fn mute(&mut self) {
        if let MediaControl::Video(el) | MediaControl::Audio(el) = &mut self.control {
            el.set_muted(true);
        }
    }
}

impl fmt::Debug for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaHandle")
            .field("kind", &self.kind())
            .field("was_playing", &self.was_playing)
            .finish()
    }
}

// Delivery is best-effort; cross-origin frames routinely reject messages.
fn send_frame_command(channel: &dyn EmbedChannel, command: FrameCommand) {
    if let Err(e) = channel.post_message(&command.to_json()) {
        debug!(command = command.func_name(), error = %e, "Ignoring frame command delivery failure");
    }
}

/// Enumerates playable elements and applies pause/resume/stop to snapshots of them.
pub struct MediaRegistry {
    source: Box<dyn MediaSource>,
    // Set while some session holds a suspended snapshot
    claimed: AtomicBool,
}

impl MediaRegistry {
    pub fn new<S: MediaSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            claimed: AtomicBool::new(false),
        }
    }

    /// Handles for every element discoverable at call time.
    pub fn snapshot(&self) -> Vec<MediaHandle> {
        let handles: Vec<MediaHandle> = self
            .source
            .discover()
            .into_iter()
            .map(MediaHandle::new)
            .collect();
        trace!(count = handles.len(), "Took media snapshot");
        handles
    }

    /// Pause everything that is playing and flag it. Returns how many were flagged.
    pub fn mark_playing_and_pause(&self, handles: &mut [MediaHandle]) -> usize {
        let flagged = handles
            .iter_mut()
            .map(MediaHandle::mark_and_pause)
            .filter(|flagged| *flagged)
            .count();
        debug!(flagged, total = handles.len(), "Paused playing media");
        flagged
    }

    /// Resume flagged handles and clear their flags. Returns how many resumed.
    pub fn resume_marked(&self, handles: &mut [MediaHandle]) -> usize {
        let resumed = handles
            .iter_mut()
            .map(MediaHandle::resume_if_marked)
            .filter(|resumed| *resumed)
            .count();
        debug!(resumed, total = handles.len(), "Resumed flagged media");
        resumed
    }

    /// Pause, rewind and unflag every handle regardless of prior state.
    pub fn stop_permanently(&self, handles: &mut [MediaHandle]) {
        for handle in handles.iter_mut() {
            handle.stop();
        }
        debug!(total = handles.len(), "Stopped media permanently");
    }

    /// Mute every native handle.
    pub fn silence(&self, handles: &mut [MediaHandle]) {
        for handle in handles.iter_mut() {
            handle.mute();
        }
    }

    /// Reserve the registry for one suspended session.
    pub(crate) fn try_claim(&self) -> Result<(), PickerError> {
        self.claimed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| PickerError::SessionBusy)
    }

    pub(crate) fn release(&self) {
        self.claimed.store(false, Ordering::SeqCst);
    }

    /// True while a session holds a suspended snapshot.
    pub fn is_claimed(&self) -> bool {
        self.claimed.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for MediaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaRegistry")
            .field("claimed", &self.is_claimed())
            .finish()
    }
}
