// Event types broadcast by a launched player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Opened { url: String },
    IntroStarted,
    IntroFinished,
    Closed,
}

impl PlayerEvent {
    // Get the name of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::Opened { .. } => "playerOpened",
            PlayerEvent::IntroStarted => "introStarted",
            PlayerEvent::IntroFinished => "introFinished",
            PlayerEvent::Closed => "playerClosed",
        }
    }
}
