use serde::Serialize;

// Commands understood by embedded third-party players
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCommand {
    Pause,
    Stop,
}

impl FrameCommand {
    /// Player API function name carried in the message
    pub fn func_name(self) -> &'static str {
        match self {
            FrameCommand::Pause => "pauseVideo",
            FrameCommand::Stop => "stopVideo",
        }
    }

    pub fn message(self) -> FrameMessage {
        FrameMessage {
            event: "command",
            func: self.func_name(),
            args: "",
        }
    }

    /// JSON text posted to the frame, e.g. `{"event":"command","func":"pauseVideo","args":""}`
    pub fn to_json(self) -> String {
        // Serializing a struct of static strs cannot fail
        serde_json::to_string(&self.message()).unwrap_or_default()
    }
}

/// Wire shape of an out-of-band frame command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameMessage {
    pub event: &'static str,
    pub func: &'static str,
    pub args: &'static str,
}
