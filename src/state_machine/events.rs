use serde::{Deserialize, Serialize};

/// Inputs that drive a publish invocation between states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PublishEvent {
    /// `"publishing"` was emitted and the resolver is being asked
    Begin,
    /// The resolver reported the draft ready
    Ready,
    /// The resolver failed, with the reason
    ResolveFailed(String),
    /// The store confirmed the save
    Saved,
    /// The save failed, with the reason
    SaveFailed(String),
    /// Another publish already holds the draft; nothing was attempted
    Rejected,
}

impl PublishEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Ready => "ready",
            Self::ResolveFailed(_) => "resolve_failed",
            Self::Saved => "saved",
            Self::SaveFailed(_) => "save_failed",
            Self::Rejected => "rejected",
        }
    }

    /// Extract error message if this is a failure event
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::ResolveFailed(msg) | Self::SaveFailed(msg) => Some(msg),
            _ => None,
        }
    }
}
