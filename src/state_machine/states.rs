use serde::{Deserialize, Serialize};
use std::fmt;

/// States of a single publish invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PublishState {
    /// Invocation created, nothing emitted yet
    #[default]
    Init,
    /// `"publishing"` emitted, waiting on the readiness resolver
    Resolving,
    /// Draft is ready; `is_public` is being set and the save is in progress
    Mutating,
    /// Saved as public
    Published,
    /// Resolution or persistence failed, or the call was rejected up front
    Failed,
}

impl PublishState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published | Self::Failed)
    }
}

impl fmt::Display for PublishState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::Resolving => write!(f, "resolving"),
            Self::Mutating => write!(f, "mutating"),
            Self::Published => write!(f, "published"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for PublishState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "init" => Ok(Self::Init),
            "resolving" => Ok(Self::Resolving),
            "mutating" => Ok(Self::Mutating),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Invalid publish state: {s}")),
        }
    }
}
