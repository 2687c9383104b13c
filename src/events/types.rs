use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::events;
use crate::models::{DraftId, ParentId};

/// Named events a draft can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftEventKind {
    /// A publish attempt started; emitted before any remote interaction
    Publishing,
    /// The draft was saved as public
    Published,
}

impl DraftEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publishing => events::PUBLISHING,
            Self::Published => events::PUBLISHED,
        }
    }
}

impl fmt::Display for DraftEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DraftEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            events::PUBLISHING => Ok(Self::Publishing),
            events::PUBLISHED => Ok(Self::Published),
            _ => Err(format!("Invalid draft event: {s}")),
        }
    }
}

/// Payload delivered to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub kind: DraftEventKind,
    pub parent: ParentId,
    pub draft_id: Option<DraftId>,
    /// `is_public` at the moment of emission
    pub is_public: bool,
    pub emitted_at: DateTime<Utc>,
}

impl LifecycleEvent {
    pub fn new(
        kind: DraftEventKind,
        parent: ParentId,
        draft_id: Option<DraftId>,
        is_public: bool,
    ) -> Self {
        Self {
            kind,
            parent,
            draft_id,
            is_public,
            emitted_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}
