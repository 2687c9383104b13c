//! Readiness resolution.
//!
//! Before a draft can be published it needs a confirmed remote identity, or a
//! local placeholder that the first save will create remotely. The publish
//! workflow only sees [`ReadinessResolver`]; [`LookupReadinessResolver`] is the
//! stock implementation, built on a "find the current draft for this parent"
//! lookup that either points at an existing draft or reports none.

pub mod lookup;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{DraftAttributes, DraftEntity, DraftId, ParentId};
use crate::state_machine::ReadinessResult;

pub use lookup::LookupReadinessResolver;

/// Ensures a draft is ready for remote operations
#[async_trait]
pub trait ReadinessResolver: Send + Sync {
    /// Resolve exactly once to ready (`Ok`) or failure (`Err`)
    async fn ensure_ready(&self, draft: &DraftEntity) -> ReadinessResult<()>;
}

/// A draft as held by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub id: DraftId,
    pub parent: ParentId,
    pub public: bool,
    pub attributes: DraftAttributes,
}

/// Outcome of asking the store for a parent's current draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftLookupResult {
    /// The store redirected to an existing draft
    Existing(DraftRecord),
    /// The store has no draft for this parent
    Absent,
}

/// Finds the current draft for a parent resource
#[async_trait]
pub trait DraftLookup: Send + Sync {
    async fn find_draft(&self, parent: ParentId) -> ReadinessResult<DraftLookupResult>;
}
