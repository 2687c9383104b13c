//! # In-Memory Draft Store
//!
//! A store that keeps at most one draft per parent plus the list of drafts that
//! have been published. Implements both [`DraftLookup`] and
//! [`DraftPersistence`], which makes it a complete backend for local use and
//! tests.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use super::DraftPersistence;
use crate::models::{DraftEntity, DraftId, ParentId};
use crate::resolver::{DraftLookup, DraftLookupResult, DraftRecord};
use crate::state_machine::{PersistenceError, PersistenceResult, ReadinessResult};

#[derive(Debug)]
pub struct InMemoryDraftStore {
    drafts: DashMap<ParentId, DraftRecord>,
    published: DashMap<DraftId, DraftRecord>,
    next_id: AtomicI64,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self {
            drafts: DashMap::new(),
            published: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Put an existing draft on the store, as if created by another session
    pub fn seed(&self, record: DraftRecord) {
        self.next_id.fetch_max(record.id.0.saturating_add(1), Ordering::Relaxed);
        self.drafts.insert(record.parent, record);
    }

    pub fn draft_for(&self, parent: ParentId) -> Option<DraftRecord> {
        self.drafts.get(&parent).map(|r| r.value().clone())
    }

    pub fn published(&self, id: DraftId) -> Option<DraftRecord> {
        self.published.get(&id).map(|r| r.value().clone())
    }

    pub fn published_count(&self) -> usize {
        self.published.len()
    }

    fn allocate_id(&self) -> DraftId {
        DraftId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for InMemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftLookup for InMemoryDraftStore {
    async fn find_draft(&self, parent: ParentId) -> ReadinessResult<DraftLookupResult> {
        Ok(match self.draft_for(parent) {
            Some(record) => DraftLookupResult::Existing(record),
            None => DraftLookupResult::Absent,
        })
    }
}

#[async_trait]
impl DraftPersistence for InMemoryDraftStore {
    async fn save(&self, draft: &DraftEntity) -> PersistenceResult<()> {
        let parent = draft.parent();
        let payload = draft.payload();

        let id = match draft.remote_identity() {
            Some(id) => {
                let known = self
                    .drafts
                    .get(&parent)
                    .is_some_and(|record| record.id == id);
                if !known {
                    return Err(PersistenceError::NotFound { draft_id: id });
                }
                id
            }
            None => {
                let id = self.allocate_id();
                draft.assign_identity(id);
                debug!(draft_id = %id, parent = %parent, "Created remote draft");
                id
            }
        };

        let record = DraftRecord {
            id,
            parent,
            public: payload.public,
            attributes: payload.attributes,
        };

        if record.public {
            self.drafts.remove(&parent);
            self.published.insert(id, record);
            debug!(draft_id = %id, parent = %parent, "Draft saved as public");
        } else {
            self.drafts.insert(parent, record);
        }

        Ok(())
    }
}
