use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::{DraftLookup, DraftLookupResult, ReadinessResolver};
use crate::models::DraftEntity;
use crate::state_machine::{ReadinessError, ReadinessResult};

/// Resolves readiness by looking the draft up on the store.
///
/// - already ready: nothing to do
/// - hydrated with an identity: marked ready without a lookup
/// - lookup finds a draft: its identity and attributes are adopted
/// - lookup finds nothing: the draft becomes a ready placeholder and is
///   created remotely by its first save
pub struct LookupReadinessResolver<L: ?Sized> {
    lookup: Arc<L>,
}

impl<L: DraftLookup + ?Sized> LookupReadinessResolver<L> {
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl<L: DraftLookup + ?Sized> ReadinessResolver for LookupReadinessResolver<L> {
    async fn ensure_ready(&self, draft: &DraftEntity) -> ReadinessResult<()> {
        if draft.is_ready() {
            return Ok(());
        }

        if let Some(id) = draft.remote_identity() {
            debug!(draft_id = %id, parent = %draft.parent(), "Draft already has remote identity");
            draft.mark_ready();
            return Ok(());
        }

        match self.lookup.find_draft(draft.parent()).await? {
            DraftLookupResult::Existing(record) => {
                if record.parent != draft.parent() {
                    return Err(ReadinessError::InvalidRecord {
                        reason: format!(
                            "draft {} belongs to parent {}, expected {}",
                            record.id,
                            record.parent,
                            draft.parent()
                        ),
                    });
                }
                if record.public {
                    return Err(ReadinessError::InvalidRecord {
                        reason: format!("draft {} is already public", record.id),
                    });
                }

                info!(draft_id = %record.id, parent = %draft.parent(), "Adopted existing remote draft");
                draft.adopt_remote(record.id, record.attributes);
            }
            DraftLookupResult::Absent => {
                debug!(parent = %draft.parent(), "No remote draft, provisioning placeholder");
                draft.mark_ready();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DraftAttributes, DraftId, ParentId};
    use crate::resolver::DraftRecord;
    use crate::state_machine::errors::lookup_failed;
    use parking_lot::Mutex;

    struct ScriptedLookup {
        result: ReadinessResult<DraftLookupResult>,
        calls: Mutex<Vec<ParentId>>,
    }

    impl ScriptedLookup {
        fn new(result: ReadinessResult<DraftLookupResult>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl DraftLookup for ScriptedLookup {
        async fn find_draft(&self, parent: ParentId) -> ReadinessResult<DraftLookupResult> {
            self.calls.lock().push(parent);
            self.result.clone()
        }
    }

    fn record(parent: i64, public: bool) -> DraftRecord {
        DraftRecord {
            id: DraftId(100),
            parent: ParentId(parent),
            public,
            attributes: DraftAttributes {
                body_top: "from server".to_string(),
                ..DraftAttributes::default()
            },
        }
    }

    #[tokio::test]
    async fn test_existing_draft_is_adopted() {
        let lookup = ScriptedLookup::new(Ok(DraftLookupResult::Existing(record(5, false))));
        let resolver = LookupReadinessResolver::new(lookup.clone());
        let draft = DraftEntity::new(ParentId(5));

        resolver.ensure_ready(&draft).await.unwrap();

        assert!(draft.is_ready());
        assert_eq!(draft.remote_identity(), Some(DraftId(100)));
        assert_eq!(draft.attributes().body_top, "from server");
        assert_eq!(*lookup.calls.lock(), vec![ParentId(5)]);
    }

    #[tokio::test]
    async fn test_absent_draft_becomes_placeholder() {
        let lookup = ScriptedLookup::new(Ok(DraftLookupResult::Absent));
        let resolver = LookupReadinessResolver::new(lookup);
        let draft = DraftEntity::new(ParentId(5));

        resolver.ensure_ready(&draft).await.unwrap();

        assert!(draft.is_ready());
        assert!(draft.is_new());
    }

    #[tokio::test]
    async fn test_lookup_error_propagates_and_leaves_draft_untouched() {
        let lookup = ScriptedLookup::new(Err(lookup_failed(ParentId(5), "connection reset")));
        let resolver = LookupReadinessResolver::new(lookup);
        let draft = DraftEntity::new(ParentId(5));

        let err = resolver.ensure_ready(&draft).await.unwrap_err();

        assert!(matches!(err, ReadinessError::LookupFailed { .. }));
        assert!(!draft.is_ready());
        assert!(draft.is_new());
    }

    #[tokio::test]
    async fn test_ready_and_hydrated_drafts_skip_lookup() {
        let lookup = ScriptedLookup::new(Ok(DraftLookupResult::Absent));
        let resolver = LookupReadinessResolver::new(lookup.clone());

        let hydrated = DraftEntity::hydrate(ParentId(5), DraftId(3), DraftAttributes::default());
        resolver.ensure_ready(&hydrated).await.unwrap();
        assert!(hydrated.is_ready());

        // Second resolution of the same draft is a no-op
        resolver.ensure_ready(&hydrated).await.unwrap();
        assert!(lookup.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_or_public_records_are_rejected() {
        let resolver = LookupReadinessResolver::new(ScriptedLookup::new(Ok(
            DraftLookupResult::Existing(record(6, false)),
        )));
        let err = resolver
            .ensure_ready(&DraftEntity::new(ParentId(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadinessError::InvalidRecord { .. }));

        let resolver = LookupReadinessResolver::new(ScriptedLookup::new(Ok(
            DraftLookupResult::Existing(record(5, true)),
        )));
        let draft = DraftEntity::new(ParentId(5));
        assert!(resolver.ensure_ready(&draft).await.is_err());
        assert!(draft.is_new());
    }
}
