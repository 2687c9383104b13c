//! Scripted collaborators for publish workflow tests.
//!
//! Every mock writes to a shared [`Timeline`] so tests can assert on the exact
//! interleaving of events, collaborator calls and callbacks.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use draft_publish::events::DraftEventKind;
use draft_publish::models::{DraftEntity, DraftId};
use draft_publish::orchestration::PublishOptions;
use draft_publish::persistence::DraftPersistence;
use draft_publish::resolver::ReadinessResolver;
use draft_publish::state_machine::{
    PersistenceError, PersistenceResult, ReadinessError, ReadinessResult,
};

/// Ordered log of everything observable during a test
#[derive(Debug, Clone, Default)]
pub struct Timeline(Arc<Mutex<Vec<String>>>);

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    /// Only the draft events, in order
    pub fn events(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| e.strip_prefix("event:").map(str::to_string))
            .collect()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().iter().filter(|e| e.as_str() == entry).count()
    }
}

/// Log both draft events to the timeline as `event:<name>`
pub fn record_events(draft: &DraftEntity, timeline: &Timeline) {
    for kind in [DraftEventKind::Publishing, DraftEventKind::Published] {
        let timeline = timeline.clone();
        draft.on(kind, move |event| timeline.push(format!("event:{}", event.name())));
    }
}

/// How a scripted resolver answers
#[derive(Debug, Clone)]
pub enum ResolveOutcome {
    /// Ready, leaving identity untouched
    Ready,
    /// Ready, after provisioning the given remote identity
    Provisioned(DraftId),
    Fail(ReadinessError),
}

pub struct ScriptedResolver {
    outcome: ResolveOutcome,
    timeline: Timeline,
    delay: Option<Duration>,
    yield_first: bool,
    calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new(outcome: ResolveOutcome, timeline: &Timeline) -> Self {
        Self {
            outcome,
            timeline: timeline.clone(),
            delay: None,
            yield_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Suspend once before answering, so concurrent callers interleave
    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessResolver for ScriptedResolver {
    async fn ensure_ready(&self, draft: &DraftEntity) -> ReadinessResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.timeline
            .push(format!("resolve:public={}", draft.is_public()));

        if self.yield_first {
            tokio::task::yield_now().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            ResolveOutcome::Ready => {
                draft.mark_ready();
                Ok(())
            }
            ResolveOutcome::Provisioned(id) => {
                draft.assign_identity(*id);
                draft.mark_ready();
                Ok(())
            }
            ResolveOutcome::Fail(err) => Err(err.clone()),
        }
    }
}

pub struct ScriptedPersistence {
    outcome: Result<(), PersistenceError>,
    timeline: Timeline,
    delay: Option<Duration>,
    yield_first: bool,
    calls: AtomicUsize,
}

impl ScriptedPersistence {
    pub fn succeeding(timeline: &Timeline) -> Self {
        Self::new(Ok(()), timeline)
    }

    pub fn failing(err: PersistenceError, timeline: &Timeline) -> Self {
        Self::new(Err(err), timeline)
    }

    fn new(outcome: Result<(), PersistenceError>, timeline: &Timeline) -> Self {
        Self {
            outcome,
            timeline: timeline.clone(),
            delay: None,
            yield_first: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn yielding(mut self) -> Self {
        self.yield_first = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DraftPersistence for ScriptedPersistence {
    async fn save(&self, draft: &DraftEntity) -> PersistenceResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.timeline.push(format!("save:public={}", draft.is_public()));

        if self.yield_first {
            tokio::task::yield_now().await;
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcome.clone()
    }
}

/// Receiver used as publish context; counts callback invocations
#[derive(Debug, Default)]
pub struct CallbackCounts {
    pub success: AtomicUsize,
    pub error: AtomicUsize,
    pub timeline: Timeline,
}

impl CallbackCounts {
    pub fn with_timeline(timeline: &Timeline) -> Arc<Self> {
        Arc::new(Self {
            timeline: timeline.clone(),
            ..Self::default()
        })
    }

    pub fn success(&self) -> usize {
        self.success.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> usize {
        self.error.load(Ordering::SeqCst)
    }
}

/// Options whose callbacks bump the receiver's counters
pub fn counting_options() -> PublishOptions<CallbackCounts> {
    PublishOptions::new()
        .on_success(|counts: &CallbackCounts| {
            counts.success.fetch_add(1, Ordering::SeqCst);
            counts.timeline.push("callback:success");
        })
        .on_error(|counts: &CallbackCounts| {
            counts.error.fetch_add(1, Ordering::SeqCst);
            counts.timeline.push("callback:error");
        })
}

pub fn lookup_error() -> ReadinessError {
    ReadinessError::LookupFailed {
        parent: draft_publish::models::ParentId(1),
        reason: "lookup returned 500".to_string(),
    }
}

pub fn save_error() -> PersistenceError {
    PersistenceError::SaveRejected {
        reason: "store rejected the draft".to_string(),
    }
}
