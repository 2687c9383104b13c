//! # Draft Entity
//!
//! A draft is the mutable, not-yet-public form of a resource attached to a
//! parent (a review attached to a review request). It may or may not exist on
//! the remote store yet: `remote_identity` stays `None` until a readiness
//! resolver adopts an existing remote draft or the first save creates one.
//!
//! [`DraftEntity`] is a cheap cloneable handle over shared state. Clones refer
//! to the same draft, so observers, workflows and collaborators can all hold
//! one. State locks are never held while observers or collaborators run.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::events::{DraftEventKind, LifecycleEvent, ObserverRegistry, SubscriptionId};

/// Remote identity of a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub i64);

/// Identity of the resource a draft belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentId(pub i64);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ParentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Editable fields of a draft review
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttributes {
    pub ship_it: bool,
    pub body_top: String,
    pub body_bottom: String,
}

/// What gets sent to the store on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPayload {
    pub public: bool,
    #[serde(flatten)]
    pub attributes: DraftAttributes,
}

/// Point-in-time copy of a draft's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub parent: ParentId,
    pub remote_identity: Option<DraftId>,
    pub is_public: bool,
    pub ready: bool,
    pub attributes: DraftAttributes,
}

#[derive(Debug, Default)]
struct DraftState {
    remote_identity: Option<DraftId>,
    is_public: bool,
    ready: bool,
    attributes: DraftAttributes,
}

struct DraftInner {
    parent: ParentId,
    state: RwLock<DraftState>,
    observers: ObserverRegistry,
    publish_in_flight: AtomicBool,
}

/// Shared handle to a draft
#[derive(Clone)]
pub struct DraftEntity {
    inner: Arc<DraftInner>,
}

impl DraftEntity {
    /// A fresh draft with no remote identity
    pub fn new(parent: ParentId) -> Self {
        Self::from_state(parent, DraftState::default())
    }

    /// A draft rebuilt from a prior fetch
    pub fn hydrate(parent: ParentId, id: DraftId, attributes: DraftAttributes) -> Self {
        Self::from_state(
            parent,
            DraftState {
                remote_identity: Some(id),
                attributes,
                ..DraftState::default()
            },
        )
    }

    fn from_state(parent: ParentId, state: DraftState) -> Self {
        Self {
            inner: Arc::new(DraftInner {
                parent,
                state: RwLock::new(state),
                observers: ObserverRegistry::new(),
                publish_in_flight: AtomicBool::new(false),
            }),
        }
    }

    pub fn parent(&self) -> ParentId {
        self.inner.parent
    }

    pub fn remote_identity(&self) -> Option<DraftId> {
        self.inner.state.read().remote_identity
    }

    /// True until the draft has a remote identity
    pub fn is_new(&self) -> bool {
        self.remote_identity().is_none()
    }

    pub fn is_public(&self) -> bool {
        self.inner.state.read().is_public
    }

    pub fn is_ready(&self) -> bool {
        self.inner.state.read().ready
    }

    pub fn attributes(&self) -> DraftAttributes {
        self.inner.state.read().attributes.clone()
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        let state = self.inner.state.read();
        DraftSnapshot {
            parent: self.inner.parent,
            remote_identity: state.remote_identity,
            is_public: state.is_public,
            ready: state.ready,
            attributes: state.attributes.clone(),
        }
    }

    pub fn payload(&self) -> DraftPayload {
        let state = self.inner.state.read();
        DraftPayload {
            public: state.is_public,
            attributes: state.attributes.clone(),
        }
    }

    pub fn set_public(&self, public: bool) {
        self.inner.state.write().is_public = public;
    }

    /// Apply an edit to the draft's attributes
    pub fn update_attributes<F>(&self, edit: F)
    where
        F: FnOnce(&mut DraftAttributes),
    {
        edit(&mut self.inner.state.write().attributes);
    }

    /// Record the identity assigned by the store on create
    pub fn assign_identity(&self, id: DraftId) {
        self.inner.state.write().remote_identity = Some(id);
    }

    /// Take over an existing remote draft: its identity and its attributes
    pub fn adopt_remote(&self, id: DraftId, attributes: DraftAttributes) {
        let mut state = self.inner.state.write();
        state.remote_identity = Some(id);
        state.attributes = attributes;
        state.ready = true;
    }

    pub fn mark_ready(&self) {
        self.inner.state.write().ready = true;
    }

    /// Observe one event kind
    pub fn on<F>(&self, kind: DraftEventKind, observer: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe(kind, observer)
    }

    /// Observe every event
    pub fn on_any<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        self.inner.observers.subscribe_all(observer)
    }

    pub fn off(&self, id: SubscriptionId) -> bool {
        self.inner.observers.unsubscribe(id)
    }

    /// Emit an event to the currently registered observers. Returns the number notified.
    pub fn trigger(&self, kind: DraftEventKind) -> usize {
        let event = {
            let state = self.inner.state.read();
            LifecycleEvent::new(kind, self.inner.parent, state.remote_identity, state.is_public)
        };
        self.inner.observers.emit(&event)
    }

    pub fn is_publish_in_flight(&self) -> bool {
        self.inner.publish_in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight flag. `None` if another publish already holds it.
    pub fn try_begin_publish(&self) -> Option<PublishInFlight> {
        self.inner
            .publish_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PublishInFlight {
                draft: self.clone(),
            })
    }

    /// Whether two handles refer to the same draft
    pub fn ptr_eq(&self, other: &DraftEntity) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for DraftEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftEntity")
            .field("snapshot", &self.snapshot())
            .field("observers", &self.inner.observers)
            .finish()
    }
}

/// Releases the draft's in-flight flag when dropped
#[derive(Debug)]
pub struct PublishInFlight {
    draft: DraftEntity,
}

impl Drop for PublishInFlight {
    fn drop(&mut self) {
        self.draft
            .inner
            .publish_in_flight
            .store(false, Ordering::Release);
    }
}
