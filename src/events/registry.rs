use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::types::{DraftEventKind, LifecycleEvent};

/// Callback registered against a draft's events
pub type Observer = Arc<dyn Fn(&LifecycleEvent) + Send + Sync>;

/// Handle returned on registration, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    /// `None` receives every event
    filter: Option<DraftEventKind>,
    observer: Observer,
}

/// Ordered observer list for one entity.
///
/// Emission is synchronous: every observer currently registered for the event
/// runs, in registration order, before `emit` returns. The list is snapshotted
/// before dispatch, so observers may subscribe or unsubscribe from inside a
/// callback; such changes take effect from the next emission.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: AtomicU64,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for a single event kind
    pub fn subscribe<F>(&self, kind: DraftEventKind, observer: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        self.insert(Some(kind), Arc::new(observer))
    }

    /// Register an observer for every event kind
    pub fn subscribe_all<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        self.insert(None, Arc::new(observer))
    }

    /// Remove a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    /// Deliver an event and return how many observers received it
    pub fn emit(&self, event: &LifecycleEvent) -> usize {
        let targets: Vec<Observer> = self
            .subscriptions
            .lock()
            .iter()
            .filter(|s| s.filter.map_or(true, |kind| kind == event.kind))
            .map(|s| Arc::clone(&s.observer))
            .collect();

        for observer in &targets {
            observer(event);
        }

        targets.len()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, filter: Option<DraftEventKind>, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscriptions.lock().push(Subscription {
            id,
            filter,
            observer,
        });
        id
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("subscriptions", &self.len())
            .finish()
    }
}
