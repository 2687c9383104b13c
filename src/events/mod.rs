//! Draft lifecycle events.
//!
//! Every [`DraftEntity`](crate::models::DraftEntity) owns an [`ObserverRegistry`]:
//! an ordered list of subscribers that is walked synchronously whenever the
//! draft triggers an event. [`LifecyclePublisher`] bridges those synchronous
//! emissions onto a broadcast channel for async consumers.

pub mod publisher;
pub mod registry;
pub mod types;

pub use publisher::LifecyclePublisher;
pub use registry::{Observer, ObserverRegistry, SubscriptionId};
pub use types::{DraftEventKind, LifecycleEvent};
