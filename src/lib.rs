#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Draft Publish Core
//!
//! Publish orchestration for draft resources.
//!
//! ## Overview
//!
//! A draft is a mutable, not-yet-public representation of a larger resource (for
//! example a review attached to a review request). The draft may or may not
//! already exist on the remote store. Publishing it means:
//!
//! 1. announcing the attempt (`"publishing"`),
//! 2. making sure the draft has a remote identity (readiness resolution),
//! 3. optimistically flipping the local `is_public` flag,
//! 4. persisting the draft,
//! 5. announcing success (`"published"`) and notifying the caller.
//!
//! Failures from either collaborator are routed to the caller's error callback.
//! Nothing is ever returned or raised from [`PublishWorkflow::publish`] itself.
//!
//! ## Module Organization
//!
//! - [`models`] - The draft entity and its attributes
//! - [`events`] - Lifecycle event types, the per-entity observer registry and the broadcast bridge
//! - [`state_machine`] - Per-invocation publish state machine and error taxonomy
//! - [`resolver`] - Readiness resolution contract and the lookup-based resolver
//! - [`persistence`] - Persistence contract and the in-memory store
//! - [`orchestration`] - The publish workflow and its callback options
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//! - [`error`] - Crate-level error type
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use draft_publish::models::{DraftEntity, ParentId};
//! use draft_publish::orchestration::{PublishOptions, PublishWorkflow};
//! use draft_publish::persistence::InMemoryDraftStore;
//! use draft_publish::resolver::LookupReadinessResolver;
//!
//! # async fn example() {
//! let store = Arc::new(InMemoryDraftStore::new());
//! let resolver = Arc::new(LookupReadinessResolver::new(store.clone()));
//! let workflow = PublishWorkflow::new(resolver, store);
//!
//! let draft = DraftEntity::new(ParentId(42));
//! let options = PublishOptions::<()>::new()
//!     .on_success(|_| println!("published"))
//!     .on_error(|_| eprintln!("publish failed"));
//!
//! workflow.publish(&draft, Some(options)).await;
//! assert!(draft.is_public());
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod persistence;
pub mod resolver;
pub mod state_machine;

pub use config::{DraftPublishConfig, EventConfig, LoggingConfig, PublishConfig};
pub use error::{DraftError, Result};
pub use events::{DraftEventKind, LifecycleEvent, LifecyclePublisher, SubscriptionId};
pub use models::{DraftAttributes, DraftEntity, DraftId, DraftSnapshot, ParentId};
pub use orchestration::{PublishOptions, PublishWorkflow};
pub use persistence::{DraftPersistence, InMemoryDraftStore};
pub use resolver::{DraftLookup, DraftLookupResult, LookupReadinessResolver, ReadinessResolver};
pub use state_machine::{
    PersistenceError, PublishError, PublishEvent, PublishState, PublishStateMachine,
    ReadinessError, StateMachineError,
};
