//! # Publish Orchestration
//!
//! [`PublishWorkflow`] drives a draft through one publish attempt:
//! `"publishing"` → readiness → `is_public = true` → save → `"published"` →
//! success callback. Failures from the resolver or the store go to the error
//! callback. See [`publish_workflow`] for the ordering guarantees.

pub mod options;
pub mod publish_workflow;

pub use options::{BoundCallback, BoundOptions, PublishOptions, ReceiverCallback};
pub use publish_workflow::PublishWorkflow;
