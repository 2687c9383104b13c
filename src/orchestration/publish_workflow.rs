//! # Publish Workflow
//!
//! Sequencing of one publish attempt on a [`DraftEntity`].
//!
//! ## Ordering
//!
//! Within one invocation: `"publishing"` is emitted before the resolver is
//! called; the resolver settles before `is_public` is set; `is_public` is set
//! before the save starts; the save settles before `"published"` is emitted;
//! `"published"` is emitted before the success callback runs.
//!
//! ## Failure handling
//!
//! A resolver failure leaves `is_public` untouched. A save failure leaves it
//! `true`; the optimistic update is not rolled back. Either failure invokes the
//! error callback once, if one was given, and nothing is returned or raised to
//! the caller. Without an error callback the failure is only logged.
//!
//! ## Concurrency
//!
//! Calls on the same draft are not serialized unless
//! [`PublishConfig::single_flight`] is set. Unguarded, a second call can emit
//! its own `"publishing"` while the first is still waiting on a collaborator,
//! and the store may see two saves.

use std::sync::Arc;
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

use super::options::{BoundCallback, PublishOptions};
use crate::config::PublishConfig;
use crate::events::DraftEventKind;
use crate::logging::log_publish_operation;
use crate::models::DraftEntity;
use crate::persistence::DraftPersistence;
use crate::resolver::ReadinessResolver;
use crate::state_machine::{
    PersistenceError, PersistenceResult, PublishError, PublishEvent, PublishStateMachine,
    ReadinessError, ReadinessResult,
};

/// Publishes drafts through a readiness resolver and a persistence collaborator
pub struct PublishWorkflow {
    resolver: Arc<dyn ReadinessResolver>,
    persistence: Arc<dyn DraftPersistence>,
    config: PublishConfig,
}

impl PublishWorkflow {
    /// Create a workflow with default configuration
    pub fn new(
        resolver: Arc<dyn ReadinessResolver>,
        persistence: Arc<dyn DraftPersistence>,
    ) -> Self {
        Self::with_config(resolver, persistence, PublishConfig::default())
    }

    /// Create a workflow with explicit configuration
    pub fn with_config(
        resolver: Arc<dyn ReadinessResolver>,
        persistence: Arc<dyn DraftPersistence>,
        config: PublishConfig,
    ) -> Self {
        debug!(
            single_flight = config.single_flight,
            resolve_timeout_ms = config.resolve_timeout_ms,
            save_timeout_ms = config.save_timeout_ms,
            "Publish workflow configured"
        );
        Self {
            resolver,
            persistence,
            config,
        }
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Publish without a receiver; callbacks run as free functions
    pub async fn publish(&self, draft: &DraftEntity, options: Option<PublishOptions>) {
        self.publish_with_context(draft, options, Arc::new(())).await;
    }

    /// Publish with callbacks bound to `context`
    #[instrument(skip_all, fields(parent = %draft.parent()))]
    pub async fn publish_with_context<C>(
        &self,
        draft: &DraftEntity,
        options: Option<PublishOptions<C>>,
        context: Arc<C>,
    ) where
        C: Send + Sync + 'static,
    {
        self.run(draft, options, context).await;
    }

    /// Drive one invocation to a terminal state and hand back its machine
    pub(crate) async fn run<C>(
        &self,
        draft: &DraftEntity,
        options: Option<PublishOptions<C>>,
        context: Arc<C>,
    ) -> PublishStateMachine
    where
        C: Send + Sync + 'static,
    {
        let mut machine = PublishStateMachine::new(Uuid::new_v4());
        let callbacks = options.unwrap_or_default().bind(context);

        let _in_flight = if self.config.single_flight {
            match draft.try_begin_publish() {
                Some(guard) => Some(guard),
                None => {
                    Self::advance(&mut machine, PublishEvent::Rejected);
                    Self::report_failure(
                        &machine,
                        draft,
                        &PublishError::AlreadyInFlight,
                        callbacks.error,
                    );
                    return machine;
                }
            }
        } else {
            None
        };

        draft.trigger(DraftEventKind::Publishing);
        Self::advance(&mut machine, PublishEvent::Begin);

        if let Err(err) = self.resolve(draft).await {
            Self::advance(&mut machine, PublishEvent::ResolveFailed(err.to_string()));
            Self::report_failure(&machine, draft, &err.into(), callbacks.error);
            return machine;
        }
        Self::advance(&mut machine, PublishEvent::Ready);

        draft.set_public(true);

        if let Err(err) = self.save(draft).await {
            Self::advance(&mut machine, PublishEvent::SaveFailed(err.to_string()));
            Self::report_failure(&machine, draft, &err.into(), callbacks.error);
            return machine;
        }
        Self::advance(&mut machine, PublishEvent::Saved);

        draft.trigger(DraftEventKind::Published);
        Self::log_outcome(&machine, draft, None);

        if let Some(success) = callbacks.success {
            success();
        }
        machine
    }

    async fn resolve(&self, draft: &DraftEntity) -> ReadinessResult<()> {
        match self.config.resolve_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.resolver.ensure_ready(draft))
                .await
                .map_err(|_| ReadinessError::Timeout {
                    timeout_ms: self.config.resolve_timeout_ms,
                })?,
            None => self.resolver.ensure_ready(draft).await,
        }
    }

    async fn save(&self, draft: &DraftEntity) -> PersistenceResult<()> {
        match self.config.save_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.persistence.save(draft))
                .await
                .map_err(|_| PersistenceError::Timeout {
                    timeout_ms: self.config.save_timeout_ms,
                })?,
            None => self.persistence.save(draft).await,
        }
    }

    fn advance(machine: &mut PublishStateMachine, event: PublishEvent) {
        if let Err(err) = machine.transition(event) {
            error!(
                publish_id = %machine.publish_id(),
                error = %err,
                "Publish state machine rejected transition"
            );
        }
    }

    fn report_failure(
        machine: &PublishStateMachine,
        draft: &DraftEntity,
        err: &PublishError,
        callback: Option<BoundCallback>,
    ) {
        Self::log_outcome(machine, draft, Some(err));

        match callback {
            Some(callback) => callback(),
            None => warn!(
                publish_id = %machine.publish_id(),
                parent = %draft.parent(),
                kind = err.kind(),
                error = %err,
                "Publish failed with no error callback"
            ),
        }
    }

    fn log_outcome(machine: &PublishStateMachine, draft: &DraftEntity, err: Option<&PublishError>) {
        let details = machine
            .failure_reason()
            .map(str::to_string)
            .or_else(|| err.map(ToString::to_string));

        log_publish_operation(
            "publish",
            machine.publish_id(),
            draft.parent(),
            draft.remote_identity(),
            &machine.current_state().to_string(),
            details.as_deref(),
        );

        debug!(
            publish_id = %machine.publish_id(),
            terminal = machine.is_terminal(),
            transitions = machine.history().len(),
            path = %machine.path(),
            history = ?machine.history(),
            "Publish transition history"
        );
    }
}

impl std::fmt::Debug for PublishWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishWorkflow")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
