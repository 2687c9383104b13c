use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    errors::{StateMachineError, StateMachineResult},
    events::PublishEvent,
    states::PublishState,
};

/// One recorded step of a publish invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishTransition {
    pub from_state: PublishState,
    pub to_state: PublishState,
    pub event: PublishEvent,
    pub occurred_at: DateTime<Utc>,
}

/// Tracks one publish invocation through its states
#[derive(Debug, Clone)]
pub struct PublishStateMachine {
    publish_id: Uuid,
    current: PublishState,
    history: Vec<PublishTransition>,
}

impl PublishStateMachine {
    pub fn new(publish_id: Uuid) -> Self {
        Self {
            publish_id,
            current: PublishState::default(),
            history: Vec::new(),
        }
    }

    pub fn publish_id(&self) -> Uuid {
        self.publish_id
    }

    pub fn current_state(&self) -> PublishState {
        self.current
    }

    pub fn history(&self) -> &[PublishTransition] {
        &self.history
    }

    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// States visited so far, e.g. `init -> resolving -> failed`
    pub fn path(&self) -> String {
        let mut path = self
            .history
            .first()
            .map_or(self.current, |t| t.from_state)
            .to_string();
        for transition in &self.history {
            path.push_str(" -> ");
            path.push_str(&transition.to_state.to_string());
        }
        path
    }

    /// Reason carried by the last failure event, if the invocation failed on one
    pub fn failure_reason(&self) -> Option<&str> {
        self.history.last().and_then(|t| t.event.error_message())
    }

    /// Attempt to transition the invocation state
    pub fn transition(&mut self, event: PublishEvent) -> StateMachineResult<PublishState> {
        let target_state = Self::determine_target_state(self.current, &event)?;

        tracing::debug!(
            publish_id = %self.publish_id,
            from = %self.current,
            to = %target_state,
            event = event.event_type(),
            "Publish state transition"
        );

        self.history.push(PublishTransition {
            from_state: self.current,
            to_state: target_state,
            event,
            occurred_at: Utc::now(),
        });
        self.current = target_state;

        Ok(target_state)
    }

    /// Determine the target state based on current state and event
    pub fn determine_target_state(
        current_state: PublishState,
        event: &PublishEvent,
    ) -> StateMachineResult<PublishState> {
        let target = match (current_state, event) {
            (PublishState::Init, PublishEvent::Begin) => PublishState::Resolving,
            (PublishState::Init, PublishEvent::Rejected) => PublishState::Failed,

            (PublishState::Resolving, PublishEvent::Ready) => PublishState::Mutating,
            (PublishState::Resolving, PublishEvent::ResolveFailed(_)) => PublishState::Failed,

            (PublishState::Mutating, PublishEvent::Saved) => PublishState::Published,
            (PublishState::Mutating, PublishEvent::SaveFailed(_)) => PublishState::Failed,

            (from_state, _) => {
                return Err(StateMachineError::InvalidTransition {
                    from: from_state.to_string(),
                    event: event.event_type().to_string(),
                })
            }
        };

        Ok(target)
    }
}
