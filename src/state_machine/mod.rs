// State machine module for the publish protocol
//
// A single publish invocation walks INIT -> RESOLVING -> MUTATING -> PUBLISHED,
// or ends in FAILED when readiness resolution or persistence fails.

pub mod errors;
pub mod events;
pub mod publish_state_machine;
pub mod states;

// Re-export main types for convenient access
pub use errors::{
    PersistenceError, PersistenceResult, PublishError, ReadinessError, ReadinessResult,
    StateMachineError, StateMachineResult,
};
pub use events::PublishEvent;
pub use publish_state_machine::{PublishStateMachine, PublishTransition};
pub use states::PublishState;
