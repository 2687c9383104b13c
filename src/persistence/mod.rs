//! Draft persistence.

pub mod in_memory;

use async_trait::async_trait;

use crate::models::DraftEntity;
use crate::state_machine::PersistenceResult;

pub use in_memory::InMemoryDraftStore;

/// Saves a draft's current state, `is_public` included
#[async_trait]
pub trait DraftPersistence: Send + Sync {
    /// Resolve exactly once to saved (`Ok`) or failure (`Err`).
    ///
    /// Saving a draft without a remote identity creates it; implementations
    /// assign the new identity with [`DraftEntity::assign_identity`].
    async fn save(&self, draft: &DraftEntity) -> PersistenceResult<()>;
}
