//! Draft data model.

pub mod draft;

pub use draft::{
    DraftAttributes, DraftEntity, DraftId, DraftPayload, DraftSnapshot, ParentId,
    PublishInFlight,
};
