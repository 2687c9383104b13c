//! Shared names and defaults.

/// Lifecycle event names emitted on a draft
pub mod events {
    pub const PUBLISHING: &str = "publishing";
    pub const PUBLISHED: &str = "published";
}

/// Configuration and environment defaults
pub mod system {
    /// Prefix for environment variable overrides (`DRAFT_PUBLISH__PUBLISH__SINGLE_FLIGHT=true`)
    pub const ENV_PREFIX: &str = "DRAFT_PUBLISH";
    pub const ENV_SEPARATOR: &str = "__";
    /// Environment selector, checked before `APP_ENV`
    pub const ENVIRONMENT_VAR: &str = "DRAFT_PUBLISH_ENV";
    pub const DEFAULT_ENVIRONMENT: &str = "development";
    pub const DEFAULT_CONFIG_DIRECTORY: &str = "config";
    pub const DEFAULT_BROADCAST_CAPACITY: usize = 1000;
    pub const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 0;
    pub const DEFAULT_SAVE_TIMEOUT_MS: u64 = 0;
}
