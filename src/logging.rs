//! # Structured Logging Module
//!
//! Environment-aware structured logging. Console output is human readable by
//! default and switches to JSON lines when `logging.format = "json"`.

use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use crate::config::{ConfigManager, LogFormat, LoggingConfig};
use crate::models::{DraftId, ParentId};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific defaults
pub fn init_structured_logging() {
    init_with_config(&LoggingConfig::default());
}

/// Initialize structured logging from configuration.
///
/// `RUST_LOG`, when set, wins over the configured level. Only the first call
/// has any effect.
pub fn init_with_config(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = ConfigManager::detect_environment();
        let log_level = config
            .level
            .clone()
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level));

        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed(),
        };

        // Another subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!(
                "Global tracing subscriber already initialized - continuing with existing subscriber"
            );
        }

        tracing::info!(
            environment = %environment,
            level = %log_level,
            format = ?config.format,
            "🔧 STRUCTURED LOGGING: Initialized"
        );
    });
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Log structured data for publish operations
pub fn log_publish_operation(
    operation: &str,
    publish_id: Uuid,
    parent: ParentId,
    draft_id: Option<DraftId>,
    status: &str,
    details: Option<&str>,
) {
    if details.is_some() {
        tracing::warn!(
            operation = %operation,
            publish_id = %publish_id,
            parent = parent.0,
            draft_id = draft_id.map(|id| id.0),
            status = %status,
            details = details,
            timestamp = %Utc::now().to_rfc3339(),
            "📋 PUBLISH_OPERATION"
        );
    } else {
        tracing::info!(
            operation = %operation,
            publish_id = %publish_id,
            parent = parent.0,
            draft_id = draft_id.map(|id| id.0),
            status = %status,
            timestamp = %Utc::now().to_rfc3339(),
            "📋 PUBLISH_OPERATION"
        );
    }
}
