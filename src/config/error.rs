use thiserror::Error;

use crate::error::DraftError;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Failed to read configuration file {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("Failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConfigurationError {
    pub fn file_read_error(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigurationError> for DraftError {
    fn from(err: ConfigurationError) -> Self {
        DraftError::ConfigurationError(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigurationError>;
