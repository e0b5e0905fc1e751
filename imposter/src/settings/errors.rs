//! Settings storage error types.

use thiserror::Error;

/// Settings storage errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("Settings storage error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings couldn't be encoded
    #[error("Settings encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
