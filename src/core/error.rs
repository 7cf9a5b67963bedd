//! Error types for core module
//!
//! Settings persistence is the only fallible core operation. Callers that
//! go through [`load_settings`](crate::core::load_settings) never see these;
//! they get defaults and a log line instead.

use thiserror::Error;

/// Errors from reading or writing the settings file
#[derive(Error, Debug)]
pub enum CoreError {
    /// The settings file or its directory could not be read or written
    #[error("Settings file error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// The settings file is not valid settings JSON
    #[error("Settings format error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
