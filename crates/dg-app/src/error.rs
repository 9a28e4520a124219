//! Error types for the dg-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// provides a unified interface for frontends.
///
/// User-input problems (missing file, missing key) get their own variants
/// so a frontend can show them as validation messages rather than
/// failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No model file provided")]
    MissingModelFile,

    #[error("No weather file provided")]
    MissingWeatherFile,

    #[error("No API key provided; set it in the settings file or DAYGLARE_API_KEY")]
    MissingApiKey,

    #[error("No job has been submitted in this session")]
    MissingJobReference,

    #[error("Failed to read settings file: {path}")]
    SettingsFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Weather error: {0}")]
    Weather(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Cloud error: {0}")]
    Cloud(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dg-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<dg_project::ConfigError> for AppError {
    fn from(err: dg_project::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<dg_weather::WeatherError> for AppError {
    fn from(err: dg_weather::WeatherError) -> Self {
        AppError::Weather(err.to_string())
    }
}

impl From<dg_model::ModelError> for AppError {
    fn from(err: dg_model::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<dg_tools::ToolError> for AppError {
    fn from(err: dg_tools::ToolError) -> Self {
        AppError::Tool(err.to_string())
    }
}

impl From<dg_cloud::CloudError> for AppError {
    fn from(err: dg_cloud::CloudError) -> Self {
        match err {
            dg_cloud::CloudError::MissingApiKey => AppError::MissingApiKey,
            other => AppError::Cloud(other.to_string()),
        }
    }
}

impl From<dg_session::SessionError> for AppError {
    fn from(err: dg_session::SessionError) -> Self {
        AppError::Session(err.to_string())
    }
}

impl From<dg_core::DgError> for AppError {
    fn from(err: dg_core::DgError) -> Self {
        AppError::Config(err.to_string())
    }
}
