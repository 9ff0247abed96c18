//! Error types for folio_app

use thiserror::Error;

/// Errors raised while loading or configuring a page
///
/// Component behaviour never fails: missing markup and rejected submissions
/// are handled inside the component that meets them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Failed to read a configuration or fixture file
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration TOML was malformed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be rendered
    #[error("failed to render configuration: {0}")]
    ConfigRender(#[from] toml::ser::Error),

    /// Page fixture JSON was malformed
    #[error("invalid page fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(err.to_string())
    }
}

/// Result type for folio_app operations
pub type Result<T> = std::result::Result<T, AppError>;
