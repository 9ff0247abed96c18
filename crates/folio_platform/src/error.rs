//! Host error types

use thiserror::Error;

/// Host-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// An event referenced an element the document does not contain
    #[error("Unknown event target: {0}")]
    UnknownTarget(String),

    /// The event source failed
    #[error("Event loop error: {0}")]
    EventLoop(String),

    /// Generic host error
    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for host operations
pub type Result<T> = std::result::Result<T, PlatformError>;
