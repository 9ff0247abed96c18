//! Core error types

use thiserror::Error;

/// Errors raised by the document model and selector engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// A selector string could not be parsed
    #[error("invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, DomError>;
