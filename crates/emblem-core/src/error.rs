//! Error types for emblem-core

use thiserror::Error;

/// Core error type for emblem domain operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A broadcast payload could not be decoded
    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    /// A tag key string did not match the `a{{index}}.{{slot}}` form
    #[error("Invalid tag key '{0}'")]
    InvalidTagKey(String),

    /// An edit transition was requested from the wrong state
    #[error("Invalid edit transition: {0}")]
    InvalidEditTransition(String),
}

/// Result type alias for emblem-core operations
pub type Result<T> = std::result::Result<T, Error>;
