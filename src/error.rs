//! Error types for the launcher
//!
//! Every pipeline stage owns its own error enum; `BootError` is the umbrella
//! the orchestrator hands to a reporter. Stage errors are wrapped
//! transparently so the reporter sees the original message.

use crate::classpath::ValidateError;
use crate::entry::ResolveError;
use crate::manifest::{LocateError, ParseError};
use thiserror::Error;

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, BootError>;

/// Any failure raised while bootstrapping an application
#[derive(Error, Debug)]
pub enum BootError {
    /// The manifest could not be found
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// The manifest was found but is malformed or unreadable
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A classpath artifact is missing
    #[error(transparent)]
    Validate(#[from] ValidateError),

    /// The entry point could not be resolved to a conforming callable
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Whatever the invoked entry point raised, passed through untouched
    #[error(transparent)]
    Invoke(anyhow::Error),

    /// The launcher's own logging could not be set up
    #[error("Failed to initialize tracing: {0}")]
    Logging(String),
}

impl BootError {
    /// Wrap a failure raised by the entry point itself
    pub fn invoke(error: impl Into<anyhow::Error>) -> Self {
        BootError::Invoke(error.into())
    }
}
